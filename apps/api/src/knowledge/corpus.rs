// Negotiation knowledge base shipped with the binary.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub category: &'static str,
    pub title: &'static str,
    pub content: &'static str,
}

pub static ARTICLES: &[Article] = &[
    Article {
        category: "negotiation_basics",
        title: "How to Start a Salary Negotiation",
        content: "Starting a salary negotiation requires preparation and confidence. First, research market rates for your role using sites like Glassdoor, LinkedIn Salary, and Levels.fyi. Know your worth before entering any discussion. Schedule a dedicated meeting with your manager - don't ambush them. Open with gratitude for the opportunity, then present your case with specific achievements and market data. Use phrases like 'Based on my research and contributions, I'd like to discuss adjusting my compensation to align with market rates.' Always have a specific number in mind, and aim slightly higher than your target to leave room for negotiation.",
    },
    Article {
        category: "negotiation_tactics",
        title: "Proven Negotiation Tactics That Work",
        content: "Effective negotiation tactics include: 1) Anchoring - state your desired salary first to set the reference point. 2) Silence - after making your ask, stay quiet and let them respond. 3) The Flinch - show mild surprise at low offers to signal it's below expectations. 4) Never accept the first offer - there's almost always room for improvement. 5) Get it in writing - verbal promises mean nothing without documentation. 6) Consider the total package - salary, bonus, equity, PTO, remote work, and benefits all have value. 7) Have alternatives - knowing you have other options gives you leverage and confidence.",
    },
    Article {
        category: "pay_equity",
        title: "Understanding Pay Gaps and Your Rights",
        content: "Pay gaps exist across gender, race, and other demographics. Women earn approximately 82 cents for every dollar men earn. The gap is wider for women of color - Black women earn 63 cents and Latina women earn 57 cents per dollar compared to white men. Know your rights: many states now have pay transparency laws requiring salary ranges in job postings. Some states prohibit asking about salary history. You can ask HR about your company's pay equity practices and whether they conduct regular pay audits. If you suspect discrimination, document everything and consider consulting with an employment attorney or filing a complaint with the EEOC.",
    },
    Article {
        category: "market_research",
        title: "How to Research Your Market Value",
        content: "To determine your market value, use multiple sources: Glassdoor and LinkedIn Salary provide self-reported data. Levels.fyi is excellent for tech roles. The Bureau of Labor Statistics has official government data. Talk to recruiters - they know current market rates. Network with peers in similar roles. Consider factors that affect pay: location (SF pays 40% more than average), company size (enterprise pays 15% more than startups), industry (tech and finance pay premiums), years of experience, and specialized skills. Create a salary range with low, mid, and high points based on your research.",
    },
    Article {
        category: "timing",
        title: "Best Times to Ask for a Raise",
        content: "Timing matters for salary negotiations. Best times: 1) During annual performance reviews - companies expect these discussions. 2) After completing a major project successfully. 3) When taking on new responsibilities. 4) After receiving a competing job offer (use carefully). 5) When the company is doing well financially. 6) 3-6 months after a promotion if salary didn't increase proportionally. Avoid asking during layoffs, budget cuts, right after starting, or during your manager's stressful periods. If told 'not now,' ask when would be appropriate and get a specific timeline.",
    },
    Article {
        category: "scripts",
        title: "What to Say When Negotiating Salary",
        content: "Key phrases for negotiation: 'Based on my research of market rates and my contributions to the team, I believe a salary of $X would be appropriate.' 'I'm excited about this opportunity. To make this work, I'd need the compensation to be in the range of $X-$Y.' 'Thank you for the offer. I was expecting something closer to $X based on my experience and the market rate for this role.' If they say no: 'I understand budget constraints. What would it take for me to reach $X in the next 6-12 months?' or 'If base salary is fixed, are there other components we could discuss like signing bonus, equity, or additional PTO?'",
    },
    Article {
        category: "remote_work",
        title: "Negotiating Salary for Remote Positions",
        content: "Remote work adds complexity to salary negotiations. Some companies pay based on location (geo-adjusted), while others pay the same regardless of where you live. If relocating from a high-cost area, negotiate to keep your current salary or accept a smaller adjustment than proposed. Highlight that remote workers often have higher productivity and lower overhead costs for the company. If the company insists on location-based pay, negotiate for other benefits: home office stipend, coworking space allowance, or annual travel budget for team meetings. Remote work itself has value - factor this into your total compensation calculation.",
    },
    Article {
        category: "new_job",
        title: "Negotiating Salary for a New Job Offer",
        content: "New job offers are your best opportunity to negotiate. Never accept immediately - always ask for time to consider. Research the company's pay practices and typical ranges. Start negotiations after receiving a written offer, not during interviews. Focus on the total package: base salary, signing bonus, annual bonus, equity/RSUs, PTO, 401k match, and other benefits. If the base is firm, push for a signing bonus or accelerated review. Get everything in writing before accepting. It's okay to negotiate multiple rounds - employers expect it. The worst they can say is no, and offers are rarely rescinded for reasonable negotiations.",
    },
    Article {
        category: "promotion",
        title: "Getting Paid Fairly After a Promotion",
        content: "Promotions should come with significant pay increases, typically 10-20%. If offered less, negotiate before accepting the new title. Research what the new role pays in the market - your raise should bring you to at least the market median for the new level. Document your expanded responsibilities and how they differ from your current role. If the raise is below expectations, ask: 'This promotion comes with significantly more responsibility. Based on market data for this role, I expected the compensation to be closer to $X. Can we discuss bridging that gap?' Consider negotiating a timeline for an additional raise after proving yourself in the new role.",
    },
    Article {
        category: "confidence",
        title: "Building Confidence for Salary Discussions",
        content: "Confidence in negotiation comes from preparation. Know your worth by researching thoroughly. Write down your achievements and practice articulating them. Role-play the conversation with a friend or mentor. Remember that negotiating is expected and professional - you won't lose an offer for asking professionally. Reframe nervousness as excitement. Use power poses before important meetings. Focus on facts and data rather than emotions. It's not personal - it's business. Companies have budgets for negotiations and often start low expecting pushback. You're advocating for your value, which is a professional skill, not a character flaw. The more you negotiate, the easier it becomes.",
    },
];
