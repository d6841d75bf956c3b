//! Advice generation: pluggable, trait-based backends behind one handler.
//!
//! Default with an API key: `LlmAdvisor` (knowledge-grounded completion).
//! Without one: `RuleBasedAdvisor`, which is also the fallback whenever the
//! LLM path fails.
//!
//! `AppState` holds an `Arc<dyn AdviceGenerator>`, chosen at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::compensation::format::format_currency;
use crate::compensation::positioning::Band;
use crate::compensation::prompts::{
    fill_template, ADVISOR_KNOWLEDGE_SECTION, ADVISOR_PROMPT, ADVISOR_SYSTEM,
};
use crate::errors::AppError;
use crate::knowledge::{KnowledgeBase, KnowledgeSource};
use crate::llm_client::{LlmClient, MODEL};

pub const FALLBACK_MODEL: &str = "fallback";

/// The requester's profile, as supplied by the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AdviceContext {
    pub job_title: String,
    pub salary: f64,
    pub percentile: f64,
    pub industry: String,
    pub location: String,
    pub median_salary: f64,
    pub message: String,
}

impl Default for AdviceContext {
    fn default() -> Self {
        Self {
            job_title: "professional".to_string(),
            salary: 0.0,
            percentile: 50.0,
            industry: "technology".to_string(),
            location: String::new(),
            median_salary: 0.0,
            message: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedAdvice {
    pub response: String,
    pub model: String,
    pub rag_enabled: bool,
    pub sources: Vec<KnowledgeSource>,
}

#[async_trait]
pub trait AdviceGenerator: Send + Sync {
    async fn generate(&self, context: &AdviceContext) -> Result<GeneratedAdvice, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// RuleBasedAdvisor
// ────────────────────────────────────────────────────────────────────────────

pub struct RuleBasedAdvisor;

#[async_trait]
impl AdviceGenerator for RuleBasedAdvisor {
    async fn generate(&self, context: &AdviceContext) -> Result<GeneratedAdvice, AppError> {
        Ok(rule_based_advice(context))
    }
}

pub fn rule_based_advice(context: &AdviceContext) -> GeneratedAdvice {
    GeneratedAdvice {
        response: fallback_advice(context.percentile, context.salary, context.median_salary),
        model: FALLBACK_MODEL.to_string(),
        rag_enabled: false,
        sources: vec![],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmAdvisor
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmAdvisor {
    llm: LlmClient,
    knowledge: KnowledgeBase,
    top_k: usize,
}

impl LlmAdvisor {
    pub fn new(llm: LlmClient, knowledge: KnowledgeBase, top_k: usize) -> Self {
        Self {
            llm,
            knowledge,
            top_k,
        }
    }
}

#[async_trait]
impl AdviceGenerator for LlmAdvisor {
    async fn generate(&self, context: &AdviceContext) -> Result<GeneratedAdvice, AppError> {
        let hits = self.knowledge.retrieve(&context.message, self.top_k);
        let articles = hits
            .iter()
            .map(|hit| format!("**{}**\n{}", hit.article.title, hit.article.content))
            .collect::<Vec<_>>()
            .join("\n\n---\n\n");
        let prompt = build_advice_prompt(context, &articles);

        let completion = self
            .llm
            .call(&prompt, ADVISOR_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Advice generation failed: {e}")))?;

        let text = completion
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Llm("Advice generation returned no text".to_string()))?;

        Ok(GeneratedAdvice {
            response: text.to_string(),
            model: MODEL.to_string(),
            rag_enabled: !hits.is_empty(),
            sources: hits.iter().map(|hit| hit.source()).collect(),
        })
    }
}

pub fn build_advice_prompt(context: &AdviceContext, articles: &str) -> String {
    let knowledge = if articles.is_empty() {
        String::new()
    } else {
        fill_template(ADVISOR_KNOWLEDGE_SECTION, &[("articles", articles)])
    };
    let salary = format_currency(context.salary);
    let percentile = context.percentile.to_string();
    let median_salary = format_currency(context.median_salary);

    fill_template(
        ADVISOR_PROMPT,
        &[
            ("knowledge", knowledge.as_str()),
            ("job_title", context.job_title.as_str()),
            ("salary", salary.as_str()),
            ("industry", context.industry.as_str()),
            ("location", context.location.as_str()),
            ("percentile", percentile.as_str()),
            ("median_salary", median_salary.as_str()),
            ("message", context.message.as_str()),
        ],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Fallback copy
// ────────────────────────────────────────────────────────────────────────────

/// Rule-based advice keyed off the percentile band.
pub fn fallback_advice(percentile: f64, salary: f64, median: f64) -> String {
    let gap = format_currency(median - salary);
    match Band::from_percentile(percentile) {
        Band::BelowMarket => format!(
            "Your salary is in the bottom quartile, which suggests you have strong grounds for negotiation.

Based on market data, you could potentially earn {gap} more to reach the median. I recommend:
1. Document your key achievements and contributions
2. Research comparable salaries at other companies
3. Schedule a meeting with your manager to discuss your compensation
4. Be prepared to discuss your value with specific examples

Remember, the data is on your side - use it confidently!"
        ),
        Band::BelowMedian => format!(
            "You're earning below the market median, which means there's room for improvement.

The gap to median is about {gap}. Here's how to approach this:
1. Prepare a list of your accomplishments from the past year
2. Highlight any additional responsibilities you've taken on
3. Frame your ask around your value, not just the market data
4. Consider timing - performance reviews are ideal moments

Stay positive and focus on your contributions!"
        ),
        Band::Competitive => "Congratulations! You're earning above the market median, which is a strong position.

To maintain and grow your compensation:
1. Continue documenting your wins and impact
2. Seek stretch opportunities that increase your visibility
3. Build relationships with leadership
4. Stay current on market trends in your field

You're doing well - keep up the great work!"
            .to_string(),
        Band::AboveMarket => "Excellent! You're in the top quartile of earners for your role.

To maintain this position:
1. Focus on high-impact projects that demonstrate your value
2. Consider mentoring others - it showcases leadership
3. Stay visible to decision-makers
4. Keep developing skills that are in high demand

You've earned your position through strong performance. Continue to deliver results!"
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_bottom_quartile_embeds_gap() {
        let text = fallback_advice(12.0, 60_000.0, 90_000.0);
        assert!(text.starts_with("Your salary is in the bottom quartile"));
        assert!(text.contains("earn $30,000 more to reach the median"));
    }

    #[test]
    fn test_fallback_below_median_embeds_gap() {
        let text = fallback_advice(25.0, 82_500.0, 90_000.0);
        assert!(text.contains("The gap to median is about $7,500."));
    }

    #[test]
    fn test_fallback_upper_bands_are_fixed() {
        assert!(fallback_advice(50.0, 90_000.0, 90_000.0).starts_with("Congratulations!"));
        assert!(fallback_advice(74.9, 1.0, 2.0).starts_with("Congratulations!"));
        assert!(fallback_advice(75.0, 150_000.0, 90_000.0).starts_with("Excellent!"));
    }

    #[test]
    fn test_context_defaults() {
        let ctx: AdviceContext = serde_json::from_str("{}").unwrap();
        assert_eq!(ctx.job_title, "professional");
        assert_eq!(ctx.percentile, 50.0);
        assert_eq!(ctx.industry, "technology");
    }

    #[tokio::test]
    async fn test_rule_based_advisor_labels_fallback() {
        let ctx = AdviceContext {
            percentile: 90.0,
            ..AdviceContext::default()
        };
        let advice = RuleBasedAdvisor.generate(&ctx).await.unwrap();
        assert_eq!(advice.model, "fallback");
        assert!(!advice.rag_enabled);
        assert!(advice.sources.is_empty());
        assert!(advice.response.starts_with("Excellent!"));
    }

    #[test]
    fn test_prompt_includes_profile_and_articles() {
        let ctx = AdviceContext {
            job_title: "Nurse".to_string(),
            salary: 64_000.0,
            percentile: 30.0,
            median_salary: 72_000.0,
            message: "How do I ask for a raise?".to_string(),
            ..AdviceContext::default()
        };
        let prompt = build_advice_prompt(&ctx, "**Timing**\nAsk after a win.");
        assert!(prompt.contains("RELEVANT KNOWLEDGE BASE ARTICLES:\n**Timing**"));
        assert!(prompt.contains("- Job Title: Nurse"));
        assert!(prompt.contains("- Current Salary: $64,000"));
        assert!(prompt.contains("- Percentile Rank: 30th percentile"));
        assert!(prompt.contains("- Market Median: $72,000"));
        assert!(prompt.contains("USER'S QUESTION: How do I ask for a raise?"));

        let bare = build_advice_prompt(&ctx, "");
        assert!(!bare.contains("KNOWLEDGE BASE"));
    }

    #[test]
    fn test_prompt_keeps_user_braces_literal() {
        let ctx = AdviceContext {
            job_title: "{message}".to_string(),
            industry: "{salary}".to_string(),
            salary: 64_000.0,
            message: "What about {median_salary}?".to_string(),
            ..AdviceContext::default()
        };
        let prompt = build_advice_prompt(&ctx, "Quote {job_title} in your ask.");
        assert!(prompt.contains("- Job Title: {message}\n"));
        assert!(prompt.contains("- Industry: {salary}\n"));
        assert!(prompt.contains("- Current Salary: $64,000"));
        assert!(prompt.contains("USER'S QUESTION: What about {median_salary}?"));
        assert!(prompt.contains("Quote {job_title} in your ask."));
        assert_eq!(prompt.matches("What about").count(), 1);
    }
}
