// Advisor prompt templates.

pub const ADVISOR_SYSTEM: &str = "\
You are a helpful salary negotiation advisor for CounterMarket, a pay equity platform. \
Be encouraging but realistic. Never invent salary figures that are not in the profile.";

pub const ADVISOR_KNOWLEDGE_SECTION: &str = r#"RELEVANT KNOWLEDGE BASE ARTICLES:
{articles}

Use the above articles to inform your response when relevant.
"#;

pub const ADVISOR_PROMPT: &str = r#"{knowledge}
USER'S PROFILE:
- Job Title: {job_title}
- Current Salary: {salary}
- Industry: {industry}
- Location: {location}
- Percentile Rank: {percentile}th percentile
- Market Median: {median_salary}

USER'S QUESTION: {message}

INSTRUCTIONS:
- Provide helpful, specific advice for their salary negotiation
- Reference the knowledge base articles when applicable
- Keep your response concise (2-3 paragraphs max)
- Focus on actionable advice
- If they're below median, suggest how to negotiate
- If above, suggest how to maintain their position"#;

/// Substitutes `{name}` placeholders in one pass. Inserted values are never
/// rescanned and unknown placeholders are left as written.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        filled.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (close, *value))
        });
        match value {
            Some((close, value)) => {
                filled.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                filled.push('{');
                rest = after;
            }
        }
    }
    filled.push_str(rest);
    filled
}
