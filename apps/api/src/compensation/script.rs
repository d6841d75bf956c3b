//! Negotiation script assembly.
//!
//! Every numeric fragment comes from [`position`] or the distribution anchors;
//! the remaining text is fixed template copy.

use serde::Serialize;

use crate::compensation::distribution::{DistributionSummary, PositioningError};
use crate::compensation::format::{format_currency, round_to};
use crate::compensation::positioning::{percentile_rank, Band};

const MAX_ACHIEVEMENTS: usize = 5;
const DEFAULT_ACHIEVEMENTS: &str = "my consistent high performance";

#[derive(Debug, Clone, Serialize)]
pub struct NegotiationScript {
    pub opening: String,
    pub market_data: String,
    pub achievements: String,
    pub ask: String,
    pub closing: String,
    pub tips: Vec<String>,
    pub data_points: ScriptDataPoints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptDataPoints {
    pub your_salary: f64,
    pub target_salary: f64,
    pub your_percentile: u8,
    pub target_percentile: u8,
    pub market_median: f64,
    pub market_p25: f64,
    pub market_p75: f64,
    pub market_p90: f64,
    pub sample_size: u64,
    pub industry: String,
    pub location: String,
    pub increase_percent: f64,
    pub increase_amount: f64,
    pub gap_to_median: f64,
    pub gap_to_median_percent: f64,
}

/// Inputs describing the person asking for the raise.
#[derive(Debug, Clone)]
pub struct ScriptRequest<'a> {
    pub job_title: &'a str,
    pub current_salary: f64,
    pub target_salary: f64,
    pub achievements: &'a [String],
    pub industry: &'a str,
    pub location: &'a str,
}

/// `100 * (target - current) / current`.
pub fn increase_percent(current: f64, target: f64) -> Result<f64, PositioningError> {
    if current.is_nan() || current <= 0.0 {
        return Err(PositioningError::InvalidInput(format!(
            "current salary must be positive, got {current}"
        )));
    }
    Ok(100.0 * (target - current) / current)
}

pub fn build_script(
    request: &ScriptRequest<'_>,
    dist: &DistributionSummary,
) -> Result<NegotiationScript, PositioningError> {
    let current = request.current_salary;
    let target = request.target_salary;
    let increase_pct = increase_percent(current, target)?;

    let current_percentile = percentile_rank(current, dist);
    let target_percentile = percentile_rank(target, dist);

    let achievements: Vec<&str> = request
        .achievements
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .take(MAX_ACHIEVEMENTS)
        .collect();
    let achievements_text = if achievements.is_empty() {
        DEFAULT_ACHIEVEMENTS.to_string()
    } else {
        achievements.join("; ")
    };

    let gap_to_median = dist.median - current;

    Ok(NegotiationScript {
        opening: format!(
            "Thank you for meeting with me. I wanted to discuss my compensation as a {}. \
             Based on my research and contributions over the past year, I believe an adjustment is warranted.",
            request.job_title
        ),
        market_data: market_data_narrative(
            current,
            dist,
            request.industry,
            request.location,
            current_percentile,
        ),
        achievements: format!("My key contributions include: {achievements_text}"),
        ask: ask_narrative(current, target, increase_pct, dist, target_percentile),
        closing: "I am committed to continuing to deliver strong results and would appreciate \
                  your consideration of this request. I'm open to discussing how we can make this work."
            .to_string(),
        tips: tips(current_percentile, dist.median),
        data_points: ScriptDataPoints {
            your_salary: current,
            target_salary: target,
            your_percentile: current_percentile,
            target_percentile,
            market_median: dist.median,
            market_p25: dist.p25,
            market_p75: dist.p75,
            market_p90: dist.p90,
            sample_size: dist.sample_size,
            industry: request.industry.to_string(),
            location: request.location.to_string(),
            increase_percent: round_to(increase_pct, 1),
            increase_amount: target - current,
            gap_to_median,
            gap_to_median_percent: round_to(100.0 * gap_to_median / current, 1),
        },
    })
}

fn market_data_narrative(
    current: f64,
    dist: &DistributionSummary,
    industry: &str,
    location: &str,
    percentile: u8,
) -> String {
    let location_text = if location.is_empty() {
        String::new()
    } else {
        format!(" in {location}")
    };

    let (position_text, urgency) = match Band::from_percentile(f64::from(percentile)) {
        Band::BelowMarket => (
            "significantly below market rate (bottom 25%)",
            "This represents a meaningful gap that I'd like to address.",
        ),
        Band::BelowMedian => (
            "below the market median",
            "Bringing my compensation to median would reflect my market value.",
        ),
        Band::Competitive => (
            "around the market median",
            "Given my contributions, I believe I should be compensated in the upper quartile.",
        ),
        Band::AboveMarket => (
            "in the upper range",
            "I'd like to ensure my compensation continues to reflect my performance.",
        ),
    };

    format!(
        "I've researched compensation data for {industry} professionals{location_text}. \
         Based on {} data points, the market median is {}, \
         with the 75th percentile at {} and the 90th percentile at {}. \
         My current salary of {} places me at the {percentile}th percentile, which is {position_text}. \
         {urgency}",
        dist.sample_size,
        format_currency(dist.median),
        format_currency(dist.p75),
        format_currency(dist.p90),
        format_currency(current),
    )
}

fn ask_narrative(
    current: f64,
    target: f64,
    increase_pct: f64,
    dist: &DistributionSummary,
    target_percentile: u8,
) -> String {
    let justification = if target <= dist.median {
        "This would bring me to the market median, which is a fair baseline for my experience."
            .to_string()
    } else if target <= dist.p75 {
        format!(
            "This would place me at the {target_percentile}th percentile, reflecting my above-average contributions."
        )
    } else if target <= dist.p90 {
        format!(
            "This would position me at the {target_percentile}th percentile, appropriate for a high performer."
        )
    } else {
        "This reflects top-tier compensation for exceptional contributors in this field.".to_string()
    };

    format!(
        "I am requesting a salary adjustment to {}, which represents a {increase_pct:.1}% increase ({}). \
         {justification} This is well within the market range of {} to {}.",
        format_currency(target),
        format_currency(target - current),
        format_currency(dist.p25),
        format_currency(dist.p90),
    )
}

fn tips(current_percentile: u8, median: f64) -> Vec<String> {
    vec![
        format!("Your current salary is at the {current_percentile}th percentile - use this as leverage"),
        "Practice your script until it feels natural".to_string(),
        "Maintain confident but collaborative tone".to_string(),
        format!(
            "If they counter, don't go below {} (the market median)",
            format_currency(median)
        ),
        "Have a backup ask ready (signing bonus, extra PTO, remote flexibility)".to_string(),
        "Get any agreement in writing within 48 hours".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market() -> DistributionSummary {
        DistributionSummary::new(100, 95_000.0, 90_000.0, 70_000.0, 115_000.0, 140_000.0).unwrap()
    }

    fn request<'a>(current: f64, target: f64, achievements: &'a [String]) -> ScriptRequest<'a> {
        ScriptRequest {
            job_title: "Data Analyst",
            current_salary: current,
            target_salary: target,
            achievements,
            industry: "Technology",
            location: "Austin, TX",
        }
    }

    #[test]
    fn test_increase_percent_exact() {
        assert_eq!(increase_percent(100_000.0, 120_000.0).unwrap(), 20.0);
    }

    #[test]
    fn test_non_positive_current_is_invalid() {
        assert!(matches!(
            increase_percent(0.0, 120_000.0),
            Err(PositioningError::InvalidInput(_))
        ));
        assert!(matches!(
            increase_percent(-1.0, 120_000.0),
            Err(PositioningError::InvalidInput(_))
        ));
        assert!(build_script(&request(0.0, 100_000.0, &[]), &market()).is_err());
    }

    #[test]
    fn test_data_points() {
        let script = build_script(&request(80_000.0, 100_000.0, &[]), &market()).unwrap();
        let dp = &script.data_points;
        assert_eq!(dp.your_percentile, 37);
        assert_eq!(dp.target_percentile, 60);
        assert_eq!(dp.increase_percent, 25.0);
        assert_eq!(dp.increase_amount, 20_000.0);
        assert_eq!(dp.gap_to_median, 10_000.0);
        assert_eq!(dp.gap_to_median_percent, 12.5);
        assert_eq!(dp.sample_size, 100);
        assert_eq!(dp.location, "Austin, TX");
    }

    #[test]
    fn test_gap_to_median_matches_to_the_cent() {
        let dist = market();
        let current = 73_456.78;
        let script = build_script(&request(current, 95_000.0, &[]), &dist).unwrap();
        let expected = dist.median - current;
        assert!((script.data_points.gap_to_median - expected).abs() < 0.005);
    }

    #[test]
    fn test_market_narrative_embeds_anchors() {
        let script = build_script(&request(60_000.0, 90_000.0, &[]), &market()).unwrap();
        assert!(script
            .market_data
            .starts_with("I've researched compensation data for Technology professionals in Austin, TX."));
        assert!(script.market_data.contains("Based on 100 data points, the market median is $90,000"));
        assert!(script.market_data.contains("75th percentile at $115,000"));
        assert!(script.market_data.contains("90th percentile at $140,000"));
        assert!(script.market_data.contains("My current salary of $60,000 places me at the 21th percentile"));
        assert!(script.market_data.contains("bottom 25%"));
    }

    #[test]
    fn test_ask_justification_bands() {
        let dist = market();
        let at_median = build_script(&request(80_000.0, 90_000.0, &[]), &dist).unwrap();
        assert!(at_median.ask.contains("bring me to the market median"));
        assert!(at_median.ask.contains("represents a 12.5% increase ($10,000)"));
        assert!(at_median.ask.contains("market range of $70,000 to $140,000"));

        let upper = build_script(&request(80_000.0, 100_000.0, &[]), &dist).unwrap();
        assert!(upper.ask.contains("place me at the 60th percentile"));

        let high = build_script(&request(80_000.0, 127_500.0, &[]), &dist).unwrap();
        assert!(high.ask.contains("position me at the 82th percentile"));

        let top = build_script(&request(80_000.0, 160_000.0, &[]), &dist).unwrap();
        assert!(top.ask.contains("top-tier compensation"));
    }

    #[test]
    fn test_achievements_filtered_and_capped() {
        let achievements: Vec<String> = ["", "Shipped search", "  ", "Cut costs 20%", "a", "b", "c", "d"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let script = build_script(&request(80_000.0, 90_000.0, &achievements), &market()).unwrap();
        assert_eq!(
            script.achievements,
            "My key contributions include: Shipped search; Cut costs 20%; a; b; c"
        );

        let empty = build_script(&request(80_000.0, 90_000.0, &[]), &market()).unwrap();
        assert!(empty.achievements.ends_with("my consistent high performance"));
    }

    #[test]
    fn test_tips_embed_percentile_and_median() {
        let script = build_script(&request(100_000.0, 120_000.0, &[]), &market()).unwrap();
        assert_eq!(script.tips.len(), 6);
        assert!(script.tips[0].contains("60th percentile"));
        assert!(script.tips[3].contains("don't go below $90,000"));
    }

    #[test]
    fn test_empty_location_omits_clause() {
        let mut req = request(100_000.0, 120_000.0, &[]);
        req.location = "";
        let script = build_script(&req, &market()).unwrap();
        assert!(script.market_data.contains("Technology professionals. Based on"));
        assert!(script.opening.contains("as a Data Analyst."));
    }
}
