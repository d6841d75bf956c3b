use serde::Serialize;

use crate::compensation::format::format_whole;
use crate::compensation::positioning::Band;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub status: Band,
    pub message: String,
    pub action: String,
    pub potential_increase: Option<String>,
}

/// Builds the recommendation block for a band.
///
/// `context_label` reads naturally after "pay", e.g. `at Google` or `in the market`.
pub fn recommend(band: Band, context_label: &str, salary: f64, median: f64) -> Recommendation {
    let shortfall = format_whole((median - salary).trunc().abs());

    let (message, action, potential_increase) = match band {
        Band::BelowMarket => (
            format!(
                "Your salary is significantly below typical pay {context_label}. \
                 You may have strong grounds for negotiation."
            ),
            "Consider requesting a salary review with documented market data.",
            Some(format!("${shortfall} to reach median")),
        ),
        Band::BelowMedian => (
            format!("Your salary is below the median {context_label} for your role and experience."),
            "Document your achievements and consider discussing compensation.",
            Some(format!("${shortfall} potential increase")),
        ),
        Band::Competitive => (
            format!("Your salary is competitive and above median {context_label}."),
            "Focus on maintaining performance and exploring growth opportunities.",
            None,
        ),
        Band::AboveMarket => (
            format!("Your salary is in the top quartile {context_label}."),
            "Continue excelling and consider mentoring others.",
            None,
        ),
    };

    Recommendation {
        status: band,
        message,
        action: action.to_string(),
        potential_increase,
    }
}

pub fn context_label(company: Option<&str>) -> String {
    match company {
        Some(name) => format!("at {name}"),
        None => "in the market".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_market_reports_shortfall() {
        let rec = recommend(Band::BelowMarket, "in the market", 60_000.0, 90_000.0);
        assert_eq!(rec.status, Band::BelowMarket);
        assert!(rec.message.contains("significantly below typical pay in the market"));
        assert_eq!(rec.potential_increase.as_deref(), Some("$30,000 to reach median"));
    }

    #[test]
    fn test_below_median_truncates_fraction() {
        let rec = recommend(Band::BelowMedian, "at Google", 80_000.75, 90_000.0);
        assert!(rec.message.contains("below the median at Google"));
        assert_eq!(rec.potential_increase.as_deref(), Some("$9,999 potential increase"));
    }

    #[test]
    fn test_upper_bands_have_no_increase() {
        assert!(recommend(Band::Competitive, "in the market", 95_000.0, 90_000.0)
            .potential_increase
            .is_none());
        let top = recommend(Band::AboveMarket, "at Meta", 200_000.0, 90_000.0);
        assert!(top.potential_increase.is_none());
        assert!(top.message.contains("top quartile at Meta"));
    }

    #[test]
    fn test_context_label() {
        assert_eq!(context_label(Some("Stripe")), "at Stripe");
        assert_eq!(context_label(None), "in the market");
    }
}
