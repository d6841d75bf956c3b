//! Employer pay overlays.
//!
//! Multipliers are relative to the market median (1.0 = market average) and
//! are applied to every distribution anchor before positioning.

use serde::Serialize;

use crate::compensation::distribution::DistributionSummary;
use crate::compensation::positioning::{position, PositionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyTier {
    Top,
    High,
    Mid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompanyAdjustment {
    pub multiplier: f64,
    pub display_name: &'static str,
    pub tier: CompanyTier,
}

const fn company(multiplier: f64, display_name: &'static str, tier: CompanyTier) -> CompanyAdjustment {
    CompanyAdjustment {
        multiplier,
        display_name,
        tier,
    }
}

use CompanyTier::{High, Mid, Top};

/// Lookup order matters: partial matches resolve to the first hit.
static COMPANIES: &[(&str, CompanyAdjustment)] = &[
    // Big tech
    ("google", company(1.45, "Google", Top)),
    ("meta", company(1.50, "Meta", Top)),
    ("facebook", company(1.50, "Meta", Top)),
    ("apple", company(1.35, "Apple", Top)),
    ("amazon", company(1.25, "Amazon", Top)),
    ("netflix", company(1.60, "Netflix", Top)),
    ("microsoft", company(1.30, "Microsoft", Top)),
    // High-paying tech
    ("stripe", company(1.55, "Stripe", Top)),
    ("airbnb", company(1.40, "Airbnb", Top)),
    ("uber", company(1.30, "Uber", Top)),
    ("lyft", company(1.20, "Lyft", High)),
    ("doordash", company(1.25, "DoorDash", High)),
    ("coinbase", company(1.45, "Coinbase", Top)),
    ("robinhood", company(1.35, "Robinhood", High)),
    ("databricks", company(1.50, "Databricks", Top)),
    ("snowflake", company(1.45, "Snowflake", Top)),
    ("palantir", company(1.35, "Palantir", High)),
    ("splunk", company(1.25, "Splunk", High)),
    // Enterprise
    ("salesforce", company(1.25, "Salesforce", High)),
    ("oracle", company(1.10, "Oracle", Mid)),
    ("ibm", company(1.00, "IBM", Mid)),
    ("cisco", company(1.15, "Cisco", Mid)),
    ("vmware", company(1.20, "VMware", High)),
    ("adobe", company(1.30, "Adobe", High)),
    ("intuit", company(1.25, "Intuit", High)),
    ("servicenow", company(1.30, "ServiceNow", High)),
    ("workday", company(1.25, "Workday", High)),
    // Finance
    ("jpmorgan", company(1.20, "JPMorgan Chase", High)),
    ("goldman sachs", company(1.35, "Goldman Sachs", Top)),
    ("morgan stanley", company(1.30, "Morgan Stanley", High)),
    ("capital one", company(1.15, "Capital One", Mid)),
    ("american express", company(1.15, "American Express", Mid)),
    ("visa", company(1.25, "Visa", High)),
    ("mastercard", company(1.25, "Mastercard", High)),
    ("paypal", company(1.20, "PayPal", High)),
    ("square", company(1.30, "Block (Square)", High)),
    ("block", company(1.30, "Block", High)),
    // Retail and e-commerce
    ("walmart", company(0.95, "Walmart", Mid)),
    ("target", company(0.95, "Target", Mid)),
    ("costco", company(1.05, "Costco", Mid)),
    ("shopify", company(1.25, "Shopify", High)),
    ("ebay", company(1.15, "eBay", Mid)),
    ("etsy", company(1.15, "Etsy", Mid)),
    // Healthcare
    ("unitedhealth", company(1.10, "UnitedHealth", Mid)),
    ("cvs", company(0.95, "CVS Health", Mid)),
    ("pfizer", company(1.15, "Pfizer", Mid)),
    ("johnson & johnson", company(1.20, "Johnson & Johnson", High)),
    // Consulting
    ("mckinsey", company(1.40, "McKinsey", Top)),
    ("bain", company(1.35, "Bain & Company", Top)),
    ("bcg", company(1.35, "BCG", Top)),
    ("deloitte", company(1.10, "Deloitte", Mid)),
    ("accenture", company(1.05, "Accenture", Mid)),
    ("pwc", company(1.05, "PwC", Mid)),
    ("kpmg", company(1.05, "KPMG", Mid)),
    ("ey", company(1.05, "EY", Mid)),
    // Growth stage
    ("openai", company(1.55, "OpenAI", Top)),
    ("anthropic", company(1.50, "Anthropic", Top)),
    ("figma", company(1.40, "Figma", Top)),
    ("notion", company(1.30, "Notion", High)),
    ("discord", company(1.30, "Discord", High)),
    ("slack", company(1.25, "Slack", High)),
    ("zoom", company(1.20, "Zoom", High)),
    ("twilio", company(1.25, "Twilio", High)),
    ("datadog", company(1.35, "Datadog", High)),
    ("mongodb", company(1.30, "MongoDB", High)),
    // Hardware and gaming
    ("nvidia", company(1.40, "NVIDIA", Top)),
    ("amd", company(1.20, "AMD", High)),
    ("intel", company(1.15, "Intel", Mid)),
    ("ea", company(1.15, "Electronic Arts", Mid)),
    ("activision", company(1.10, "Activision Blizzard", Mid)),
    ("riot games", company(1.25, "Riot Games", High)),
    ("epic games", company(1.30, "Epic Games", High)),
    // Telecom
    ("verizon", company(1.05, "Verizon", Mid)),
    ("at&t", company(1.00, "AT&T", Mid)),
    ("t-mobile", company(1.05, "T-Mobile", Mid)),
];

/// Resolves a free-form employer name ("Google Inc", " META ") to its overlay.
pub fn lookup_company(name: &str) -> Option<CompanyAdjustment> {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if let Some((_, adjustment)) = COMPANIES.iter().find(|(key, _)| *key == normalized) {
        return Some(*adjustment);
    }

    COMPANIES
        .iter()
        .find(|(key, adjustment)| {
            let display = adjustment.display_name.to_lowercase();
            normalized.contains(key)
                || key.contains(normalized.as_str())
                || normalized.contains(&display)
                || display.contains(normalized.as_str())
        })
        .map(|(_, adjustment)| *adjustment)
}

impl CompanyAdjustment {
    /// Signed percentage relative to the market, e.g. `+45% vs market average`.
    /// Rounded to the nearest point, so `1.15` reads `+15%`.
    pub fn market_position(&self) -> String {
        let delta = ((self.multiplier - 1.0) * 100.0).round() as i64;
        format!("{delta:+}% vs market average")
    }

    pub fn pays_above_market(&self) -> bool {
        self.multiplier > 1.15
    }
}

/// Side-by-side positioning against market and employer-scaled anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyPosition {
    pub adjustment: CompanyAdjustment,
    pub company_distribution: DistributionSummary,
    pub within_company: PositionResult,
    pub within_market: PositionResult,
}

pub fn company_position(
    salary: f64,
    market: &DistributionSummary,
    adjustment: CompanyAdjustment,
) -> CompanyPosition {
    let company_distribution = market.scaled(adjustment.multiplier);
    CompanyPosition {
        within_company: position(salary, &company_distribution),
        within_market: position(salary, market),
        company_distribution,
        adjustment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compensation::positioning::Band;

    fn market() -> DistributionSummary {
        DistributionSummary::new(100, 95_000.0, 90_000.0, 70_000.0, 115_000.0, 140_000.0).unwrap()
    }

    #[test]
    fn test_exact_lookup_is_case_insensitive() {
        let google = lookup_company("  GOOGLE ").unwrap();
        assert_eq!(google.display_name, "Google");
        assert_eq!(google.tier, CompanyTier::Top);
        assert_eq!(google.multiplier, 1.45);
    }

    #[test]
    fn test_partial_lookup_matches_suffixed_names() {
        assert_eq!(lookup_company("Google Inc").unwrap().display_name, "Google");
        assert_eq!(lookup_company("Goldman").unwrap().display_name, "Goldman Sachs");
        assert_eq!(
            lookup_company("JPMorgan Chase & Co").unwrap().display_name,
            "JPMorgan Chase"
        );
    }

    #[test]
    fn test_alias_shares_display_name() {
        assert_eq!(lookup_company("facebook").unwrap().display_name, "Meta");
    }

    #[test]
    fn test_unknown_and_blank_names() {
        assert!(lookup_company("").is_none());
        assert!(lookup_company("   ").is_none());
        assert!(lookup_company("Zzyzx Widgets").is_none());
    }

    #[test]
    fn test_company_scaling_lowers_percentile() {
        let google = lookup_company("google").unwrap();
        let result = company_position(100_000.0, &market(), google);

        assert!((result.company_distribution.median - 130_500.0).abs() < 1e-6);
        assert_eq!(result.within_market.percentile, 60);
        assert_eq!(result.within_company.percentile, 24);
        assert!(result.within_company.percentile < result.within_market.percentile);
        assert_eq!(result.within_company.band, Band::BelowMarket);
        assert_eq!(result.within_market.band, Band::Competitive);
    }

    #[test]
    fn test_market_position_label() {
        assert_eq!(lookup_company("google").unwrap().market_position(), "+45% vs market average");
        assert_eq!(lookup_company("walmart").unwrap().market_position(), "-5% vs market average");
        assert_eq!(lookup_company("ibm").unwrap().market_position(), "+0% vs market average");
    }

    #[test]
    fn test_market_position_rounds_float_error() {
        // (1.15 - 1.0) * 100.0 is 14.999...
        assert_eq!(lookup_company("cisco").unwrap().market_position(), "+15% vs market average");
        assert_eq!(lookup_company("intel").unwrap().market_position(), "+15% vs market average");
    }

    #[test]
    fn test_pays_above_market_threshold() {
        assert!(lookup_company("stripe").unwrap().pays_above_market());
        assert!(!lookup_company("cisco").unwrap().pays_above_market());
    }
}
