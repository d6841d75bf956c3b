use serde::Serialize;

use crate::compensation::company::{company_position, CompanyAdjustment, CompanyTier};
use crate::compensation::distribution::DistributionSummary;
use crate::compensation::format::{format_currency, round_to};
use crate::compensation::positioning::{position, Band};
use crate::compensation::recommendation::{context_label, recommend, Recommendation};

/// Salary comparison as returned by `POST /api/salary/compare`.
///
/// Displayed anchors and `percentile_rank` are employer-scaled when a company
/// overlay applies. `market_percentile` is always against raw market anchors.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub your_salary: f64,
    pub median_salary: f64,
    pub average_salary: f64,
    pub p25_salary: f64,
    pub p75_salary: f64,
    pub p90_salary: f64,
    pub percentile_rank: u8,
    pub market_percentile: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_percentile: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empirical_percentile: Option<f64>,
    pub gap_amount: f64,
    pub gap_percentage: f64,
    pub sample_size: u64,
    pub band: Band,
    pub recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_insights: Option<CompanyInsights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_reference: Option<MarketReference>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyInsights {
    pub company_name: String,
    pub pay_tier: CompanyTier,
    pub market_position: String,
    pub typical_range: String,
    pub note: String,
}

/// Unscaled market anchors shown next to employer-scaled figures.
#[derive(Debug, Clone, Serialize)]
pub struct MarketReference {
    pub market_median: f64,
    pub market_p25: f64,
    pub market_p75: f64,
    pub market_p90: f64,
}

pub fn compare(
    salary: f64,
    market: &DistributionSummary,
    company: Option<CompanyAdjustment>,
    empirical_percentile: Option<f64>,
) -> Comparison {
    let (shown, effective, within_market, company_percentile, insights) = match company {
        Some(adjustment) => {
            let scaled = company_position(salary, market, adjustment);
            let insights = company_insights(&scaled.adjustment, &scaled.company_distribution);
            let company_percentile = scaled.within_company.percentile;
            (
                scaled.company_distribution,
                scaled.within_company,
                scaled.within_market,
                Some(company_percentile),
                Some(insights),
            )
        }
        None => {
            let within_market = position(salary, market);
            (market.clone(), within_market.clone(), within_market, None, None)
        }
    };

    let label = context_label(company.map(|c| c.display_name));
    let recommendation = recommend(effective.band, &label, salary, shown.median);

    Comparison {
        your_salary: salary,
        median_salary: shown.median.round(),
        average_salary: shown.mean.round(),
        p25_salary: shown.p25.round(),
        p75_salary: shown.p75.round(),
        p90_salary: shown.p90.round(),
        percentile_rank: effective.percentile,
        market_percentile: within_market.percentile,
        company_percentile,
        empirical_percentile: empirical_percentile.map(|p| round_to(p, 1)),
        gap_amount: round_to(effective.gap_amount, 2),
        gap_percentage: round_to(effective.gap_percent, 1),
        sample_size: shown.sample_size,
        band: effective.band,
        recommendation,
        market_reference: company.map(|_| MarketReference {
            market_median: market.median.round(),
            market_p25: market.p25.round(),
            market_p75: market.p75.round(),
            market_p90: market.p90.round(),
        }),
        company_insights: insights,
    }
}

fn company_insights(adjustment: &CompanyAdjustment, scaled: &DistributionSummary) -> CompanyInsights {
    let stance = if adjustment.pays_above_market() {
        "above"
    } else {
        "at or near"
    };
    CompanyInsights {
        company_name: adjustment.display_name.to_string(),
        pay_tier: adjustment.tier,
        market_position: adjustment.market_position(),
        typical_range: format!(
            "{} - {}",
            format_currency(scaled.p25.trunc()),
            format_currency(scaled.p90.trunc())
        ),
        note: format!(
            "{} typically pays {stance} market rates",
            adjustment.display_name
        ),
    }
}
