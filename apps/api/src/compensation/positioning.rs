//! Percentile positioning: places a salary inside a [`DistributionSummary`].
//!
//! Piecewise-linear interpolation between the known anchors:
//!
//! | salary range          | percentile range |
//! |-----------------------|------------------|
//! | `0 ..= p25`           | `0 ..= 25`       |
//! | `p25 ..= median`      | `25 ..= 50`      |
//! | `median ..= p75`      | `50 ..= 75`      |
//! | `p75 ..= p90`         | `75 ..= 90`      |
//! | above `p90`           | `90 ..= 99`      |
//!
//! A zero-width segment cannot be interpolated; it yields a fixed midpoint
//! constant instead and is logged as a data-quality signal.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::compensation::distribution::DistributionSummary;

pub const MIN_PERCENTILE: u8 = 1;
pub const MAX_PERCENTILE: u8 = 99;

const FALLBACK_BELOW_P25: f64 = 10.0;
const FALLBACK_P25_TO_MEDIAN: f64 = 37.0;
const FALLBACK_MEDIAN_TO_P75: f64 = 62.0;
const FALLBACK_P75_TO_P90: f64 = 82.0;
const FALLBACK_ABOVE_P90: f64 = 95.0;

/// Qualitative compensation position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    BelowMarket,
    BelowMedian,
    Competitive,
    AboveMarket,
}

impl Band {
    pub fn from_percentile(percentile: f64) -> Self {
        if percentile < 25.0 {
            Band::BelowMarket
        } else if percentile < 50.0 {
            Band::BelowMedian
        } else if percentile < 75.0 {
            Band::Competitive
        } else {
            Band::AboveMarket
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Band::BelowMarket => "below_market",
            Band::BelowMedian => "below_median",
            Band::Competitive => "competitive",
            Band::AboveMarket => "above_market",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionResult {
    pub percentile: u8,
    /// `median - salary`: positive when the salary trails the median.
    pub gap_amount: f64,
    /// `100 * (salary - median) / median`: negative when the salary trails the median.
    pub gap_percent: f64,
    pub band: Band,
}

pub fn position(salary: f64, dist: &DistributionSummary) -> PositionResult {
    let percentile = percentile_rank(salary, dist);
    let gap_percent = if dist.median > 0.0 {
        100.0 * (salary - dist.median) / dist.median
    } else {
        0.0
    };

    PositionResult {
        percentile,
        gap_amount: dist.median - salary,
        gap_percent,
        band: Band::from_percentile(f64::from(percentile)),
    }
}

/// Integer percentile estimate in `[1, 99]`.
pub fn percentile_rank(salary: f64, dist: &DistributionSummary) -> u8 {
    let raw = if salary <= dist.p25 {
        if dist.p25 > 0.0 {
            salary / dist.p25 * 25.0
        } else {
            degenerate("p25", FALLBACK_BELOW_P25)
        }
    } else if salary <= dist.median {
        interpolate(salary, dist.p25, dist.median, 25.0, 25.0)
            .unwrap_or_else(|| degenerate("p25..median", FALLBACK_P25_TO_MEDIAN))
    } else if salary <= dist.p75 {
        interpolate(salary, dist.median, dist.p75, 50.0, 25.0)
            .unwrap_or_else(|| degenerate("median..p75", FALLBACK_MEDIAN_TO_P75))
    } else if salary <= dist.p90 {
        interpolate(salary, dist.p75, dist.p90, 75.0, 15.0)
            .unwrap_or_else(|| degenerate("p75..p90", FALLBACK_P75_TO_P90))
    } else if dist.p90 > 0.0 {
        (90.0 + 10.0 * (salary - dist.p90) / dist.p90).min(f64::from(MAX_PERCENTILE))
    } else {
        degenerate("p90", FALLBACK_ABOVE_P90)
    };

    // `as` saturates, and NaN maps to 0 before the clamp.
    (raw.trunc() as i64).clamp(i64::from(MIN_PERCENTILE), i64::from(MAX_PERCENTILE)) as u8
}

fn interpolate(salary: f64, lower: f64, upper: f64, base: f64, span: f64) -> Option<f64> {
    let width = upper - lower;
    (width > 0.0).then(|| base + (salary - lower) / width * span)
}

fn degenerate(segment: &str, fallback: f64) -> f64 {
    warn!(segment, fallback, "Degenerate distribution segment, using fallback percentile");
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market() -> DistributionSummary {
        DistributionSummary::new(100, 95_000.0, 90_000.0, 70_000.0, 115_000.0, 140_000.0).unwrap()
    }

    #[test]
    fn test_anchor_boundaries_are_exact() {
        let dist = market();
        assert_eq!(percentile_rank(dist.p25, &dist), 25);
        assert_eq!(percentile_rank(dist.median, &dist), 50);
        assert_eq!(percentile_rank(dist.p75, &dist), 75);
        assert_eq!(percentile_rank(dist.p90, &dist), 90);
    }

    #[test]
    fn test_at_median_is_competitive_with_zero_gap() {
        let result = position(90_000.0, &market());
        assert_eq!(result.percentile, 50);
        assert_eq!(result.gap_amount, 0.0);
        assert_eq!(result.gap_percent, 0.0);
        assert_eq!(result.band, Band::Competitive);
    }

    #[test]
    fn test_below_p25_is_below_market() {
        let result = position(60_000.0, &market());
        // 60k / 70k * 25 = 21.4
        assert_eq!(result.percentile, 21);
        assert_eq!(result.band, Band::BelowMarket);
        assert_eq!(result.gap_amount, 30_000.0);
        assert!((result.gap_percent - (-100.0 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_interpolates_inside_each_segment() {
        let dist = market();
        // 25 + 10k/20k * 25 = 37.5
        assert_eq!(percentile_rank(80_000.0, &dist), 37);
        // 50 + 10k/25k * 25 = 60
        assert_eq!(percentile_rank(100_000.0, &dist), 60);
        // 75 + 12.5k/25k * 15 = 82.5
        assert_eq!(percentile_rank(127_500.0, &dist), 82);
        // 90 + 14k/140k * 10 = 91
        assert_eq!(percentile_rank(154_000.0, &dist), 91);
    }

    #[test]
    fn test_monotone_between_p25_and_median() {
        let dist = market();
        let mut previous = 0;
        let mut salary = dist.p25;
        while salary <= dist.median {
            let pct = percentile_rank(salary, &dist);
            assert!(pct >= previous, "percentile fell at salary {salary}");
            previous = pct;
            salary += 250.0;
        }
    }

    #[test]
    fn test_clamped_at_both_extremes() {
        let dist = market();
        assert_eq!(percentile_rank(0.0, &dist), 1);
        assert_eq!(percentile_rank(-5_000.0, &dist), 1);
        assert_eq!(percentile_rank(1.0, &dist), 1);
        assert_eq!(percentile_rank(10_000_000.0, &dist), 99);
        assert_eq!(percentile_rank(f64::INFINITY, &dist), 99);
    }

    #[test]
    fn test_zero_width_segments_use_fallbacks() {
        let flat = DistributionSummary::new(10, 80_000.0, 80_000.0, 80_000.0, 80_000.0, 80_000.0)
            .unwrap();
        // Exactly at every anchor lands in the first segment.
        assert_eq!(percentile_rank(80_000.0, &flat), 25);

        let squeezed =
            DistributionSummary::new(10, 80_000.0, 80_000.0, 60_000.0, 100_000.0, 100_000.0)
                .unwrap();
        // p75 == p90: the shared anchor is reached from the median segment.
        assert_eq!(percentile_rank(100_000.0, &squeezed), 75);
        assert_eq!(percentile_rank(110_000.0, &squeezed), 91);

        assert_eq!(interpolate(5.0, 5.0, 5.0, 25.0, 25.0), None);
    }

    #[test]
    fn test_zero_anchors_fall_back() {
        let zero = DistributionSummary::new(1, 0.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(percentile_rank(0.0, &zero), 10);
        assert_eq!(percentile_rank(50_000.0, &zero), 95);
        let result = position(50_000.0, &zero);
        assert_eq!(result.gap_percent, 0.0);
        assert_eq!(result.band, Band::AboveMarket);
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(Band::from_percentile(1.0), Band::BelowMarket);
        assert_eq!(Band::from_percentile(24.9), Band::BelowMarket);
        assert_eq!(Band::from_percentile(25.0), Band::BelowMedian);
        assert_eq!(Band::from_percentile(49.0), Band::BelowMedian);
        assert_eq!(Band::from_percentile(50.0), Band::Competitive);
        assert_eq!(Band::from_percentile(74.9), Band::Competitive);
        assert_eq!(Band::from_percentile(75.0), Band::AboveMarket);
        assert_eq!(Band::from_percentile(99.0), Band::AboveMarket);
    }

    #[test]
    fn test_band_serializes_snake_case() {
        let json = serde_json::to_string(&Band::BelowMedian).unwrap();
        assert_eq!(json, "\"below_median\"");
        assert_eq!(Band::AboveMarket.as_str(), "above_market");
    }
}
