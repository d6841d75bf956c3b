use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Errors raised while building or positioning against a distribution.
#[derive(Debug, Error, PartialEq)]
pub enum PositioningError {
    #[error("insufficient data: {sample_size} samples")]
    InsufficientData { sample_size: u64 },

    #[error("distribution anchors out of order: p25={p25}, median={median}, p75={p75}, p90={p90}")]
    NonMonotonicAnchors {
        p25: f64,
        median: f64,
        p75: f64,
        p90: f64,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Aggregated statistical snapshot of a peer population.
///
/// Always built through [`DistributionSummary::new`] or the row conversion so
/// that `p25 <= median <= p75 <= p90` holds for every value in circulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub sample_size: u64,
    pub mean: f64,
    pub median: f64,
    pub p25: f64,
    pub p75: f64,
    pub p90: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub stddev: Option<f64>,
}

impl DistributionSummary {
    pub fn new(
        sample_size: u64,
        mean: f64,
        median: f64,
        p25: f64,
        p75: f64,
        p90: f64,
    ) -> Result<Self, PositioningError> {
        if sample_size == 0 {
            return Err(PositioningError::InsufficientData { sample_size });
        }
        let anchors = [p25, median, p75, p90];
        let ordered = anchors.iter().all(|a| a.is_finite())
            && anchors.windows(2).all(|pair| pair[0] <= pair[1]);
        if !ordered {
            return Err(PositioningError::NonMonotonicAnchors {
                p25,
                median,
                p75,
                p90,
            });
        }
        Ok(Self {
            sample_size,
            mean,
            median,
            p25,
            p75,
            p90,
            min: None,
            max: None,
            stddev: None,
        })
    }

    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_stddev(mut self, stddev: Option<f64>) -> Self {
        self.stddev = stddev;
        self
    }

    /// Returns a copy with every anchor multiplied by `multiplier`.
    /// A positive multiplier preserves anchor ordering.
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self {
            sample_size: self.sample_size,
            mean: self.mean * multiplier,
            median: self.median * multiplier,
            p25: self.p25 * multiplier,
            p75: self.p75 * multiplier,
            p90: self.p90 * multiplier,
            min: self.min.map(|v| v * multiplier),
            max: self.max.map(|v| v * multiplier),
            stddev: self.stddev.map(|v| v * multiplier),
        }
    }

    /// Anchors rounded to whole currency units.
    pub fn rounded(&self) -> Self {
        Self {
            sample_size: self.sample_size,
            mean: self.mean.round(),
            median: self.median.round(),
            p25: self.p25.round(),
            p75: self.p75.round(),
            p90: self.p90.round(),
            min: self.min.map(f64::round),
            max: self.max.map(f64::round),
            stddev: self.stddev,
        }
    }
}

/// Raw aggregation row. Every statistic is NULL when no rows matched.
#[derive(Debug, Clone, Deserialize, FromRow)]
pub struct DistributionRow {
    pub sample_size: i64,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub p25: Option<f64>,
    pub p75: Option<f64>,
    pub p90: Option<f64>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub stddev: Option<f64>,
}

impl TryFrom<DistributionRow> for DistributionSummary {
    type Error = PositioningError;

    fn try_from(row: DistributionRow) -> Result<Self, Self::Error> {
        let sample_size = u64::try_from(row.sample_size).unwrap_or(0);
        match (row.mean, row.median, row.p25, row.p75, row.p90) {
            (Some(mean), Some(median), Some(p25), Some(p75), Some(p90)) => {
                Ok(DistributionSummary::new(sample_size, mean, median, p25, p75, p90)?
                    .with_range(row.min_salary, row.max_salary)
                    .with_stddev(row.stddev))
            }
            _ => Err(PositioningError::InsufficientData { sample_size }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(sample_size: i64, median: Option<f64>) -> DistributionRow {
        DistributionRow {
            sample_size,
            mean: Some(95_000.0),
            median,
            p25: Some(70_000.0),
            p75: Some(115_000.0),
            p90: Some(140_000.0),
            min_salary: Some(50_000.0),
            max_salary: Some(200_000.0),
            stddev: Some(25_000.0),
        }
    }

    #[test]
    fn test_rejects_empty_sample() {
        let err = DistributionSummary::new(0, 1.0, 1.0, 1.0, 1.0, 1.0).unwrap_err();
        assert_eq!(err, PositioningError::InsufficientData { sample_size: 0 });
    }

    #[test]
    fn test_rejects_out_of_order_anchors() {
        let err =
            DistributionSummary::new(10, 90_000.0, 90_000.0, 95_000.0, 115_000.0, 140_000.0)
                .unwrap_err();
        assert!(matches!(err, PositioningError::NonMonotonicAnchors { .. }));
    }

    #[test]
    fn test_rejects_nan_anchor() {
        let err = DistributionSummary::new(10, 1.0, f64::NAN, 1.0, 2.0, 3.0).unwrap_err();
        assert!(matches!(err, PositioningError::NonMonotonicAnchors { .. }));
    }

    #[test]
    fn test_accepts_flat_distribution() {
        assert!(DistributionSummary::new(3, 50_000.0, 50_000.0, 50_000.0, 50_000.0, 50_000.0).is_ok());
    }

    #[test]
    fn test_scaled_multiplies_every_anchor() {
        let dist = DistributionSummary::new(100, 95_000.0, 90_000.0, 70_000.0, 115_000.0, 140_000.0)
            .unwrap()
            .scaled(2.0);
        assert_eq!(dist.median, 180_000.0);
        assert_eq!(dist.p25, 140_000.0);
        assert_eq!(dist.p75, 230_000.0);
        assert_eq!(dist.p90, 280_000.0);
        assert_eq!(dist.mean, 190_000.0);
        assert_eq!(dist.sample_size, 100);
    }

    #[test]
    fn test_row_with_null_anchor_is_insufficient() {
        let err = DistributionSummary::try_from(row(0, None)).unwrap_err();
        assert_eq!(err, PositioningError::InsufficientData { sample_size: 0 });
    }

    #[test]
    fn test_row_conversion_keeps_range() {
        let dist = DistributionSummary::try_from(row(42, Some(90_000.0))).unwrap();
        assert_eq!(dist.sample_size, 42);
        assert_eq!(dist.min, Some(50_000.0));
        assert_eq!(dist.max, Some(200_000.0));
        assert_eq!(dist.stddev, Some(25_000.0));
    }

    #[test]
    fn test_rounded_drops_fractions() {
        let dist = DistributionSummary::new(5, 95_000.4, 90_000.6, 70_000.2, 115_000.5, 140_000.0)
            .unwrap()
            .rounded();
        assert_eq!(dist.median, 90_001.0);
        assert_eq!(dist.p25, 70_000.0);
        assert_eq!(dist.p75, 115_001.0);
    }
}
