//! Comparison of a GA result with a known optimum.

use std::fmt;

/// Gap between a found cost and a reference cost.
///
/// `gap_percent = (found - optimal) / optimal × 100`. A non-positive
/// optimum makes the percentage meaningless; it is then left out while
/// the absolute difference is kept.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GapReport {
    pub found: i64,
    pub optimal: Option<i64>,
    pub difference: Option<i64>,
    pub gap_percent: Option<f64>,
}

impl GapReport {
    /// Builds the report. `optimal` is `None` when no reference exists.
    ///
    /// ```
    /// use qap_ga::GapReport;
    ///
    /// let report = GapReport::new(110, Some(100));
    /// assert_eq!(report.difference, Some(10));
    /// assert_eq!(report.gap_percent, Some(10.0));
    /// ```
    pub fn new(found: i64, optimal: Option<i64>) -> Self {
        let Some(opt) = optimal else {
            return Self {
                found,
                optimal: None,
                difference: None,
                gap_percent: None,
            };
        };

        let difference = found - opt;
        let gap_percent = if opt > 0 {
            Some(difference as f64 / opt as f64 * 100.0)
        } else {
            tracing::warn!(optimal = opt, "non-positive optimal cost, gap not computed");
            None
        };

        Self {
            found,
            optimal: Some(opt),
            difference: Some(difference),
            gap_percent,
        }
    }
}

impl fmt::Display for GapReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cost={}", self.found)?;
        match self.optimal {
            Some(opt) => write!(f, " | optimal={opt}")?,
            None => write!(f, " | optimal=N/A")?,
        }
        if let Some(diff) = self.difference {
            write!(f, " | diff={diff}")?;
        }
        match self.gap_percent {
            Some(gap) => write!(f, " | gap={gap:.2}%"),
            None => write!(f, " | gap=N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_with_reference() {
        let r = GapReport::new(9800, Some(9552));
        assert_eq!(r.difference, Some(248));
        let gap = r.gap_percent.unwrap();
        assert!((gap - 2.596_314).abs() < 1e-5, "gap = {gap}");
        assert_eq!(r.to_string(), "cost=9800 | optimal=9552 | diff=248 | gap=2.60%");
    }

    #[test]
    fn test_optimum_reached() {
        let r = GapReport::new(20, Some(20));
        assert_eq!(r.difference, Some(0));
        assert_eq!(r.gap_percent, Some(0.0));
    }

    #[test]
    fn test_zero_optimal_skips_gap() {
        let r = GapReport::new(15, Some(0));
        assert_eq!(r.difference, Some(15));
        assert_eq!(r.gap_percent, None);
        assert_eq!(r.to_string(), "cost=15 | optimal=0 | diff=15 | gap=N/A");
    }

    #[test]
    fn test_no_reference() {
        let r = GapReport::new(15, None);
        assert_eq!(r.optimal, None);
        assert_eq!(r.difference, None);
        assert_eq!(r.gap_percent, None);
        assert_eq!(r.to_string(), "cost=15 | optimal=N/A | gap=N/A");
    }
}
