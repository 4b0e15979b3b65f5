//! Per-segment donation series and severity classification.

use common::{BloodType, Severity};

/// Number of trailing months averaged into the baseline.
pub const BASELINE_WINDOW: usize = 12;

/// Monthly donation history and precomputed forecasts for one region and
/// blood type.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSeries {
    pub region: String,
    pub blood_type: BloodType,
    /// Monthly donation counts, oldest first. Never empty.
    pub history: Vec<f64>,
    /// Forecasts for one, two and three months ahead.
    pub forecasts: [Option<f64>; 3],
}

impl SegmentSeries {
    /// Mean of the last [`BASELINE_WINDOW`] months.
    pub fn baseline(&self) -> f64 {
        baseline(&self.history)
    }

    pub fn last_actual(&self) -> f64 {
        self.history.last().copied().unwrap_or_default()
    }

    /// Forecast for `month` months ahead, if one exists.
    pub fn forecast(&self, month: u8) -> Option<f64> {
        match month {
            1..=3 => self.forecasts[usize::from(month - 1)],
            _ => None,
        }
    }

    /// Severity of the forecast for `month`, if one exists.
    pub fn severity(&self, month: u8) -> Option<Severity> {
        self.forecast(month)
            .map(|forecast| classify(forecast, self.baseline()))
    }
}

/// Mean of the trailing [`BASELINE_WINDOW`] values, or of all values when
/// fewer are available. Zero for an empty history.
pub fn baseline(history: &[f64]) -> f64 {
    let window = &history[history.len().saturating_sub(BASELINE_WINDOW)..];
    if window.is_empty() {
        return 0.0;
    }
    window.iter().sum::<f64>() / window.len() as f64
}

/// Relative change of `forecast` against `baseline`, in percent.
pub fn percent_change(forecast: f64, baseline: f64) -> Option<f64> {
    (baseline > 0.0).then(|| (forecast - baseline) / baseline * 100.0)
}

/// Maps a forecast onto the five alert levels.
///
/// | change vs. baseline | level |
/// |---------------------|-------|
/// | ≥ −10 %             | 정상  |
/// | ≥ −20 %             | 관심  |
/// | ≥ −30 %             | 주의  |
/// | ≥ −40 %             | 경계  |
/// | below               | 심각  |
pub fn classify(forecast: f64, baseline: f64) -> Severity {
    let Some(pct) = percent_change(forecast, baseline) else {
        return Severity::Normal;
    };

    if pct >= -10.0 {
        Severity::Normal
    } else if pct >= -20.0 {
        Severity::Watch
    } else if pct >= -30.0 {
        Severity::Caution
    } else if pct >= -40.0 {
        Severity::Warning
    } else {
        Severity::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_uses_last_twelve_months() {
        let mut history = vec![1000.0; 6];
        history.extend(vec![100.0; 12]);

        assert_eq!(baseline(&history), 100.0);
    }

    #[test]
    fn test_baseline_with_short_history() {
        assert_eq!(baseline(&[10.0, 20.0, 30.0]), 20.0);
        assert_eq!(baseline(&[]), 0.0);
    }

    #[test]
    fn test_classification_thresholds() {
        let base = 100.0;
        assert_eq!(classify(120.0, base), Severity::Normal);
        assert_eq!(classify(90.0, base), Severity::Normal);
        assert_eq!(classify(89.9, base), Severity::Watch);
        assert_eq!(classify(80.0, base), Severity::Watch);
        assert_eq!(classify(75.0, base), Severity::Caution);
        assert_eq!(classify(70.0, base), Severity::Caution);
        assert_eq!(classify(65.0, base), Severity::Warning);
        assert_eq!(classify(60.0, base), Severity::Warning);
        assert_eq!(classify(59.9, base), Severity::Critical);
    }

    #[test]
    fn test_zero_baseline_is_normal() {
        assert_eq!(classify(0.0, 0.0), Severity::Normal);
        assert_eq!(percent_change(10.0, 0.0), None);
    }

    #[test]
    fn test_segment_accessors() {
        let series = SegmentSeries {
            region: "부산".to_string(),
            blood_type: BloodType::A,
            history: vec![100.0, 100.0, 120.0],
            forecasts: [Some(70.0), None, Some(110.0)],
        };

        assert_eq!(series.last_actual(), 120.0);
        assert_eq!(series.forecast(2), None);
        assert_eq!(series.forecast(4), None);
        assert_eq!(series.severity(1), Some(Severity::Warning));
        assert_eq!(series.severity(3), Some(Severity::Normal));
    }
}
