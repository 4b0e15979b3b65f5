//! Severity ordering and horizon grouping for the dashboard.
//!
//! The dashboard shows one column per forecast horizon, each sorted worst
//! severity first. Sorting is stable so records with equal severity keep the
//! order the backend returned them in.

use crate::forecast::{FORECAST_HORIZONS, Severity, ShortageForecast};
use tracing::warn;

/// Rank assigned to severities outside the five known levels.
pub const UNKNOWN_SEVERITY_RANK: u8 = u8::MAX;

/// Lower rank means more severe.
pub fn severity_rank(severity: &Severity) -> u8 {
    match severity {
        Severity::Critical => 0,
        Severity::Warning => 1,
        Severity::Caution => 2,
        Severity::Watch => 3,
        Severity::Normal => 4,
        Severity::Unknown(_) => UNKNOWN_SEVERITY_RANK,
    }
}

/// Stable in-place sort, most severe first.
pub fn sort_by_severity(forecasts: &mut [ShortageForecast]) {
    forecasts.sort_by_key(|forecast| severity_rank(&forecast.severity));
}

/// Forecasts partitioned by horizon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HorizonGroups {
    buckets: [Vec<ShortageForecast>; 3],
    /// Records whose month is not a known horizon. Kept so nothing is dropped.
    pub out_of_range: Vec<ShortageForecast>,
}

impl HorizonGroups {
    /// Forecasts for `month`, most severe first. Empty for unknown horizons.
    pub fn month(&self, month: u8) -> &[ShortageForecast] {
        match month {
            1..=3 => &self.buckets[usize::from(month - 1)],
            _ => &[],
        }
    }

    /// `(month, forecasts)` for every horizon, in horizon order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[ShortageForecast])> {
        FORECAST_HORIZONS
            .into_iter()
            .map(move |month| (month, self.month(month)))
    }

    /// Total number of records, including out-of-range ones.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum::<usize>() + self.out_of_range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partitions `forecasts` by month and sorts each bucket by severity.
pub fn group_by_horizon(forecasts: &[ShortageForecast]) -> HorizonGroups {
    let mut groups = HorizonGroups::default();

    for forecast in forecasts {
        match forecast.month {
            1..=3 => groups.buckets[usize::from(forecast.month - 1)].push(forecast.clone()),
            other => {
                warn!(id = %forecast.id, month = other, "forecast outside known horizons");
                groups.out_of_range.push(forecast.clone());
            }
        }
    }

    for bucket in groups.buckets.iter_mut() {
        sort_by_severity(bucket);
    }

    groups
}

/// Number of forecasts per severity, worst first. Unknown labels are
/// aggregated into a single trailing entry when present.
pub fn severity_counts(forecasts: &[ShortageForecast]) -> Vec<(Severity, usize)> {
    let mut counts: Vec<(Severity, usize)> = Severity::KNOWN
        .into_iter()
        .map(|severity| {
            let count = forecasts.iter().filter(|f| f.severity == severity).count();
            (severity, count)
        })
        .collect();

    let unknown = forecasts
        .iter()
        .filter(|f| matches!(f.severity, Severity::Unknown(_)))
        .count();
    if unknown > 0 {
        counts.push((Severity::Unknown("기타".to_string()), unknown));
    }

    counts
}
