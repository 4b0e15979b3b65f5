//! Reallocation suggestions for a forecast shortage.
//!
//! Candidate source regions are split into three tiers and drained nearest
//! first, one tier after another, until the shortage is covered:
//!
//! 1. regions forecast at or above 95 % of their baseline give their surplus;
//! 2. for urgent shortages (주의 or worse), regions still classified 정상
//!    give 5 % of their baseline;
//! 3. for urgent shortages, 관심 regions give 3 % of their baseline.

use common::{BloodType, SupplySuggestion, SupplySuggestionResponse};
use tracing::{debug, instrument};

use crate::dataset::ForecastDataset;
use crate::distance;
use crate::error::{ComputeError, Result};
use crate::series::{classify, percent_change};

const SURPLUS_RATIO: f64 = 0.95;
const NORMAL_SHARE: f64 = 0.05;
const WATCH_SHARE: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    Surplus,
    Normal,
    Watch,
}

#[derive(Debug, Clone)]
struct Candidate<'a> {
    region: &'a str,
    distance: f64,
    available: f64,
    tier: Tier,
}

/// Rounds `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Computes the suggestion for a shortage of `blood_type` in `region`,
/// `month` months ahead.
#[instrument(skip(dataset))]
pub fn suggest(
    dataset: &ForecastDataset,
    region: &str,
    blood_type: BloodType,
    month: u8,
) -> Result<SupplySuggestionResponse> {
    let target = dataset.resolve(region, blood_type, month)?;
    let forecast_value = target.forecast(month).ok_or_else(|| ComputeError::NoData {
        region: region.to_string(),
        blood_type,
    })?;
    let baseline = target.baseline();
    let shortage = (baseline - forecast_value).max(0.0);

    let suggestions = if shortage > 0.0 {
        let urgent = classify(forecast_value, baseline).is_urgent();
        let candidates = candidates(dataset, region, blood_type, month, urgent);
        allocate(shortage, &candidates, blood_type)
    } else {
        Vec::new()
    };

    let total_suggested = round_to(suggestions.iter().map(|s| s.amount).sum(), 2);
    debug!(
        shortage,
        total_suggested,
        sources = suggestions.len(),
        "Computed supply suggestion"
    );

    Ok(SupplySuggestionResponse {
        region: region.to_string(),
        blood_type,
        month,
        forecast_value: round_to(forecast_value, 2),
        baseline: round_to(baseline, 2),
        shortage_amount: round_to(shortage, 2),
        suggestions,
        total_suggested,
    })
}

fn candidates<'a>(
    dataset: &'a ForecastDataset,
    target: &str,
    blood_type: BloodType,
    month: u8,
    urgent: bool,
) -> Vec<Candidate<'a>> {
    let mut out = Vec::new();

    for segment in dataset.segments() {
        if segment.blood_type != blood_type || segment.region == target {
            continue;
        }
        let Some(forecast) = segment.forecast(month) else {
            continue;
        };
        let baseline = segment.baseline();
        let Some(pct) = percent_change(forecast, baseline) else {
            continue;
        };
        if !distance::is_transfer_feasible(&segment.region, target) {
            continue;
        }
        let Some(km) = distance::distance(&segment.region, target) else {
            continue;
        };

        let (tier, available) = if forecast >= baseline * SURPLUS_RATIO {
            (Tier::Surplus, forecast - baseline)
        } else if urgent && pct >= -10.0 {
            (Tier::Normal, baseline * NORMAL_SHARE)
        } else if urgent && pct >= -20.0 {
            (Tier::Watch, baseline * WATCH_SHARE)
        } else {
            continue;
        };

        out.push(Candidate {
            region: &segment.region,
            distance: km,
            available,
            tier,
        });
    }

    // Stable: equal distances keep dataset order.
    out.sort_by(|a, b| a.tier.cmp(&b.tier).then(a.distance.total_cmp(&b.distance)));
    out
}

fn allocate(shortage: f64, candidates: &[Candidate<'_>], blood_type: BloodType) -> Vec<SupplySuggestion> {
    let mut remaining = shortage;
    let mut out = Vec::new();

    for candidate in candidates {
        if remaining <= 0.0 {
            break;
        }
        let amount = remaining.min(candidate.available);
        if amount <= 0.0 {
            continue;
        }
        remaining -= amount;
        out.push(SupplySuggestion {
            source_region: candidate.region.to_string(),
            distance: round_to(candidate.distance, 1),
            amount: round_to(amount, 2),
            blood_type,
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::SupplyView;
    use proptest::prelude::*;

    fn dataset(rows: &[(&str, f64, f64)]) -> ForecastDataset {
        let series: Vec<String> = rows
            .iter()
            .map(|(region, baseline, forecast)| {
                format!(
                    r#"{{"region":"{}","bloodType":"O","history":[{}],"forecasts":[{}]}}"#,
                    region, baseline, forecast
                )
            })
            .collect();
        let json = format!(r#"{{"lastDate":"2024-12-01","series":[{}]}}"#, series.join(","));
        ForecastDataset::from_json_str(&json).unwrap()
    }

    #[test]
    fn test_no_shortage_yields_empty_list() {
        let data = dataset(&[("부산", 100.0, 100.0), ("울산", 100.0, 200.0)]);

        let response = suggest(&data, "부산", BloodType::O, 1).unwrap();

        assert_eq!(response.shortage_amount, 0.0);
        assert!(response.suggestions.is_empty());
        assert_eq!(SupplyView::of(&response), SupplyView::Empty);
    }

    #[test]
    fn test_surplus_regions_nearest_first() {
        // 부산 is 심각 (-50%), needs 50.
        let data = dataset(&[
            ("부산", 100.0, 50.0),
            ("서울중앙", 100.0, 200.0),
            ("경남", 100.0, 120.0),
            ("울산", 100.0, 110.0),
        ]);

        let response = suggest(&data, "부산", BloodType::O, 1).unwrap();
        let sources: Vec<(&str, f64)> = response
            .suggestions
            .iter()
            .map(|s| (s.source_region.as_str(), s.amount))
            .collect();

        assert_eq!(sources, vec![("울산", 10.0), ("경남", 20.0), ("서울중앙", 20.0)]);
        assert_eq!(response.shortage_amount, 50.0);
        assert_eq!(response.total_suggested, 50.0);
        assert_eq!(response.suggestions[0].distance, 30.0);
    }

    #[test]
    fn test_urgent_shortage_draws_on_lower_tiers() {
        // 부산 is 주의 (-25%). 울산 is 정상 (-8%), 경남 is 관심 (-15%).
        let data = dataset(&[
            ("부산", 100.0, 75.0),
            ("울산", 200.0, 184.0),
            ("경남", 100.0, 85.0),
            ("대구.경북", 100.0, 99.0),
        ]);

        let response = suggest(&data, "부산", BloodType::O, 1).unwrap();
        let sources: Vec<(&str, f64)> = response
            .suggestions
            .iter()
            .map(|s| (s.source_region.as_str(), s.amount))
            .collect();

        // 대구.경북 is tier 1 (>= 95%) but has no surplus; it still counts
        // as a surplus candidate and contributes nothing.
        assert_eq!(sources, vec![("울산", 10.0), ("경남", 3.0)]);
        assert_eq!(response.total_suggested, 13.0);
        assert_eq!(
            SupplyView::of(&response),
            SupplyView::Ready { partial: Some(52) }
        );
    }

    #[test]
    fn test_watch_level_shortage_uses_surplus_only() {
        // 부산 is 관심 (-15%): not urgent.
        let data = dataset(&[("부산", 100.0, 85.0), ("울산", 100.0, 95.0)]);

        let response = suggest(&data, "부산", BloodType::O, 1).unwrap();

        assert!(response.suggestions.is_empty());
        assert_eq!(response.shortage_amount, 15.0);
    }

    #[test]
    fn test_jeju_never_supplies() {
        let data = dataset(&[("부산", 100.0, 50.0), ("제    주", 100.0, 300.0)]);

        let response = suggest(&data, "부산", BloodType::O, 1).unwrap();

        assert!(response.suggestions.is_empty());
    }

    #[test]
    fn test_missing_forecast_is_no_data() {
        let json = r#"{"lastDate":"2024-12-01","series":[
            {"region":"부산","bloodType":"O","history":[100],"forecasts":[90]}]}"#;
        let data = ForecastDataset::from_json_str(json).unwrap();

        assert!(matches!(
            suggest(&data, "부산", BloodType::O, 2),
            Err(ComputeError::NoData { .. })
        ));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(152.25, 1), 152.3);
        assert_eq!(round_to(-0.004, 2), -0.0);
    }

    proptest! {
        #[test]
        fn prop_total_matches_listed_amounts(
            values in prop::collection::vec((1.0f64..500.0, 0.0f64..700.0), 12)
        ) {
            let regions = &distance::REGIONS[..12];
            let rows: Vec<(&str, f64, f64)> = regions
                .iter()
                .zip(values.iter())
                .map(|(r, (b, f))| (*r, *b, *f))
                .collect();
            let data = dataset(&rows);

            for region in regions {
                let response = suggest(&data, region, BloodType::O, 1).unwrap();
                let listed: f64 = response.suggestions.iter().map(|s| s.amount).sum();

                prop_assert!(response.suggestions.iter().all(|s| s.amount > 0.0));
                prop_assert!(response.shortage_amount >= 0.0);
                prop_assert!((response.total_suggested - round_to(listed, 2)).abs() < 1e-9);
                prop_assert!(response.total_suggested <= response.shortage_amount + 0.01 * (response.suggestions.len() + 1) as f64);
                prop_assert!(response.suggestions.iter().all(|s| s.source_region != *region));
            }
        }
    }
}
