use crate::forecast::BloodType;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /api/supply-suggestion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplySuggestionRequest {
    #[serde(alias = "shortageRegion")]
    #[schema(example = "부산")]
    pub region: String,
    pub blood_type: BloodType,
    #[schema(example = 1)]
    pub month: u8,
}

/// One proposed transfer into the shortage region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplySuggestion {
    pub source_region: String,
    /// Road distance in km
    pub distance: f64,
    pub amount: f64,
    pub blood_type: BloodType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplySuggestionResponse {
    pub region: String,
    pub blood_type: BloodType,
    pub month: u8,
    pub forecast_value: f64,
    pub baseline: f64,
    /// Shortfall against the baseline, never negative
    pub shortage_amount: f64,
    /// Ordered nearest source first within each availability tier
    pub suggestions: Vec<SupplySuggestion>,
    /// Sum of the listed amounts
    pub total_suggested: f64,
}

impl SupplySuggestionResponse {
    pub fn is_partial(&self) -> bool {
        self.total_suggested < self.shortage_amount
    }
}

/// Highest percentage shown for a partial fulfillment.
pub const PARTIAL_PERCENT_CAP: u32 = 99;

/// Share of `shortage` covered by `suggested`, rounded to a whole percent.
pub fn fulfillment_percent(shortage: f64, suggested: f64) -> u32 {
    if shortage <= 0.0 {
        return 100;
    }
    let percent = (suggested / shortage * 100.0).round();
    percent.clamp(0.0, f64::from(u32::MAX)) as u32
}

/// How the suggestion viewer should present a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyView {
    /// No source region can spare units.
    Empty,
    /// `partial` carries the fulfillment percentage when the listed amounts
    /// fall short of the shortage.
    Ready { partial: Option<u32> },
}

impl SupplyView {
    pub fn of(response: &SupplySuggestionResponse) -> Self {
        if response.suggestions.is_empty() {
            return SupplyView::Empty;
        }

        // A partial result never reads as 100%.
        let partial = response.is_partial().then(|| {
            fulfillment_percent(response.shortage_amount, response.total_suggested)
                .min(PARTIAL_PERCENT_CAP)
        });

        SupplyView::Ready { partial }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(shortage: f64, amounts: &[f64]) -> SupplySuggestionResponse {
        let suggestions: Vec<SupplySuggestion> = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| SupplySuggestion {
                source_region: format!("region-{}", i),
                distance: 50.0 * (i as f64 + 1.0),
                amount: *amount,
                blood_type: BloodType::O,
            })
            .collect();
        SupplySuggestionResponse {
            region: "부산".to_string(),
            blood_type: BloodType::O,
            month: 1,
            forecast_value: 900.0,
            baseline: 900.0 + shortage,
            shortage_amount: shortage,
            total_suggested: amounts.iter().sum(),
            suggestions,
        }
    }

    #[test]
    fn test_fulfillment_percent() {
        assert_eq!(fulfillment_percent(100.0, 60.0), 60);
        assert_eq!(fulfillment_percent(3.0, 2.0), 67);
        assert_eq!(fulfillment_percent(0.0, 0.0), 100);
    }

    #[test]
    fn test_partial_fulfillment_view() {
        let view = SupplyView::of(&response(100.0, &[40.0, 20.0]));
        assert_eq!(view, SupplyView::Ready { partial: Some(60) });
    }

    #[test]
    fn test_near_complete_partial_view_stays_below_100() {
        let view = SupplyView::of(&response(100.0, &[80.0, 19.6]));
        assert_eq!(view, SupplyView::Ready { partial: Some(99) });
    }

    #[test]
    fn test_zero_shortage_view_is_not_partial() {
        let view = SupplyView::of(&response(0.0, &[]));
        assert_eq!(view, SupplyView::Empty);
        let view = SupplyView::of(&response(0.0, &[10.0]));
        assert_eq!(view, SupplyView::Ready { partial: None });
    }

    #[test]
    fn test_full_fulfillment_view() {
        let view = SupplyView::of(&response(100.0, &[70.0, 30.0]));
        assert_eq!(view, SupplyView::Ready { partial: None });
    }

    #[test]
    fn test_empty_suggestions_is_empty_state() {
        let view = SupplyView::of(&response(100.0, &[]));
        assert_eq!(view, SupplyView::Empty);
    }

    #[test]
    fn test_request_accepts_shortage_region_alias() {
        let json = r#"{"shortageRegion":"울산","bloodType":"B","month":3}"#;
        let request: SupplySuggestionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.region, "울산");
        assert_eq!(request.month, 3);
    }
}
