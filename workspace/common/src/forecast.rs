use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Forecast horizons (months ahead) produced by the backend.
pub const FORECAST_HORIZONS: [u8; 3] = [1, 2, 3];

/// Returns true when `month` is one of the supported forecast horizons.
pub fn is_valid_horizon(month: u8) -> bool {
    FORECAST_HORIZONS.contains(&month)
}

/// ABO blood group of a forecast segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum BloodType {
    A,
    AB,
    B,
    O,
}

impl BloodType {
    pub const ALL: [BloodType; 4] = [BloodType::A, BloodType::B, BloodType::AB, BloodType::O];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodType::A => "A",
            BloodType::AB => "AB",
            BloodType::B => "B",
            BloodType::O => "O",
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blood type: {0}")]
pub struct UnknownBloodType(pub String);

impl FromStr for BloodType {
    type Err = UnknownBloodType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(BloodType::A),
            "AB" => Ok(BloodType::AB),
            "B" => Ok(BloodType::B),
            "O" => Ok(BloodType::O),
            _ => Err(UnknownBloodType(s.to_string())),
        }
    }
}

/// Shortage alert level.
///
/// Known levels serialize to their Korean labels. Any other label coming over
/// the wire is kept verbatim in `Unknown` instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    /// 정상
    Normal,
    /// 관심
    Watch,
    /// 주의
    Caution,
    /// 경계
    Warning,
    /// 심각
    Critical,
    Unknown(String),
}

impl Severity {
    /// Known levels, worst first.
    pub const KNOWN: [Severity; 5] = [
        Severity::Critical,
        Severity::Warning,
        Severity::Caution,
        Severity::Watch,
        Severity::Normal,
    ];

    pub fn label(&self) -> &str {
        match self {
            Severity::Normal => "정상",
            Severity::Watch => "관심",
            Severity::Caution => "주의",
            Severity::Warning => "경계",
            Severity::Critical => "심각",
            Severity::Unknown(label) => label,
        }
    }

    pub fn english(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Watch => "watch",
            Severity::Caution => "caution",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
            Severity::Unknown(_) => "unknown",
        }
    }

    /// 주의 or worse. Used to widen the pool of supply sources.
    pub fn is_urgent(&self) -> bool {
        matches!(self, Severity::Caution | Severity::Warning | Severity::Critical)
    }
}

impl From<String> for Severity {
    fn from(label: String) -> Self {
        match label.trim() {
            "정상" => Severity::Normal,
            "관심" => Severity::Watch,
            "주의" => Severity::Caution,
            "경계" => Severity::Warning,
            "심각" => Severity::Critical,
            _ => Severity::Unknown(label),
        }
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Unknown(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A predicted shortage for one region, blood type and horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShortageForecast {
    #[schema(example = "서울중앙_A_1")]
    pub id: String,
    pub region: String,
    pub blood_type: BloodType,
    /// Months ahead (1-3)
    pub month: u8,
    #[schema(value_type = String, example = "주의")]
    pub severity: Severity,
    #[serde(default)]
    pub forecast_value: Option<f64>,
}

impl ShortageForecast {
    pub fn segment_id(region: &str, blood_type: BloodType, month: u8) -> String {
        format!("{}_{}_{}", region, blood_type, month)
    }
}

/// Response of `GET /api/forecasts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastsResponse {
    pub forecasts: Vec<ShortageForecast>,
    /// Date of the last observed month (YYYY-MM-DD)
    pub last_date: String,
    #[serde(default)]
    pub total_regions: usize,
    #[serde(default)]
    pub total_blood_types: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegionsResponse {
    pub regions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloodTypesResponse {
    pub blood_types: Vec<BloodType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_round_trips_korean_labels() {
        for severity in Severity::KNOWN {
            let json = serde_json::to_string(&severity).unwrap();
            let back: Severity = serde_json::from_str(&json).unwrap();
            assert_eq!(back, severity);
        }
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"심각\"");
    }

    #[test]
    fn test_unknown_severity_is_preserved() {
        let severity: Severity = serde_json::from_str("\"긴급\"").unwrap();
        assert_eq!(severity, Severity::Unknown("긴급".to_string()));
        assert_eq!(severity.label(), "긴급");
        assert_eq!(serde_json::to_string(&severity).unwrap(), "\"긴급\"");
    }

    #[test]
    fn test_forecast_uses_camel_case_and_optional_value() {
        let json = r#"{"id":"x","region":"부산","bloodType":"AB","month":2,"severity":"경계"}"#;
        let forecast: ShortageForecast = serde_json::from_str(json).unwrap();
        assert_eq!(forecast.blood_type, BloodType::AB);
        assert_eq!(forecast.severity, Severity::Warning);
        assert_eq!(forecast.forecast_value, None);
    }

    #[test]
    fn test_blood_type_from_str() {
        assert_eq!("ab".parse::<BloodType>().unwrap(), BloodType::AB);
        assert_eq!(" O ".parse::<BloodType>().unwrap(), BloodType::O);
        assert!("C".parse::<BloodType>().is_err());
    }

    #[test]
    fn test_horizons() {
        assert!(is_valid_horizon(1));
        assert!(is_valid_horizon(3));
        assert!(!is_valid_horizon(0));
        assert!(!is_valid_horizon(4));
    }
}
