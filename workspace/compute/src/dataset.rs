//! Precomputed forecast dataset.
//!
//! The server does not fit any model. It loads a JSON file holding the
//! monthly donation history and the one-to-three month forecasts for every
//! region and blood type, validates it once and keeps it immutable.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::NaiveDate;
use common::{BloodType, FORECAST_HORIZONS, Severity, ShortageForecast, is_valid_horizon};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{ComputeError, DatasetError, Result};
use crate::series::SegmentSeries;

/// On-disk shape of the dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetFile {
    pub last_date: String,
    pub series: Vec<SeriesRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRecord {
    pub region: String,
    pub blood_type: BloodType,
    pub history: Vec<f64>,
    #[serde(default)]
    pub forecasts: Vec<Option<f64>>,
}

/// Validated, immutable forecast dataset.
#[derive(Debug, Clone)]
pub struct ForecastDataset {
    last_date: NaiveDate,
    series: BTreeMap<(String, BloodType), SegmentSeries>,
    regions: Vec<String>,
    blood_types: Vec<BloodType>,
}

impl ForecastDataset {
    /// Reads and validates the dataset at `path`.
    #[instrument]
    pub fn load(path: &Path) -> std::result::Result<Self, DatasetError> {
        info!("Loading forecast dataset from {}", path.display());
        let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> std::result::Result<Self, DatasetError> {
        let file: DatasetFile = serde_json::from_str(raw)?;
        Self::from_file(file)
    }

    pub fn from_file(file: DatasetFile) -> std::result::Result<Self, DatasetError> {
        let last_date = NaiveDate::parse_from_str(file.last_date.trim(), "%Y-%m-%d")
            .map_err(|_| DatasetError::InvalidDate(file.last_date.clone()))?;

        let mut series = BTreeMap::new();
        for record in file.series {
            let segment = validate_record(record)?;
            let key = (segment.region.clone(), segment.blood_type);
            if series.contains_key(&key) {
                return Err(DatasetError::Duplicate {
                    region: key.0,
                    blood_type: key.1,
                });
            }
            series.insert(key, segment);
        }

        let regions: BTreeSet<String> = series.keys().map(|(region, _)| region.clone()).collect();
        let blood_types: BTreeSet<BloodType> = series.keys().map(|(_, blood)| *blood).collect();

        info!(
            "Loaded {} series across {} regions and {} blood types (last date {})",
            series.len(),
            regions.len(),
            blood_types.len(),
            last_date
        );

        Ok(Self {
            last_date,
            series,
            regions: regions.into_iter().collect(),
            blood_types: blood_types.into_iter().collect(),
        })
    }

    /// Date of the last observed month.
    pub fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    /// Region names, sorted and unique.
    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    /// Blood types present in the data, sorted and unique.
    pub fn blood_types(&self) -> &[BloodType] {
        &self.blood_types
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn segment(&self, region: &str, blood_type: BloodType) -> Option<&SegmentSeries> {
        self.series.get(&(region.to_string(), blood_type))
    }

    /// All series in region, then blood type order.
    pub fn segments(&self) -> impl Iterator<Item = &SegmentSeries> {
        self.series.values()
    }

    /// Checks a request against the dataset and returns the segment series.
    ///
    /// Unknown region, unknown blood type and an invalid month are input
    /// errors; a known pair without a series is [`ComputeError::NoData`].
    pub fn resolve(&self, region: &str, blood_type: BloodType, month: u8) -> Result<&SegmentSeries> {
        if !self.regions.iter().any(|r| r == region) {
            return Err(ComputeError::UnknownRegion {
                region: region.to_string(),
                valid: self.regions.join(", "),
            });
        }
        if !self.blood_types.contains(&blood_type) {
            return Err(ComputeError::UnknownBloodType {
                blood_type,
                valid: self
                    .blood_types
                    .iter()
                    .map(BloodType::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
        if !is_valid_horizon(month) {
            return Err(ComputeError::InvalidMonth(month));
        }

        self.segment(region, blood_type).ok_or_else(|| ComputeError::NoData {
            region: region.to_string(),
            blood_type,
        })
    }

    /// Forecast records for every segment and horizon that has a forecast.
    ///
    /// Without `include_all` only non-normal records are returned.
    #[instrument(skip(self))]
    pub fn forecasts(&self, include_all: bool) -> Vec<ShortageForecast> {
        let mut out = Vec::new();

        for segment in self.series.values() {
            let baseline = segment.baseline();
            for month in FORECAST_HORIZONS {
                let Some(value) = segment.forecast(month) else {
                    continue;
                };
                let severity = crate::series::classify(value, baseline);
                if !include_all && severity == Severity::Normal {
                    continue;
                }
                out.push(ShortageForecast {
                    id: ShortageForecast::segment_id(&segment.region, segment.blood_type, month),
                    region: segment.region.clone(),
                    blood_type: segment.blood_type,
                    month,
                    severity,
                    forecast_value: Some(value),
                });
            }
        }

        debug!("Produced {} forecast records", out.len());
        out
    }
}

fn validate_record(record: SeriesRecord) -> std::result::Result<SegmentSeries, DatasetError> {
    let region = record.region.trim().to_string();
    if region.is_empty() {
        return Err(DatasetError::EmptyRegion);
    }
    let blood_type = record.blood_type;

    if record.history.is_empty() {
        return Err(DatasetError::EmptyHistory { region, blood_type });
    }
    if record.forecasts.len() > FORECAST_HORIZONS.len() {
        return Err(DatasetError::TooManyForecasts {
            region,
            blood_type,
            count: record.forecasts.len(),
        });
    }

    let values = record
        .history
        .iter()
        .copied()
        .chain(record.forecasts.iter().flatten().copied());
    for value in values {
        if !value.is_finite() || value < 0.0 {
            return Err(DatasetError::InvalidValue {
                region,
                blood_type,
                value,
            });
        }
    }

    let mut forecasts = [None; 3];
    for (slot, value) in forecasts.iter_mut().zip(record.forecasts) {
        *slot = value;
    }

    Ok(SegmentSeries {
        region,
        blood_type,
        history: record.history,
        forecasts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "lastDate": "2024-12-01",
        "series": [
            {"region": "부산", "bloodType": "O", "history": [100, 100, 100, 100], "forecasts": [95, 75, 55]},
            {"region": "부산", "bloodType": "A", "history": [200, 200], "forecasts": [210, null]},
            {"region": "울산", "bloodType": "O", "history": [50, 50], "forecasts": [42]}
        ]
    }"#;

    fn dataset() -> ForecastDataset {
        ForecastDataset::from_json_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_regions_and_blood_types_are_sorted() {
        let dataset = dataset();

        assert_eq!(dataset.regions(), &["부산".to_string(), "울산".to_string()]);
        assert_eq!(dataset.blood_types(), &[BloodType::A, BloodType::O]);
        assert_eq!(dataset.last_date(), NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    }

    #[test]
    fn test_forecasts_include_all() {
        let forecasts = dataset().forecasts(true);

        assert_eq!(forecasts.len(), 5);
        assert_eq!(forecasts[0].id, "부산_A_1");
        let busan_o: Vec<&Severity> = forecasts
            .iter()
            .filter(|f| f.region == "부산" && f.blood_type == BloodType::O)
            .map(|f| &f.severity)
            .collect();
        assert_eq!(busan_o, vec![&Severity::Normal, &Severity::Caution, &Severity::Critical]);
    }

    #[test]
    fn test_forecasts_only_shortages() {
        let forecasts = dataset().forecasts(false);

        assert!(forecasts.iter().all(|f| f.severity != Severity::Normal));
        assert_eq!(forecasts.len(), 3);
    }

    #[test]
    fn test_resolve_errors() {
        let dataset = dataset();

        assert!(matches!(
            dataset.resolve("서울중앙", BloodType::O, 1),
            Err(ComputeError::UnknownRegion { .. })
        ));
        assert!(matches!(
            dataset.resolve("부산", BloodType::AB, 1),
            Err(ComputeError::UnknownBloodType { .. })
        ));
        assert!(matches!(
            dataset.resolve("부산", BloodType::O, 4),
            Err(ComputeError::InvalidMonth(4))
        ));
        assert!(matches!(
            dataset.resolve("울산", BloodType::A, 1),
            Err(ComputeError::NoData { .. })
        ));
        assert!(dataset.resolve("부산", BloodType::O, 3).is_ok());
    }

    #[test]
    fn test_rejects_invalid_files() {
        let duplicate = r#"{"lastDate":"2024-01-01","series":[
            {"region":"부산","bloodType":"O","history":[1]},
            {"region":"부산","bloodType":"O","history":[2]}]}"#;
        assert!(matches!(
            ForecastDataset::from_json_str(duplicate),
            Err(DatasetError::Duplicate { .. })
        ));

        let empty = r#"{"lastDate":"2024-01-01","series":[{"region":"부산","bloodType":"O","history":[]}]}"#;
        assert!(matches!(
            ForecastDataset::from_json_str(empty),
            Err(DatasetError::EmptyHistory { .. })
        ));

        let negative = r#"{"lastDate":"2024-01-01","series":[{"region":"부산","bloodType":"O","history":[1],"forecasts":[-3]}]}"#;
        assert!(matches!(
            ForecastDataset::from_json_str(negative),
            Err(DatasetError::InvalidValue { .. })
        ));

        let too_many = r#"{"lastDate":"2024-01-01","series":[{"region":"부산","bloodType":"O","history":[1],"forecasts":[1,2,3,4]}]}"#;
        assert!(matches!(
            ForecastDataset::from_json_str(too_many),
            Err(DatasetError::TooManyForecasts { count: 4, .. })
        ));

        let bad_date = r#"{"lastDate":"Dec 2024","series":[]}"#;
        assert!(matches!(
            ForecastDataset::from_json_str(bad_date),
            Err(DatasetError::InvalidDate(_))
        ));
    }
}
