use common::BloodType;
use thiserror::Error;

/// Errors raised while loading the precomputed forecast file.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Reading the file failed
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON or does not match the expected shape
    #[error("Malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// `lastDate` is not a `YYYY-MM-DD` date
    #[error("Invalid last date '{0}'")]
    InvalidDate(String),

    /// A series has no observed history
    #[error("Series {region}/{blood_type} has no history")]
    EmptyHistory { region: String, blood_type: BloodType },

    /// A series carries more forecasts than there are horizons
    #[error("Series {region}/{blood_type} has {count} forecasts, at most 3 are allowed")]
    TooManyForecasts {
        region: String,
        blood_type: BloodType,
        count: usize,
    },

    /// Negative, NaN or infinite value
    #[error("Series {region}/{blood_type} contains invalid value {value}")]
    InvalidValue {
        region: String,
        blood_type: BloodType,
        value: f64,
    },

    /// Two series for the same segment
    #[error("Duplicate series for {region}/{blood_type}")]
    Duplicate { region: String, blood_type: BloodType },

    /// Region name is blank
    #[error("Series with an empty region name")]
    EmptyRegion,
}

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from loading the dataset
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Region is not present in the dataset
    #[error("Invalid region: {region}. Valid regions: {valid}")]
    UnknownRegion { region: String, valid: String },

    /// Blood type is not present in the dataset
    #[error("Invalid blood type: {blood_type}. Valid types: {valid}")]
    UnknownBloodType { blood_type: BloodType, valid: String },

    /// Month outside the forecast horizons
    #[error("Month must be 1, 2, or 3 (got {0})")]
    InvalidMonth(u8),

    /// Region and blood type are known but the segment has no series or no
    /// forecast for the requested month
    #[error("No data available for {region}, {blood_type}")]
    NoData { region: String, blood_type: BloodType },
}

impl ComputeError {
    /// True for errors caused by the caller's input rather than missing data.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ComputeError::UnknownRegion { .. }
                | ComputeError::UnknownBloodType { .. }
                | ComputeError::InvalidMonth(_)
        )
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
