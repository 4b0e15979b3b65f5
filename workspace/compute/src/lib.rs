//! Server-side computation over the precomputed forecast dataset.
//!
//! Nothing in here performs I/O beyond [`dataset::ForecastDataset::load`];
//! the HTTP layer owns the dataset and calls into these modules.

pub mod context;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod series;
pub mod supply;

pub use dataset::ForecastDataset;
pub use error::{ComputeError, DatasetError, Result};
