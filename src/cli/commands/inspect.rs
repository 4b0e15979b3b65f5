use anyhow::Result;
use common::{group_by_horizon, severity_counts};
use std::path::PathBuf;
use tracing::{debug, info, trace};

use crate::config::{load_dataset, AppConfig};

/// Logs how many segments fall into each alert level, per horizon, followed
/// by the segments in dashboard order.
pub fn inspect(data_path: Option<PathBuf>, include_all: bool) -> Result<()> {
    trace!("Entering inspect function");
    let config = AppConfig::load()?.with_overrides(None, data_path);

    let dataset = load_dataset(&config.server.data_path)?;
    info!(
        "Dataset {}: {} regions, {} blood types, last date {}",
        config.server.data_path.display(),
        dataset.regions().len(),
        dataset.blood_types().len(),
        dataset.last_date()
    );

    let forecasts = dataset.forecasts(include_all);
    let groups = group_by_horizon(&forecasts);

    for (month, bucket) in groups.iter() {
        let summary = severity_counts(bucket)
            .into_iter()
            .map(|(severity, count)| format!("{} {}", severity, count))
            .collect::<Vec<_>>()
            .join(", ");
        info!("{}개월 후 ({} segments): {}", month, bucket.len(), summary);

        for forecast in bucket {
            debug!(
                "  [{}] {} {}형 forecast={}",
                forecast.severity,
                forecast.region,
                forecast.blood_type,
                forecast
                    .forecast_value
                    .map(|v| format!("{:.1}", v))
                    .unwrap_or_else(|| "-".to_string())
            );
        }
    }

    if !groups.out_of_range.is_empty() {
        info!("{} forecasts outside the 1-3 month horizons", groups.out_of_range.len());
    }

    Ok(())
}
