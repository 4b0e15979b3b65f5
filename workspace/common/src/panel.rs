//! Detail & action panel state for the dashboard.
//!
//! One forecast can be selected at a time. From a selection the user may open
//! the chat page, generate a report or request a supply suggestion. Remote
//! calls are tracked with [`RequestTracker`] so a response that arrives after
//! the selection changed, or after its modal was closed, is dropped.

use crate::chat::ChatQuery;
use crate::forecast::ShortageForecast;
use crate::report::{AnalyzeRequest, REPORT_FAILURE_MESSAGE};
use crate::request::{RequestToken, RequestTracker};
use crate::supply::{SupplySuggestionRequest, SupplySuggestionResponse};
use tracing::{debug, warn};

/// Report modal contents.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportState {
    Closed,
    Generating,
    /// Open with the generated markdown, or with the failure message and
    /// the error detail when generation failed.
    Open {
        markdown: String,
        failure: Option<String>,
    },
}

/// Suggestion modal contents.
#[derive(Debug, Clone, PartialEq)]
pub enum SupplyState {
    Closed,
    Loading,
    Loaded(SupplySuggestionResponse),
    Failed(String),
}

/// Report generation the caller must run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportJob {
    pub token: RequestToken,
    pub request: AnalyzeRequest,
}

/// Suggestion lookup the caller must run.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyJob {
    pub token: RequestToken,
    pub request: SupplySuggestionRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    selected: Option<ShortageForecast>,
    report: ReportState,
    supply: SupplyState,
    report_request: RequestTracker,
    supply_request: RequestTracker,
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self {
            selected: None,
            report: ReportState::Closed,
            supply: SupplyState::Closed,
            report_request: RequestTracker::new(),
            supply_request: RequestTracker::new(),
        }
    }
}

impl DetailPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&ShortageForecast> {
        self.selected.as_ref()
    }

    pub fn report(&self) -> &ReportState {
        &self.report
    }

    pub fn supply(&self) -> &SupplyState {
        &self.supply
    }

    pub fn is_generating_report(&self) -> bool {
        matches!(self.report, ReportState::Generating)
    }

    /// Selects `forecast`. Re-selecting the current forecast keeps any
    /// outstanding work; a different forecast resets both modals.
    pub fn select(&mut self, forecast: ShortageForecast) {
        if self.selected.as_ref().is_some_and(|current| current.id == forecast.id) {
            return;
        }
        debug!(id = %forecast.id, "forecast selected");
        self.reset_actions();
        self.selected = Some(forecast);
    }

    pub fn deselect(&mut self) {
        if self.selected.take().is_some() {
            debug!("forecast deselected");
        }
        self.reset_actions();
    }

    /// Navigation parameters for the chat page.
    pub fn chat_query(&self) -> Option<ChatQuery> {
        self.selected
            .as_ref()
            .map(|f| ChatQuery::for_segment(&f.region, f.blood_type, f.month))
    }

    /// Starts report generation. Returns `None` with nothing selected or
    /// while a report is already being generated.
    pub fn begin_report(&mut self) -> Option<ReportJob> {
        let forecast = self.selected.as_ref()?;
        if self.is_generating_report() {
            return None;
        }

        let request = AnalyzeRequest {
            region: forecast.region.clone(),
            blood_type: forecast.blood_type,
            month: forecast.month,
        };
        self.report = ReportState::Generating;
        let token = self.report_request.issue();
        Some(ReportJob { token, request })
    }

    /// Applies a report outcome. Both success and failure open the modal.
    pub fn finish_report(&mut self, token: RequestToken, outcome: Result<String, String>) -> bool {
        if !self.report_request.settle(token) {
            debug!(token = token.value(), "discarding stale report response");
            return false;
        }

        self.report = match outcome {
            Ok(markdown) => ReportState::Open {
                markdown,
                failure: None,
            },
            Err(e) => {
                warn!("Report generation failed: {}", e);
                ReportState::Open {
                    markdown: REPORT_FAILURE_MESSAGE.to_string(),
                    failure: Some(e),
                }
            }
        };
        true
    }

    pub fn close_report(&mut self) {
        self.report_request.invalidate();
        self.report = ReportState::Closed;
    }

    /// Opens the suggestion modal in its loading state.
    pub fn begin_supply(&mut self) -> Option<SupplyJob> {
        let forecast = self.selected.as_ref()?;

        let request = SupplySuggestionRequest {
            region: forecast.region.clone(),
            blood_type: forecast.blood_type,
            month: forecast.month,
        };
        self.supply = SupplyState::Loading;
        let token = self.supply_request.issue();
        Some(SupplyJob { token, request })
    }

    /// Applies a suggestion outcome. Failures stay in the modal until the
    /// user closes it.
    pub fn finish_supply(
        &mut self,
        token: RequestToken,
        outcome: Result<SupplySuggestionResponse, String>,
    ) -> bool {
        if !self.supply_request.settle(token) {
            debug!(token = token.value(), "discarding stale supply response");
            return false;
        }

        self.supply = match outcome {
            Ok(response) => SupplyState::Loaded(response),
            Err(e) => {
                warn!("Supply suggestion failed: {}", e);
                SupplyState::Failed(e)
            }
        };
        true
    }

    pub fn close_supply(&mut self) {
        self.supply_request.invalidate();
        self.supply = SupplyState::Closed;
    }

    fn reset_actions(&mut self) {
        self.close_report();
        self.close_supply();
    }
}
