//! Reducers wrapping the dashboard panel and the chat session.
//!
//! Starting a remote call leaves the job in an outbox field; the owning page
//! watches it with `use_effect_with`, runs the request and dispatches the
//! outcome back.

use std::rc::Rc;
use common::{
    BloodType, ChatQuery, ChatSession, DetailPanel, PendingChat, ReportJob, RequestToken, ShortageForecast,
    SupplyJob, SupplySuggestionResponse,
};
use yew::prelude::*;

pub enum PanelAction {
    Select(ShortageForecast),
    Deselect,
    BeginReport,
    FinishReport(RequestToken, Result<String, String>),
    CloseReport,
    BeginSupply,
    FinishSupply(RequestToken, Result<SupplySuggestionResponse, String>),
    CloseSupply,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelStore {
    pub panel: DetailPanel,
    pub report_job: Option<ReportJob>,
    pub supply_job: Option<SupplyJob>,
}

impl Reducible for PanelStore {
    type Action = PanelAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            PanelAction::Select(forecast) => next.panel.select(forecast),
            PanelAction::Deselect => next.panel.deselect(),
            PanelAction::BeginReport => match next.panel.begin_report() {
                Some(job) => next.report_job = Some(job),
                None => return self,
            },
            PanelAction::FinishReport(token, outcome) => {
                if !next.panel.finish_report(token, outcome) {
                    return self;
                }
            }
            PanelAction::CloseReport => next.panel.close_report(),
            PanelAction::BeginSupply => match next.panel.begin_supply() {
                Some(job) => next.supply_job = Some(job),
                None => return self,
            },
            PanelAction::FinishSupply(token, outcome) => {
                if !next.panel.finish_supply(token, outcome) {
                    return self;
                }
            }
            PanelAction::CloseSupply => next.panel.close_supply(),
        }
        Rc::new(next)
    }
}

pub enum ChatAction {
    SetInput(String),
    SetRegion(Option<String>),
    SetBloodType(Option<BloodType>),
    SetMonth(u8),
    Send,
    Complete(RequestToken, Result<String, String>),
    Clear,
    /// The page was reached again with different navigation parameters.
    Navigate(ChatQuery),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatStore {
    pub session: ChatSession,
    pub outbox: Option<PendingChat>,
}

impl ChatStore {
    pub fn new(session: ChatSession) -> Self {
        Self { session, outbox: None }
    }
}

impl Reducible for ChatStore {
    type Action = ChatAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ChatAction::SetInput(input) => next.session.input = input,
            ChatAction::SetRegion(region) => next.session.region = region,
            ChatAction::SetBloodType(blood_type) => next.session.blood_type = blood_type,
            ChatAction::SetMonth(month) => next.session.month = month,
            ChatAction::Send => match next.session.begin_send() {
                Ok(pending) => next.outbox = Some(pending),
                Err(e) => {
                    log::debug!("Chat send rejected: {}", e);
                    return self;
                }
            },
            ChatAction::Complete(token, outcome) => {
                if !next.session.complete(token, outcome) {
                    return self;
                }
            }
            ChatAction::Clear => {
                next.session.clear();
                next.outbox = None;
            }
            ChatAction::Navigate(query) => {
                next.session.restart(&query);
                next.outbox = None;
            }
        }
        Rc::new(next)
    }
}
