use common::{group_by_horizon, ForecastsResponse, ShortageForecast};
use yew::prelude::*;
use yew_router::prelude::*;
use crate::components::report::ReportModal;
use crate::components::supply::SupplyModal;
use crate::state::{PanelAction, PanelStore};
use crate::Route;
use super::detail_panel::DetailPanelView;
use super::forecast_column::ForecastColumn;
use super::summary::Summary;

#[derive(Properties, PartialEq)]
pub struct DashboardViewProps {
    pub response: ForecastsResponse,
    pub store: UseReducerHandle<PanelStore>,
}

#[function_component(DashboardView)]
pub fn dashboard_view(props: &DashboardViewProps) -> Html {
    let navigator = use_navigator();
    let store = &props.store;
    let groups = group_by_horizon(&props.response.forecasts);
    let panel = &store.panel;
    let selected = panel.selected().cloned();
    let selected_id = selected.as_ref().map(|f| f.id.clone());

    let dispatch = |action: fn() -> PanelAction| {
        let store = store.clone();
        Callback::from(move |_: ()| store.dispatch(action()))
    };

    let on_select = {
        let store = store.clone();
        Callback::from(move |forecast: ShortageForecast| store.dispatch(PanelAction::Select(forecast)))
    };

    let on_chat = {
        let query = panel.chat_query();
        Callback::from(move |_: ()| {
            let (Some(navigator), Some(query)) = (navigator.as_ref(), query.as_ref()) else {
                return;
            };
            log::debug!("Opening chat for {:?}", query);
            if let Err(e) = navigator.push_with_query(&Route::Chat, query) {
                log::error!("Failed to navigate to chat: {}", e);
            }
        })
    };

    html! {
        <div class="flex flex-col gap-6">
            <Summary response={props.response.clone()} />

            <div class="flex flex-col xl:flex-row gap-6">
                <div class="flex-1 grid grid-cols-1 md:grid-cols-3 gap-4">
                    { for groups.iter().map(|(month, forecasts)| html! {
                        <ForecastColumn
                            key={month}
                            {month}
                            forecasts={forecasts.to_vec()}
                            selected_id={selected_id.clone()}
                            on_select={on_select.clone()}
                        />
                    }) }
                </div>

                if let Some(forecast) = selected.clone() {
                    <div class="xl:w-80">
                        <DetailPanelView
                            {forecast}
                            generating_report={panel.is_generating_report()}
                            {on_chat}
                            on_report={dispatch(|| PanelAction::BeginReport)}
                            on_supply={dispatch(|| PanelAction::BeginSupply)}
                            on_close={dispatch(|| PanelAction::Deselect)}
                        />
                    </div>
                }
            </div>

            <ReportModal
                state={panel.report().clone()}
                forecast={selected.clone()}
                on_close={dispatch(|| PanelAction::CloseReport)}
            />
            <SupplyModal
                state={panel.supply().clone()}
                on_close={dispatch(|| PanelAction::CloseSupply)}
            />
        </div>
    }
}
