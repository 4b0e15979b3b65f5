use common::{ForecastsResponse, ReportState, SupplyState};
use yew::prelude::*;
use crate::api_client::analysis::analyze;
use crate::api_client::forecast::get_forecasts;
use crate::api_client::supply::get_supply_suggestion;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::common::toast::ToastContext;
use crate::components::dashboard::DashboardView;
use crate::state::{PanelAction, PanelStore};

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let include_all = use_state(|| true);
    let store = use_reducer(PanelStore::default);
    let toast_ctx = use_context::<ToastContext>();
    let (fetch_state, refetch) = use_fetch_with_refetch(*include_all, get_forecasts);

    {
        let dispatcher = store.dispatcher();
        use_effect_with(store.report_job.clone(), move |job| {
            if let Some(job) = job.clone() {
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = analyze(&job.request).await;
                    dispatcher.dispatch(PanelAction::FinishReport(job.token, outcome));
                });
            }
            || ()
        });
    }

    {
        let dispatcher = store.dispatcher();
        use_effect_with(store.supply_job.clone(), move |job| {
            if let Some(job) = job.clone() {
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = get_supply_suggestion(&job.request).await;
                    dispatcher.dispatch(PanelAction::FinishSupply(job.token, outcome));
                });
            }
            || ()
        });
    }

    // Applied failures only; stale responses never reach the panel.
    {
        let toast_ctx = toast_ctx.clone();
        use_effect_with(store.panel.report().clone(), move |report| {
            if let (Some(toast_ctx), ReportState::Open { failure: Some(_), .. }) = (&toast_ctx, report) {
                toast_ctx.show_error("리포트 생성에 실패했습니다".to_string());
            }
            || ()
        });
    }
    use_effect_with(store.panel.supply().clone(), move |supply| {
        if let (Some(toast_ctx), SupplyState::Failed(_)) = (&toast_ctx, supply) {
            toast_ctx.show_error("수급 조정 제안을 불러오지 못했습니다".to_string());
        }
        || ()
    });

    let on_toggle = {
        let include_all = include_all.clone();
        Callback::from(move |_: Event| {
            log::debug!("Toggling include_all to {}", !*include_all);
            include_all.set(!*include_all);
        })
    };

    let render = {
        let store = store.clone();
        Callback::from(move |response: ForecastsResponse| {
            html! { <DashboardView {response} store={store.clone()} /> }
        })
    };

    html! {
        <div class="flex flex-col gap-4">
            <div class="flex items-center justify-end gap-4">
                <label class="label cursor-pointer gap-2">
                    <span class="label-text">{"정상 단계 포함"}</span>
                    <input
                        type="checkbox"
                        class="toggle toggle-error"
                        checked={*include_all}
                        onchange={on_toggle}
                    />
                </label>
                <button
                    class="btn btn-ghost btn-sm"
                    disabled={fetch_state.is_loading()}
                    onclick={refetch.reform(|_: MouseEvent| ())}
                >
                    <i class="fas fa-sync-alt"></i>
                </button>
            </div>
            <FetchRender<ForecastsResponse>
                state={(*fetch_state).clone()}
                {render}
                on_retry={Some(refetch.clone())}
                loading_text={Some("예측 데이터를 불러오는 중...".to_string())}
            />
        </div>
    }
}
