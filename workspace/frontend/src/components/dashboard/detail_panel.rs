use common::ShortageForecast;
use yew::prelude::*;
use super::forecast_card::severity_badge_class;

#[derive(Properties, PartialEq)]
pub struct DetailPanelProps {
    pub forecast: ShortageForecast,
    pub generating_report: bool,
    pub on_chat: Callback<()>,
    pub on_report: Callback<()>,
    pub on_supply: Callback<()>,
    pub on_close: Callback<()>,
}

/// Selected forecast with its three actions.
#[function_component(DetailPanelView)]
pub fn detail_panel_view(props: &DetailPanelProps) -> Html {
    let forecast = &props.forecast;
    let emit = |cb: &Callback<()>| {
        let cb = cb.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div class="card bg-base-100 shadow-lg sticky top-20">
            <div class="card-body">
                <div class="flex items-start justify-between">
                    <h2 class="card-title">
                        {format!("{} {}형", forecast.region, forecast.blood_type)}
                    </h2>
                    <button class="btn btn-sm btn-ghost btn-circle" onclick={emit(&props.on_close)}>
                        <i class="fas fa-times"></i>
                    </button>
                </div>
                <div class="flex flex-col gap-2 text-sm">
                    <div class="flex justify-between">
                        <span class="text-gray-500">{"예측 시점"}</span>
                        <span>{format!("{}개월 후", forecast.month)}</span>
                    </div>
                    <div class="flex justify-between">
                        <span class="text-gray-500">{"경보 단계"}</span>
                        <span class={classes!("badge", severity_badge_class(&forecast.severity))}>
                            {forecast.severity.label()}
                        </span>
                    </div>
                    if let Some(value) = forecast.forecast_value {
                        <div class="flex justify-between">
                            <span class="text-gray-500">{"예측 공급량"}</span>
                            <span>{format!("{:.1}", value)}</span>
                        </div>
                    }
                </div>
                <div class="card-actions flex-col mt-4">
                    <button class="btn btn-outline w-full" onclick={emit(&props.on_chat)}>
                        <i class="fas fa-comments"></i>
                        {" AI 상담하기"}
                    </button>
                    <button
                        class="btn btn-error w-full"
                        disabled={props.generating_report}
                        onclick={emit(&props.on_report)}
                    >
                        if props.generating_report {
                            <span class="loading loading-spinner loading-sm"></span>
                            {" 리포트 생성 중..."}
                        } else {
                            <i class="fas fa-file-alt"></i>
                            {" 분석 리포트 생성"}
                        }
                    </button>
                    <button class="btn btn-outline btn-error w-full" onclick={emit(&props.on_supply)}>
                        <i class="fas fa-truck-medical"></i>
                        {" 수급 조정 제안"}
                    </button>
                </div>
            </div>
        </div>
    }
}
