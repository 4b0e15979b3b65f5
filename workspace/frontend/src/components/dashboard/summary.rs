use common::{severity_counts, ForecastsResponse};
use yew::prelude::*;
use super::forecast_card::severity_badge_class;

#[derive(Properties, PartialEq)]
pub struct SummaryProps {
    pub response: ForecastsResponse,
}

/// Data date, dataset totals and per-severity counts.
#[function_component(Summary)]
pub fn summary(props: &SummaryProps) -> Html {
    let response = &props.response;
    let counts = severity_counts(&response.forecasts);

    html! {
        <div class="stats stats-vertical lg:stats-horizontal shadow w-full bg-base-100">
            <div class="stat">
                <div class="stat-title">{"기준일"}</div>
                <div class="stat-value text-2xl">{&response.last_date}</div>
                <div class="stat-desc">{"마지막 실적 월"}</div>
            </div>
            <div class="stat">
                <div class="stat-title">{"지역 / 혈액형"}</div>
                <div class="stat-value text-2xl">
                    {format!("{} / {}", response.total_regions, response.total_blood_types)}
                </div>
            </div>
            <div class="stat">
                <div class="stat-title">{"경보 단계별 건수"}</div>
                <div class="flex flex-wrap gap-2 mt-2">
                    { for counts.iter().filter(|(_, n)| *n > 0).map(|(severity, n)| html! {
                        <span class={classes!("badge", severity_badge_class(severity))}>
                            {format!("{} {}", severity.label(), n)}
                        </span>
                    }) }
                </div>
            </div>
        </div>
    }
}
