use common::ShortageForecast;
use yew::prelude::*;
use super::forecast_card::ForecastCard;

#[derive(Properties, PartialEq)]
pub struct ForecastColumnProps {
    pub month: u8,
    /// Already ordered by severity
    pub forecasts: Vec<ShortageForecast>,
    pub selected_id: Option<String>,
    pub on_select: Callback<ShortageForecast>,
}

#[function_component(ForecastColumn)]
pub fn forecast_column(props: &ForecastColumnProps) -> Html {
    html! {
        <div class="flex flex-col gap-3">
            <h2 class="text-lg font-bold flex items-center gap-2">
                {format!("{}개월 후", props.month)}
                <span class="badge badge-neutral">{props.forecasts.len()}</span>
            </h2>
            if props.forecasts.is_empty() {
                <div class="alert">
                    <i class="fas fa-check-circle text-success"></i>
                    <span>{"부족이 예상되는 지역이 없습니다"}</span>
                </div>
            } else {
                { for props.forecasts.iter().map(|forecast| {
                    let selected = props.selected_id.as_deref() == Some(forecast.id.as_str());
                    html! {
                        <ForecastCard
                            key={forecast.id.clone()}
                            forecast={forecast.clone()}
                            {selected}
                            on_select={props.on_select.clone()}
                        />
                    }
                }) }
            }
        </div>
    }
}
