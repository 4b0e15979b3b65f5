use common::{Severity, ShortageForecast};
use yew::prelude::*;

/// DaisyUI badge class for a severity level.
pub fn severity_badge_class(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "badge-error",
        Severity::Warning => "badge-warning",
        Severity::Caution => "badge-accent",
        Severity::Watch => "badge-info",
        Severity::Normal => "badge-success",
        Severity::Unknown(_) => "badge-ghost",
    }
}

#[derive(Properties, PartialEq)]
pub struct ForecastCardProps {
    pub forecast: ShortageForecast,
    pub selected: bool,
    pub on_select: Callback<ShortageForecast>,
}

#[function_component(ForecastCard)]
pub fn forecast_card(props: &ForecastCardProps) -> Html {
    let forecast = &props.forecast;
    let onclick = {
        let forecast = forecast.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |_| on_select.emit(forecast.clone()))
    };

    html! {
        <div
            class={classes!(
                "card", "bg-base-100", "shadow-sm", "cursor-pointer", "hover:shadow-md",
                props.selected.then_some("ring-2 ring-error")
            )}
            {onclick}
        >
            <div class="card-body p-4 flex-row items-center justify-between">
                <div>
                    <div class="font-semibold">{&forecast.region}</div>
                    <div class="text-sm text-gray-500">{format!("{}형", forecast.blood_type)}</div>
                </div>
                <div class="flex flex-col items-end gap-1">
                    <span class={classes!("badge", severity_badge_class(&forecast.severity))}>
                        {forecast.severity.label()}
                    </span>
                    if let Some(value) = forecast.forecast_value {
                        <span class="text-xs text-gray-500">{format!("예측 {:.0}건", value)}</span>
                    }
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_classes_follow_severity() {
        assert_eq!(severity_badge_class(&Severity::Critical), "badge-error");
        assert_eq!(severity_badge_class(&Severity::Normal), "badge-success");
        assert_eq!(severity_badge_class(&Severity::Unknown("기타".to_string())), "badge-ghost");
    }
}
