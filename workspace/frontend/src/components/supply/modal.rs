use common::{SupplyState, SupplySuggestionResponse, SupplyView};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SupplyModalProps {
    pub state: SupplyState,
    pub on_close: Callback<()>,
}

#[function_component(SupplyModal)]
pub fn supply_modal(props: &SupplyModalProps) -> Html {
    if matches!(props.state, SupplyState::Closed) {
        return html! {};
    }

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let body = match &props.state {
        SupplyState::Closed => html! {},
        SupplyState::Loading => html! {
            <div class="flex flex-col items-center py-10 gap-3">
                <span class="loading loading-spinner loading-lg text-error"></span>
                <p class="text-sm text-gray-500">{"인근 지역의 여유 재고를 계산하는 중..."}</p>
            </div>
        },
        SupplyState::Failed(message) => html! {
            <div class="alert alert-error">
                <i class="fas fa-exclamation-circle"></i>
                <div class="flex flex-col">
                    <span class="font-semibold">{"수급 조정 제안을 불러오지 못했습니다"}</span>
                    <span class="text-sm">{message}</span>
                </div>
            </div>
        },
        SupplyState::Loaded(response) => html! { <SupplyDetails response={response.clone()} /> },
    };

    html! {
        <dialog class="modal modal-open">
            <div class="modal-box w-11/12 max-w-3xl">
                <h3 class="font-bold text-lg mb-4">{"수급 조정 제안"}</h3>
                {body}
                <div class="modal-action">
                    <button class="btn btn-sm" onclick={on_close}>{"닫기"}</button>
                </div>
            </div>
        </dialog>
    }
}

#[derive(Properties, PartialEq)]
struct SupplyDetailsProps {
    response: SupplySuggestionResponse,
}

#[function_component(SupplyDetails)]
fn supply_details(props: &SupplyDetailsProps) -> Html {
    let response = &props.response;

    let list = match SupplyView::of(response) {
        SupplyView::Empty => html! {
            <div class="alert">
                <i class="fas fa-info-circle"></i>
                <span>{"현재 여유 재고가 있는 인근 지역이 없습니다. 혈액원 간 협의가 필요합니다."}</span>
            </div>
        },
        SupplyView::Ready { partial } => html! {
            <>
                if let Some(percent) = partial {
                    <div class="alert alert-warning mb-3">
                        <i class="fas fa-exclamation-triangle"></i>
                        <span>{format!("제안된 공급량으로 부족분의 {}%만 충당할 수 있습니다.", percent)}</span>
                    </div>
                }
                <div class="overflow-x-auto">
                    <table class="table table-zebra">
                        <thead>
                            <tr>
                                <th>{"공급 지역"}</th>
                                <th>{"거리"}</th>
                                <th>{"제안 수량"}</th>
                                <th>{"혈액형"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for response.suggestions.iter().map(|s| html! {
                                <tr key={s.source_region.clone()}>
                                    <td>{&s.source_region}</td>
                                    <td>{format!("{:.0} km", s.distance)}</td>
                                    <td>{format!("{:.2}", s.amount)}</td>
                                    <td>{s.blood_type.as_str()}</td>
                                </tr>
                            }) }
                        </tbody>
                    </table>
                </div>
            </>
        },
    };

    html! {
        <div class="flex flex-col gap-4">
            <div class="stats stats-vertical md:stats-horizontal shadow">
                <div class="stat">
                    <div class="stat-title">{"대상"}</div>
                    <div class="stat-value text-lg">
                        {format!("{} {}형 · {}개월 후", response.region, response.blood_type, response.month)}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-title">{"예측 / 기준"}</div>
                    <div class="stat-value text-lg">
                        {format!("{:.1} / {:.1}", response.forecast_value, response.baseline)}
                    </div>
                </div>
                <div class="stat">
                    <div class="stat-title">{"부족량"}</div>
                    <div class="stat-value text-lg text-error">{format!("{:.2}", response.shortage_amount)}</div>
                    <div class="stat-desc">{format!("제안 합계 {:.2}", response.total_suggested)}</div>
                </div>
            </div>
            {list}
        </div>
    }
}
