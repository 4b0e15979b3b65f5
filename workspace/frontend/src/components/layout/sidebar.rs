use yew::prelude::*;
use yew_router::prelude::*;
use crate::settings;
use crate::Route;

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let api_docs = settings::get_settings().api_url("/swagger-ui");

    html! {
        <div class="drawer-side z-50">
            <label aria-label="close sidebar" class="drawer-overlay" for="main-drawer"></label>
            <ul class="menu p-4 w-72 min-h-full bg-base-100 text-base-content border-r border-base-300">
                <li class="mb-4">
                    <div class="flex items-center gap-3 px-2">
                        <div class="w-10 h-10 rounded-lg bg-error flex items-center justify-center text-error-content text-2xl">
                            <i class="fas fa-tint"></i>
                        </div>
                        <span class="text-2xl font-bold tracking-tight">{"Bloodcast"}</span>
                    </div>
                </li>

                <li><Link<Route> to={Route::Dashboard}><i class="fas fa-chart-bar w-5"></i> {"수급 예측 대시보드"}</Link<Route>></li>
                <li><Link<Route> to={Route::Chat}><i class="fas fa-comments w-5"></i> {"AI 상담"}</Link<Route>></li>

                <div class="divider"></div>

                <li><a href={api_docs} target="_blank"><i class="fas fa-book w-5"></i> {"API 문서"}</a></li>
            </ul>
        </div>
    }
}
