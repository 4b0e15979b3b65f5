use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::layout::Layout;
use crate::pages::chat::ChatPage;
use crate::pages::dashboard::DashboardPage;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/dashboard")]
    Dashboard,
    /// Accepts `region`, `bloodType` and `month` query parameters
    #[at("/chat")]
    Chat,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home | Route::Dashboard => {
            log::trace!("Rendering Dashboard page");
            html! { <Layout title="혈액 수급 예측"><DashboardPage /></Layout> }
        }
        Route::Chat => {
            log::trace!("Rendering Chat page");
            html! { <Layout title="AI 상담"><ChatPage /></Layout> }
        }
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! {
                <Layout title="404">
                    <div class="flex flex-col items-center py-20 gap-4">
                        <h1 class="text-4xl font-bold">{"404"}</h1>
                        <p>{"페이지를 찾을 수 없습니다"}</p>
                        <Link<Route> to={Route::Dashboard} classes="btn btn-error">{"대시보드로 이동"}</Link<Route>>
                    </div>
                </Layout>
            }
        }
    }
}
