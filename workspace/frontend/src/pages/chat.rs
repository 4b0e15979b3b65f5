use common::{markdown_to_html, BloodType, ChatQuery, ChatRole, ChatSession, FORECAST_HORIZONS};
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;
use crate::api_client::chat::send_chat;
use crate::api_client::forecast::{get_blood_types, get_regions};
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;
use crate::common::toast::ToastContext;
use crate::state::{ChatAction, ChatStore};

/// Region and blood type choices offered by the backend.
#[derive(Debug, Clone, PartialEq)]
struct SelectorOptions {
    regions: Vec<String>,
    blood_types: Vec<BloodType>,
}

async fn load_options() -> Result<SelectorOptions, String> {
    let regions = get_regions().await?;
    let blood_types = get_blood_types().await?.blood_types;
    Ok(SelectorOptions { regions, blood_types })
}

fn select_value(e: &Event) -> Option<String> {
    let value = e.target_dyn_into::<HtmlSelectElement>()?.value();
    (!value.is_empty()).then_some(value)
}

#[function_component(ChatPage)]
pub fn chat_page() -> Html {
    let query = use_location()
        .and_then(|loc| loc.query::<ChatQuery>().ok())
        .unwrap_or_default();
    let toast_ctx = use_context::<ToastContext>();
    let store = {
        let query = query.clone();
        use_reducer(move || {
            if !query.is_empty() {
                log::debug!("Chat opened with {:?}", query);
            }
            ChatStore::new(ChatSession::from_query(&query))
        })
    };
    let applied_query = use_mut_ref(|| query.clone());
    let (options, reload_options) = use_fetch_with_refetch((), |_| load_options());

    {
        let dispatcher = store.dispatcher();
        use_effect_with(query, move |query| {
            if *applied_query.borrow() != *query {
                *applied_query.borrow_mut() = query.clone();
                if !query.is_empty() {
                    log::debug!("Chat reopened with {:?}", query);
                    dispatcher.dispatch(ChatAction::Navigate(query.clone()));
                }
            }
            || ()
        });
    }

    {
        let dispatcher = store.dispatcher();
        use_effect_with(store.outbox.clone(), move |pending| {
            if let Some(pending) = pending.clone() {
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = send_chat(&pending.request).await;
                    dispatcher.dispatch(ChatAction::Complete(pending.token, outcome));
                });
            }
            || ()
        });
    }

    let send = {
        let store = store.clone();
        Callback::from(move |_: ()| {
            if let Err(e) = store.session.validate() {
                if let Some(toast_ctx) = &toast_ctx {
                    toast_ctx.show_warning(e.to_string());
                }
                return;
            }
            store.dispatch(ChatAction::Send);
        })
    };

    let on_input = {
        let store = store.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(area) = e.target_dyn_into::<HtmlTextAreaElement>() {
                store.dispatch(ChatAction::SetInput(area.value()));
            }
        })
    };

    let on_keydown = {
        let send = send.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" && !e.shift_key() && !e.is_composing() {
                e.prevent_default();
                send.emit(());
            }
        })
    };

    let on_clear = {
        let store = store.clone();
        Callback::from(move |_: MouseEvent| store.dispatch(ChatAction::Clear))
    };

    let selectors = {
        let store = store.clone();
        Callback::from(move |options: SelectorOptions| render_selectors(&store, &options))
    };

    let session = &store.session;

    html! {
        <div class="flex flex-col gap-4 h-full">
            <FetchRender<SelectorOptions>
                state={(*options).clone()}
                render={selectors}
                on_retry={Some(reload_options)}
            />

            <div class="card bg-base-100 shadow flex-1">
                <div class="card-body gap-4">
                    <div class="flex justify-between items-center">
                        <h2 class="card-title">{"AI 수급 상담"}</h2>
                        <button
                            class="btn btn-ghost btn-sm"
                            disabled={session.messages().is_empty() && !session.is_busy()}
                            onclick={on_clear}
                        >
                            <i class="fas fa-trash"></i>{" 대화 지우기"}
                        </button>
                    </div>

                    <div class="flex flex-col gap-2 min-h-64 max-h-[55vh] overflow-y-auto">
                        if session.messages().is_empty() {
                            <p class="text-center text-gray-500 py-10">
                                {"지역과 혈액형을 선택하고 수급 상황에 대해 질문해보세요."}
                            </p>
                        }
                        { for session.messages().iter().enumerate().map(|(i, message)| match message.role {
                            ChatRole::User => html! {
                                <div key={i} class="chat chat-end">
                                    <div class="chat-bubble chat-bubble-error whitespace-pre-wrap">{&message.content}</div>
                                </div>
                            },
                            ChatRole::Assistant => html! {
                                <div key={i} class="chat chat-start">
                                    <div class="chat-bubble bg-base-200 text-base-content prose">
                                        { Html::from_html_unchecked(AttrValue::from(markdown_to_html(&message.content))) }
                                    </div>
                                </div>
                            },
                        }) }
                        if session.is_busy() {
                            <div class="chat chat-start">
                                <div class="chat-bubble bg-base-200">
                                    <span class="loading loading-dots loading-sm"></span>
                                </div>
                            </div>
                        }
                    </div>

                    <div class="flex gap-2 items-end">
                        <textarea
                            class="textarea textarea-bordered flex-1"
                            rows="2"
                            placeholder="질문을 입력하세요 (Shift+Enter 줄바꿈)"
                            value={session.input.clone()}
                            oninput={on_input}
                            onkeydown={on_keydown}
                        />
                        <button
                            class="btn btn-error"
                            disabled={!session.can_send()}
                            onclick={send.reform(|_: MouseEvent| ())}
                        >
                            <i class="fas fa-paper-plane"></i>
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}

fn render_selectors(store: &UseReducerHandle<ChatStore>, options: &SelectorOptions) -> Html {
    let session = &store.session;

    let on_region = {
        let store = store.clone();
        Callback::from(move |e: Event| store.dispatch(ChatAction::SetRegion(select_value(&e))))
    };
    let on_blood_type = {
        let store = store.clone();
        Callback::from(move |e: Event| {
            let blood_type = select_value(&e).and_then(|v| v.parse::<BloodType>().ok());
            store.dispatch(ChatAction::SetBloodType(blood_type));
        })
    };
    let on_month = {
        let store = store.clone();
        Callback::from(move |e: Event| {
            if let Some(month) = select_value(&e).and_then(|v| v.parse::<u8>().ok()) {
                store.dispatch(ChatAction::SetMonth(month));
            }
        })
    };

    html! {
        <div class="flex flex-wrap gap-3">
            <select class="select select-bordered" onchange={on_region}>
                <option value="" selected={session.region.is_none()}>{"지역 선택"}</option>
                { for options.regions.iter().map(|region| html! {
                    <option
                        value={region.clone()}
                        selected={session.region.as_deref() == Some(region.as_str())}
                    >
                        {region}
                    </option>
                }) }
            </select>
            <select class="select select-bordered" onchange={on_blood_type}>
                <option value="" selected={session.blood_type.is_none()}>{"혈액형 선택"}</option>
                { for options.blood_types.iter().map(|blood_type| html! {
                    <option value={blood_type.as_str()} selected={session.blood_type == Some(*blood_type)}>
                        {format!("{}형", blood_type)}
                    </option>
                }) }
            </select>
            <select class="select select-bordered" onchange={on_month}>
                { for FORECAST_HORIZONS.iter().map(|month| html! {
                    <option value={month.to_string()} selected={session.month == *month}>
                        {format!("{}개월 후", month)}
                    </option>
                }) }
            </select>
        </div>
    }
}
