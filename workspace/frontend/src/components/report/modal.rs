use chrono::Local;
use common::{markdown_to_html, print_document, screen_stylesheet, PrintHeader, ReportState, ShortageForecast};
use gloo_timers::callback::Timeout;
use js_sys::{Function, Reflect};
use stylist::Style;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use yew::prelude::*;
use crate::common::toast::ToastContext;
use crate::settings;

#[derive(Properties, PartialEq)]
pub struct ReportModalProps {
    pub state: ReportState,
    pub forecast: Option<ShortageForecast>,
    pub on_close: Callback<()>,
}

/// Calls the method `name` of a JS object.
fn call_method(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    let args: js_sys::Array = args.iter().collect();
    method.apply(target, &args)
}

/// Opens a print window with the standalone report document.
fn open_print_window(markdown: &str, header: &PrintHeader) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let popup = window
        .open_with_url_and_target("", "_blank")?
        .ok_or_else(|| JsValue::from_str("popup blocked"))?;

    let document = Reflect::get(&popup, &JsValue::from_str("document"))?;
    call_method(&document, "write", &[JsValue::from_str(&print_document(markdown, header))])?;
    call_method(&document, "close", &[])?;

    let delay = settings::get_settings().print_delay_ms;
    Timeout::new(delay, move || {
        if let Err(e) = popup.print() {
            log::error!("Print dialog failed: {:?}", e);
        }
    })
    .forget();
    Ok(())
}

async fn copy_to_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clipboard = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() {
        return Err(JsValue::from_str("clipboard unavailable"));
    }
    let promise: js_sys::Promise =
        call_method(&clipboard, "writeText", &[JsValue::from_str(text)])?.dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}

#[function_component(ReportModal)]
pub fn report_modal(props: &ReportModalProps) -> Html {
    let toast_ctx = use_context::<ToastContext>();
    let style = use_memo((), |_| Style::new(screen_stylesheet("&")));

    let ReportState::Open { markdown, failure } = &props.state else {
        return html! {};
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_print = {
        let markdown = markdown.clone();
        let forecast = props.forecast.clone();
        let toast_ctx = toast_ctx.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(forecast) = forecast.as_ref() else {
                return;
            };
            let header = PrintHeader {
                region: forecast.region.clone(),
                blood_type: forecast.blood_type,
                month: forecast.month,
                severity: Some(forecast.severity.clone()),
                generated_on: Local::now().date_naive(),
            };
            if let Err(e) = open_print_window(&markdown, &header) {
                log::error!("Failed to open print window: {:?}", e);
                if let Some(toast_ctx) = &toast_ctx {
                    toast_ctx.show_error("인쇄 창을 열 수 없습니다. 팝업 차단을 확인해주세요.".to_string());
                }
            }
        })
    };

    let on_copy = {
        let markdown = markdown.clone();
        Callback::from(move |_: MouseEvent| {
            let markdown = markdown.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = copy_to_clipboard(&markdown).await;
                let Some(toast_ctx) = toast_ctx else {
                    return;
                };
                match result {
                    Ok(()) => toast_ctx.show_success("리포트를 클립보드에 복사했습니다".to_string()),
                    Err(e) => {
                        log::error!("Clipboard write failed: {:?}", e);
                        toast_ctx.show_error("클립보드 복사에 실패했습니다".to_string());
                    }
                }
            });
        })
    };

    let body = match &*style {
        Ok(style) => html! {
            <div class={style.get_class_name().to_string()}>
                { Html::from_html_unchecked(AttrValue::from(markdown_to_html(markdown))) }
            </div>
        },
        Err(e) => {
            log::warn!("Report stylesheet unavailable: {}", e);
            html! { <div>{ Html::from_html_unchecked(AttrValue::from(markdown_to_html(markdown))) }</div> }
        }
    };

    let title = props
        .forecast
        .as_ref()
        .map(|f| format!("{} {}형 {}개월 후 분석 리포트", f.region, f.blood_type, f.month))
        .unwrap_or_else(|| "분석 리포트".to_string());

    html! {
        <dialog class="modal modal-open">
            <div class="modal-box w-11/12 max-w-4xl">
                <h3 class="font-bold text-lg mb-4">{title}</h3>
                if let Some(detail) = failure {
                    <div class="alert alert-error mb-4">
                        <i class="fas fa-exclamation-circle"></i>
                        <span class="text-sm">{detail}</span>
                    </div>
                }
                <div class="max-h-[60vh] overflow-y-auto">{body}</div>
                <div class="modal-action">
                    if failure.is_none() {
                        <button class="btn btn-outline btn-sm" onclick={on_copy}>
                            <i class="fas fa-copy"></i>{" 복사"}
                        </button>
                        <button class="btn btn-outline btn-sm" onclick={on_print}>
                            <i class="fas fa-print"></i>{" 인쇄"}
                        </button>
                    }
                    <button class="btn btn-sm" onclick={on_close}>{"닫기"}</button>
                </div>
            </div>
        </dialog>
    }
}
