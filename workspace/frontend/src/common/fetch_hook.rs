use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;
use crate::common::toast::ToastContext;
use crate::hooks::FetchState;

/// Fetches on mount and whenever `deps` change, and returns a manual
/// refetch callback.
///
/// Every fetch bumps a generation counter; a response that arrives after a
/// newer fetch started is dropped.
#[hook]
pub fn use_fetch_with_refetch<T, D, F, Fut>(
    deps: D,
    fetch_fn: F,
) -> (UseStateHandle<FetchState<T>>, Callback<()>)
where
    T: 'static,
    D: Clone + PartialEq + 'static,
    F: Fn(D) -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    let fetch_state = use_state(|| FetchState::Loading);
    let toast_ctx = use_context::<ToastContext>();
    let generation = use_memo((), |_| Cell::new(0u64));
    let fetch_fn = use_memo((), move |_| fetch_fn);

    let refetch = {
        let fetch_state = fetch_state.clone();
        let generation = generation.clone();
        let fetch_fn = fetch_fn.clone();

        use_callback(deps.clone(), move |_: (), deps| {
            let fetch_state = fetch_state.clone();
            let toast_ctx = toast_ctx.clone();
            let generation: Rc<Cell<u64>> = generation.clone();
            let fut = (*fetch_fn)(deps.clone());

            let current = generation.get() + 1;
            generation.set(current);
            fetch_state.set(FetchState::Loading);

            wasm_bindgen_futures::spawn_local(async move {
                let result = fut.await;
                if generation.get() != current {
                    log::debug!("Discarding superseded fetch result (generation {})", current);
                    return;
                }
                if let Err(err) = &result {
                    if let Some(toast_ctx) = &toast_ctx {
                        toast_ctx.show_error(err.clone());
                    }
                }
                fetch_state.set(result.into());
            });
        })
    };

    {
        let refetch = refetch.clone();
        use_effect_with(deps, move |_| {
            refetch.emit(());
            || ()
        });
    }

    (fetch_state, refetch)
}
