use std::rc::Rc;
use gloo_timers::callback::Timeout;
use yew::prelude::*;
use crate::settings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastType {
    Success,
    Warning,
    Error,
}

impl ToastType {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastType::Success => "alert-success",
            ToastType::Warning => "alert-warning",
            ToastType::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Success => "fas fa-check-circle",
            ToastType::Warning => "fas fa-exclamation-triangle",
            ToastType::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub toast_type: ToastType,
}

pub enum ToastAction {
    Add(Toast),
    Remove(usize),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastList {
    pub toasts: Vec<Toast>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Add(toast) => toasts.push(toast),
            ToastAction::Remove(id) => {
                if !toasts.iter().any(|t| t.id == id) {
                    return self;
                }
                toasts.retain(|t| t.id != id);
            }
        }
        Rc::new(Self { toasts })
    }
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    pub add_toast: Callback<(String, ToastType)>,
    pub remove_toast: Callback<usize>,
}

impl ToastContext {
    pub fn show_success(&self, message: String) {
        self.add_toast.emit((message, ToastType::Success));
    }

    pub fn show_warning(&self, message: String) {
        self.add_toast.emit((message, ToastType::Warning));
    }

    pub fn show_error(&self, message: String) {
        self.add_toast.emit((message, ToastType::Error));
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let toasts = use_reducer(ToastList::default);
    let next_id = use_mut_ref(|| 0usize);

    let context = {
        let dispatcher = toasts.dispatcher();
        use_memo((), move |_| {
            let add_toast = {
                let dispatcher = dispatcher.clone();
                Callback::from(move |(message, toast_type): (String, ToastType)| {
                    let id = {
                        let mut next_id = next_id.borrow_mut();
                        *next_id += 1;
                        *next_id
                    };
                    log::trace!("Showing toast {} ({:?})", id, toast_type);
                    dispatcher.dispatch(ToastAction::Add(Toast { id, message, toast_type }));

                    let dispatcher = dispatcher.clone();
                    let duration = settings::get_settings().toast_duration_ms;
                    Timeout::new(duration, move || dispatcher.dispatch(ToastAction::Remove(id)))
                        .forget();
                })
            };
            let remove_toast = Callback::from(move |id: usize| {
                dispatcher.dispatch(ToastAction::Remove(id));
            });

            ToastContext { add_toast, remove_toast }
        })
    };

    html! {
        <ContextProvider<ToastContext> context={(*context).clone()}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for toasts.toasts.iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let remove_toast = context.remove_toast.clone();
                        Callback::from(move |_| remove_toast.emit(id))
                    };

                    html! {
                        <div key={id} class={classes!("alert", toast.toast_type.alert_class(), "shadow-lg")}>
                            <i class={toast.toast_type.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: usize) -> Toast {
        Toast {
            id,
            message: format!("toast {}", id),
            toast_type: ToastType::Success,
        }
    }

    #[test]
    fn test_add_and_remove() {
        let list = Rc::new(ToastList::default());
        let list = list.reduce(ToastAction::Add(toast(1)));
        let list = list.reduce(ToastAction::Add(toast(2)));
        let list = list.reduce(ToastAction::Remove(1));

        assert_eq!(list.toasts, vec![toast(2)]);
    }

    #[test]
    fn test_each_toast_type_has_its_own_styling() {
        let types = [ToastType::Success, ToastType::Warning, ToastType::Error];

        let classes: Vec<_> = types.iter().map(ToastType::alert_class).collect();
        assert_eq!(classes, vec!["alert-success", "alert-warning", "alert-error"]);
        assert!(types.iter().all(|t| t.icon().starts_with("fas fa-")));
    }

    #[test]
    fn test_removing_unknown_toast_keeps_state() {
        let list = Rc::new(ToastList::default()).reduce(ToastAction::Add(toast(1)));
        let after = list.clone().reduce(ToastAction::Remove(7));

        assert!(Rc::ptr_eq(&list, &after));
    }
}
