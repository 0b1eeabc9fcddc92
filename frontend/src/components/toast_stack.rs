use expense_domain::{Toast, ToastKind};
use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub toasts: Vec<Toast>,
    pub duration_ms: u32,
    pub on_dismiss: Callback<u64>,
}

#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast-stack" aria-live="polite">
            {for props.toasts.iter().map(|toast| html! {
                <ToastItem
                    key={toast.id.to_string()}
                    toast={toast.clone()}
                    duration_ms={props.duration_ms}
                    on_dismiss={props.on_dismiss.clone()}
                />
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    duration_ms: u32,
    on_dismiss: Callback<u64>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    // Dismiss after the configured delay; unmounting cancels the timer
    {
        let on_dismiss = props.on_dismiss.clone();
        let id = props.toast.id;
        use_effect_with((id, props.duration_ms), move |&(id, duration_ms)| {
            let timeout = Timeout::new(duration_ms, move || on_dismiss.emit(id));
            move || drop(timeout)
        });
    }

    let on_click = {
        let on_dismiss = props.on_dismiss.clone();
        let id = props.toast.id;
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    let (kind_class, icon) = match props.toast.kind {
        ToastKind::Success => ("toast-success", "✅"),
        ToastKind::Error => ("toast-error", "⚠️"),
    };

    html! {
        <div class={classes!("toast", kind_class)} role="status" onclick={on_click}>
            <span class="toast-icon">{icon}</span>
            <span class="toast-message">{&props.toast.message}</span>
        </div>
    }
}
