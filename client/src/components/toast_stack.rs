//! Toast stack rendering the UI state's notification queue.

#[cfg(test)]
#[path = "toast_stack_test.rs"]
mod toast_stack_test;

use leptos::prelude::*;

use vetdesk::NotifyKind;

use crate::state::ui::{Toast, UiState};

/// CSS class for a toast of the given severity.
#[must_use]
pub fn toast_class(kind: NotifyKind) -> &'static str {
    match kind {
        NotifyKind::Info => "toast toast--info",
        NotifyKind::Success => "toast toast--success",
        NotifyKind::Warning => "toast toast--warning",
        NotifyKind::Error => "toast toast--error",
    }
}

/// Notification stack; newest toasts render last.
#[component]
pub fn ToastStack(ui: RwSignal<UiState>) -> impl IntoView {
    view! {
        <div class="toast-stack">
            <For each=move || ui.get().toasts key=|toast| toast.id let:toast>
                <ToastCard ui toast/>
            </For>
        </div>
    }
}

#[component]
fn ToastCard(ui: RwSignal<UiState>, toast: Toast) -> impl IntoView {
    let id = toast.id;
    view! {
        <div class=toast_class(toast.kind)>
            <span class="toast__message">{toast.message}</span>
            <button
                class="toast__dismiss"
                on:click=move |_| ui.update(|state| state.dismiss_toast(id))
            >
                "×"
            </button>
        </div>
    }
}
