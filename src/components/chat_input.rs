//! Message composer for the conversation view.

#[cfg(test)]
#[path = "chat_input_test.rs"]
mod chat_input_test;

use leptos::prelude::*;

/// Trimmed text to submit, or `None` when the composer should stay put.
fn submittable(text: &str, disabled: bool) -> Option<String> {
    let trimmed = text.trim();
    (!disabled && !trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Text input with send button. Disabled while a reply is pending.
#[component]
pub fn ChatInput(on_send: Callback<String>, #[prop(into)] disabled: Signal<bool>) -> impl IntoView {
    let input = RwSignal::new(String::new());

    let do_send = move || {
        if let Some(text) = submittable(&input.get(), disabled.get()) {
            on_send.run(text);
            input.set(String::new());
        }
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    let can_send = move || submittable(&input.get(), disabled.get()).is_some();

    view! {
        <div class="chat-input">
            <input
                class="chat-input__field"
                type="text"
                placeholder="Type your message..."
                disabled=move || disabled.get()
                prop:value=move || input.get()
                on:input=move |ev| input.set(event_target_value(&ev))
                on:keydown=on_keydown
            />
            <button class="chat-input__send" on:click=move |_| do_send() disabled=move || !can_send()>
                "Send"
            </button>
        </div>
    }
}
