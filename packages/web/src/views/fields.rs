//! Labelled inputs for the auth forms.

use dioxus::prelude::*;
use ui::icons::{FaEye, FaEyeSlash};
use ui::Icon;

#[component]
pub fn TextField(
    id: String,
    label: String,
    #[props(default = "text".to_string())] kind: String,
    placeholder: String,
    value: Signal<String>,
    #[props(!optional)] error: Option<String>,
) -> Element {
    let mut value = value;
    rsx! {
        div {
            class: if error.is_some() { "field invalid" } else { "field" },
            label { r#for: "{id}", "{label}" }
            input {
                id: "{id}",
                r#type: "{kind}",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt| value.set(evt.value()),
            }
            if let Some(ref message) = error {
                p { class: "field-error", "{message}" }
            }
        }
    }
}

/// Password input with a show/hide toggle.
#[component]
pub fn PasswordField(
    id: String,
    label: String,
    placeholder: String,
    value: Signal<String>,
    #[props(!optional)] error: Option<String>,
) -> Element {
    let mut value = value;
    let mut visible = use_signal(|| false);
    rsx! {
        div {
            class: if error.is_some() { "field invalid" } else { "field" },
            label { r#for: "{id}", "{label}" }
            div {
                class: "password-row",
                input {
                    id: "{id}",
                    r#type: if visible() { "text" } else { "password" },
                    placeholder: "{placeholder}",
                    value: "{value}",
                    oninput: move |evt| value.set(evt.value()),
                }
                button {
                    r#type: "button",
                    class: "icon-btn",
                    aria_label: if visible() { "Hide password" } else { "Show password" },
                    onclick: move |_| visible.toggle(),
                    if visible() {
                        Icon { icon: FaEyeSlash, width: 16, height: 16 }
                    } else {
                        Icon { icon: FaEye, width: 16, height: 16 }
                    }
                }
            }
            if let Some(ref message) = error {
                p { class: "field-error", "{message}" }
            }
        }
    }
}
