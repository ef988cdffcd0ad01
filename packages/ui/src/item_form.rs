use dioxus::prelude::*;
use store::validate::{parse_amount, validate_item, ValidationErrors};
use store::ProjectItem;

use crate::notifications::{notify, use_notifications, NoticeLevel};
use crate::use_ledger;

/// Add form when `current` is `None`, edit form otherwise.
#[component]
pub fn ItemForm(
    #[props(!optional)] current: Option<ProjectItem>,
    on_close: EventHandler<()>,
) -> Element {
    let ledger = use_ledger();
    let mut notifications = use_notifications();
    let is_edit = current.is_some();

    let mut name = use_signal(|| current.as_ref().map(|i| i.name.clone()).unwrap_or_default());
    let mut cost = use_signal(|| {
        current
            .as_ref()
            .map(|i| format!("{:.2}", i.cost))
            .unwrap_or_else(|| "0".to_string())
    });
    let mut errors = use_signal(ValidationErrors::new);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |_| {
        let current = current.clone();
        async move {
            let fields = match validate_item(&name(), parse_amount(&cost())) {
                Ok(fields) => fields,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(ValidationErrors::new());
            submitting.set(true);

            let (result, done) = match current {
                Some(item) => (ledger.update_item(item.id, fields.into()).await, "Item updated"),
                None => (ledger.add_item(fields).await.map(|_| ()), "Item added"),
            };
            submitting.set(false);

            match result {
                Ok(()) => {
                    notify(&mut notifications, NoticeLevel::Success, done, None);
                    on_close.call(());
                }
                Err(e) => notify(&mut notifications, NoticeLevel::Error, "Error", Some(&e.to_string())),
            }
        }
    };

    let name_error = errors().get("name").map(str::to_string);
    let cost_error = errors().get("cost").map(str::to_string);

    rsx! {
        div {
            class: "modal-body",
            h2 { if is_edit { "Edit Item" } else { "Add New Item" } }

            div {
                class: if name_error.is_some() { "field invalid" } else { "field" },
                label { r#for: "item-name", "Item Name" }
                input {
                    id: "item-name",
                    r#type: "text",
                    placeholder: "Enter item name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
                if let Some(ref message) = name_error {
                    p { class: "field-error", "{message}" }
                }
            }

            div {
                class: if cost_error.is_some() { "field invalid" } else { "field" },
                label { r#for: "item-cost", "Cost" }
                input {
                    id: "item-cost",
                    r#type: "number",
                    min: "0",
                    step: "0.01",
                    value: "{cost}",
                    oninput: move |evt| cost.set(evt.value()),
                }
                if let Some(ref message) = cost_error {
                    p { class: "field-error", "{message}" }
                }
            }

            div {
                class: "modal-footer",
                button {
                    class: "btn outline",
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                button {
                    class: "btn primary",
                    disabled: submitting(),
                    onclick: handle_submit,
                    if submitting() { "Saving..." } else if is_edit { "Update" } else { "Add" }
                }
            }
        }
    }
}
