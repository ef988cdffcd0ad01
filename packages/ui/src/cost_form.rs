use dioxus::prelude::*;
use store::validate::{parse_amount, validate_cost, ValidationErrors};
use store::OtherCost;

use crate::notifications::{notify, use_notifications, NoticeLevel};
use crate::use_ledger;

/// Add form when `current` is `None`, edit form otherwise.
#[component]
pub fn CostForm(
    #[props(!optional)] current: Option<OtherCost>,
    on_close: EventHandler<()>,
) -> Element {
    let ledger = use_ledger();
    let mut notifications = use_notifications();
    let is_edit = current.is_some();

    let mut description = use_signal(|| {
        current
            .as_ref()
            .map(|c| c.description.clone())
            .unwrap_or_default()
    });
    let mut amount = use_signal(|| {
        current
            .as_ref()
            .map(|c| format!("{:.2}", c.amount))
            .unwrap_or_else(|| "0".to_string())
    });
    let mut errors = use_signal(ValidationErrors::new);
    let mut submitting = use_signal(|| false);

    let handle_submit = move |_| {
        let current = current.clone();
        async move {
            let fields = match validate_cost(&description(), parse_amount(&amount())) {
                Ok(fields) => fields,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(ValidationErrors::new());
            submitting.set(true);

            let (result, done) = match current {
                Some(cost) => (ledger.update_cost(cost.id, fields.into()).await, "Cost updated"),
                None => (ledger.add_cost(fields).await.map(|_| ()), "Cost added"),
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

    let description_error = errors().get("description").map(str::to_string);
    let amount_error = errors().get("amount").map(str::to_string);

    rsx! {
        div {
            class: "modal-body",
            h2 { if is_edit { "Edit Cost" } else { "Add New Cost" } }

            div {
                class: if description_error.is_some() { "field invalid" } else { "field" },
                label { r#for: "cost-description", "Description" }
                input {
                    id: "cost-description",
                    r#type: "text",
                    placeholder: "Enter cost description (e.g., Shipping, Tax)",
                    value: "{description}",
                    oninput: move |evt| description.set(evt.value()),
                }
                if let Some(ref message) = description_error {
                    p { class: "field-error", "{message}" }
                }
            }

            div {
                class: if amount_error.is_some() { "field invalid" } else { "field" },
                label { r#for: "cost-amount", "Amount" }
                input {
                    id: "cost-amount",
                    r#type: "number",
                    min: "0",
                    step: "0.01",
                    value: "{amount}",
                    oninput: move |evt| amount.set(evt.value()),
                }
                if let Some(ref message) = amount_error {
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
