use dioxus::prelude::*;
use store::sort::{item_sort_presets, sorted};
use store::totals::format_money;
use store::{ItemSortField, ProjectItem, SortOption};

use crate::icons::{FaPen, FaTrashCan};
use crate::list_parts::{LoadErrorAlert, SkeletonRows, SortHeader};
use crate::notifications::{notify, use_notifications, NoticeLevel};
use crate::views::ModalOverlay;
use crate::{use_ledger, use_tracker_config, Icon, ItemForm};

/// Which form the modal shows: `None` adds, `Some` edits.
#[derive(Clone, Debug, PartialEq)]
struct FormTarget(Option<ProjectItem>);

#[component]
pub fn ItemsList() -> Element {
    let ledger = use_ledger();
    let config = use_tracker_config();
    let mut notifications = use_notifications();
    let mut sort = use_signal(|| SortOption::asc(ItemSortField::Name));
    let mut form = use_signal(|| Option::<FormTarget>::None);

    use_effect(move || sort.set(config().display.item_sort()));

    let state = ledger.items.read().clone();
    let currency = config().display.currency.clone();
    let current = sort();

    if let Some(message) = state.load_error() {
        return rsx! {
            LoadErrorAlert {
                message: message.to_string(),
                on_retry: move |_| {
                    spawn(ledger.reload(notifications));
                },
            }
        };
    }

    let rows: Vec<ProjectItem> = sorted(&state.entities, current).into_iter().cloned().collect();

    let delete = move |id: String| async move {
        match ledger.delete_item(id).await {
            Ok(()) => notify(&mut notifications, NoticeLevel::Success, "Item deleted", None),
            Err(e) => notify(&mut notifications, NoticeLevel::Error, "Error", Some(&e.to_string())),
        }
    };

    rsx! {
        section {
            class: "panel",
            div {
                class: "panel-header",
                h2 { "Project Items" }
                div {
                    class: "panel-actions",
                    select {
                        value: "{current}",
                        onchange: move |evt| {
                            if let Ok(option) = evt.value().parse() {
                                sort.set(option);
                            }
                        },
                        for (option, label) in item_sort_presets() {
                            option { key: "{option}", value: "{option}", "{label}" }
                        }
                    }
                    button {
                        class: "btn primary",
                        onclick: move |_| form.set(Some(FormTarget(None))),
                        "Add Item"
                    }
                }
            }

            if state.is_fetching() {
                SkeletonRows {}
            } else if rows.is_empty() {
                div {
                    class: "empty-state",
                    p { "No items added yet" }
                    button {
                        class: "btn primary",
                        onclick: move |_| form.set(Some(FormTarget(None))),
                        "Add Your First Item"
                    }
                }
            } else {
                table {
                    thead {
                        tr {
                            SortHeader {
                                label: "Item Name",
                                active: current.field == ItemSortField::Name,
                                direction: current.direction,
                                onclick: move |_| sort.set(sort().toggle(ItemSortField::Name)),
                            }
                            SortHeader {
                                label: "Cost",
                                numeric: true,
                                active: current.field == ItemSortField::Cost,
                                direction: current.direction,
                                onclick: move |_| sort.set(sort().toggle(ItemSortField::Cost)),
                            }
                            th { class: "actions", "Actions" }
                        }
                    }
                    tbody {
                        for item in rows {
                            tr {
                                key: "{item.id}",
                                class: if state.is_pending(&item.id) { "pending" } else { "" },
                                td { "{item.name}" }
                                td { class: "numeric", {format_money(item.cost, &currency)} }
                                td {
                                    class: "actions",
                                    button {
                                        class: "icon-btn",
                                        aria_label: "Edit item",
                                        disabled: state.is_pending(&item.id),
                                        onclick: {
                                            let item = item.clone();
                                            move |_| form.set(Some(FormTarget(Some(item.clone()))))
                                        },
                                        Icon { icon: FaPen, width: 14, height: 14 }
                                    }
                                    button {
                                        class: "icon-btn danger",
                                        aria_label: "Delete item",
                                        disabled: state.is_pending(&item.id),
                                        onclick: {
                                            let id = item.id.clone();
                                            move |_| delete(id.clone())
                                        },
                                        Icon { icon: FaTrashCan, width: 14, height: 14 }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some(FormTarget(current_item)) = form() {
            ModalOverlay {
                on_close: move |_| form.set(None),
                ItemForm {
                    current: current_item,
                    on_close: move |_| form.set(None),
                }
            }
        }
    }
}
