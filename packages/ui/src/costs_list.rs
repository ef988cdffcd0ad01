use dioxus::prelude::*;
use store::sort::{cost_sort_presets, sorted};
use store::totals::format_money;
use store::{CostSortField, OtherCost, SortOption};

use crate::icons::{FaPen, FaTrashCan};
use crate::list_parts::{LoadErrorAlert, SkeletonRows, SortHeader};
use crate::notifications::{notify, use_notifications, NoticeLevel};
use crate::views::ModalOverlay;
use crate::{use_ledger, use_tracker_config, CostForm, Icon};

/// Which form the modal shows: `None` adds, `Some` edits.
#[derive(Clone, Debug, PartialEq)]
struct FormTarget(Option<OtherCost>);

#[component]
pub fn CostsList() -> Element {
    let ledger = use_ledger();
    let config = use_tracker_config();
    let mut notifications = use_notifications();
    let mut sort = use_signal(|| SortOption::asc(CostSortField::Description));
    let mut form = use_signal(|| Option::<FormTarget>::None);

    use_effect(move || sort.set(config().display.cost_sort()));

    let state = ledger.costs.read().clone();
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

    let rows: Vec<OtherCost> = sorted(&state.entities, current).into_iter().cloned().collect();

    let delete = move |id: String| async move {
        match ledger.delete_cost(id).await {
            Ok(()) => notify(&mut notifications, NoticeLevel::Success, "Cost deleted", None),
            Err(e) => notify(&mut notifications, NoticeLevel::Error, "Error", Some(&e.to_string())),
        }
    };

    rsx! {
        section {
            class: "panel",
            div {
                class: "panel-header",
                h2 { "Additional Costs" }
                div {
                    class: "panel-actions",
                    select {
                        value: "{current}",
                        onchange: move |evt| {
                            if let Ok(option) = evt.value().parse() {
                                sort.set(option);
                            }
                        },
                        for (option, label) in cost_sort_presets() {
                            option { key: "{option}", value: "{option}", "{label}" }
                        }
                    }
                    button {
                        class: "btn primary",
                        onclick: move |_| form.set(Some(FormTarget(None))),
                        "Add Cost"
                    }
                }
            }

            if state.is_fetching() {
                SkeletonRows {}
            } else if rows.is_empty() {
                div {
                    class: "empty-state",
                    p { "No additional costs added yet" }
                    button {
                        class: "btn primary",
                        onclick: move |_| form.set(Some(FormTarget(None))),
                        "Add Your First Cost"
                    }
                }
            } else {
                table {
                    thead {
                        tr {
                            SortHeader {
                                label: "Description",
                                active: current.field == CostSortField::Description,
                                direction: current.direction,
                                onclick: move |_| sort.set(sort().toggle(CostSortField::Description)),
                            }
                            SortHeader {
                                label: "Amount",
                                numeric: true,
                                active: current.field == CostSortField::Amount,
                                direction: current.direction,
                                onclick: move |_| sort.set(sort().toggle(CostSortField::Amount)),
                            }
                            th { class: "actions", "Actions" }
                        }
                    }
                    tbody {
                        for cost in rows {
                            tr {
                                key: "{cost.id}",
                                class: if state.is_pending(&cost.id) { "pending" } else { "" },
                                td { "{cost.description}" }
                                td { class: "numeric", {format_money(cost.amount, &currency)} }
                                td {
                                    class: "actions",
                                    button {
                                        class: "icon-btn",
                                        aria_label: "Edit cost",
                                        disabled: state.is_pending(&cost.id),
                                        onclick: {
                                            let cost = cost.clone();
                                            move |_| form.set(Some(FormTarget(Some(cost.clone()))))
                                        },
                                        Icon { icon: FaPen, width: 14, height: 14 }
                                    }
                                    button {
                                        class: "icon-btn danger",
                                        aria_label: "Delete cost",
                                        disabled: state.is_pending(&cost.id),
                                        onclick: {
                                            let id = cost.id.clone();
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

        if let Some(FormTarget(current_cost)) = form() {
            ModalOverlay {
                on_close: move |_| form.set(None),
                CostForm {
                    current: current_cost,
                    on_close: move |_| form.set(None),
                }
            }
        }
    }
}
