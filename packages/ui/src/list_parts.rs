//! Pieces shared by the items and costs tables.

use dioxus::prelude::*;
use store::SortDirection;

use crate::icons::{FaChevronDown, FaChevronUp, FaTriangleExclamation};
use crate::Icon;

/// Clickable column header. Shows the direction arrow only when active.
#[component]
pub fn SortHeader(
    label: String,
    active: bool,
    direction: SortDirection,
    #[props(default)] numeric: bool,
    onclick: EventHandler<()>,
) -> Element {
    rsx! {
        th {
            class: if numeric { "sortable numeric" } else { "sortable" },
            onclick: move |_| onclick.call(()),
            span { "{label}" }
            if active {
                match direction {
                    SortDirection::Asc => rsx! { Icon { icon: FaChevronUp, width: 12, height: 12 } },
                    SortDirection::Desc => rsx! { Icon { icon: FaChevronDown, width: 12, height: 12 } },
                }
            }
        }
    }
}

#[component]
pub fn SkeletonRows() -> Element {
    rsx! {
        div {
            class: "skeleton-rows",
            for i in 0..3 {
                div { key: "{i}", class: "skeleton-row" }
            }
        }
    }
}

/// Replaces a list whose load failed.
#[component]
pub fn LoadErrorAlert(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "alert error",
            role: "alert",
            Icon { icon: FaTriangleExclamation, width: 16, height: 16 }
            strong { "{message}" }
            button {
                class: "btn ghost",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}
