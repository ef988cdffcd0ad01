use dioxus::prelude::*;
use store::totals::{format_money, pluralize};

use crate::{use_ledger, use_tracker_config};

/// The three derived totals with entry counts.
#[component]
pub fn ProjectSummary() -> Element {
    let ledger = use_ledger();
    let config = use_tracker_config();

    let totals = ledger.totals();
    let loading = ledger.items.read().is_fetching() || ledger.costs.read().is_fetching();
    let currency = config().display.currency.clone();
    let today = chrono::Local::now().format("%-m/%-d/%Y").to_string();

    rsx! {
        section {
            class: "summary",
            h2 { "Project Summary" }
            div {
                class: "summary-grid",
                div {
                    class: "stat",
                    span { class: "stat-label", "Items Total" }
                    if loading {
                        div { class: "skeleton-stat" }
                    } else {
                        span { class: "stat-number items", {format_money(totals.items_total, &currency)} }
                    }
                    span { class: "stat-help", {pluralize(totals.item_count, "item")} }
                }
                div {
                    class: "stat",
                    span { class: "stat-label", "Additional Costs" }
                    if loading {
                        div { class: "skeleton-stat" }
                    } else {
                        span { class: "stat-number costs", {format_money(totals.costs_total, &currency)} }
                    }
                    span { class: "stat-help", {pluralize(totals.cost_count, "cost")} }
                }
                div {
                    class: "stat grand",
                    span { class: "stat-label", "Total Project Cost" }
                    if loading {
                        div { class: "skeleton-stat" }
                    } else {
                        span { class: "stat-number grand", {format_money(totals.grand_total, &currency)} }
                    }
                }
            }
            div {
                class: "summary-footer",
                span { "Last updated: {today}" }
                span { "{totals.entry_count()} total entries" }
            }
        }
    }
}
