use dioxus::prelude::*;

use crate::auth::redirect;
use crate::{use_auth, CostsList, Header, ItemsList, LedgerProvider, ProjectSummary};

/// Signed-in landing page. Sends anonymous visitors to `/login`.
#[component]
pub fn DashboardView() -> Element {
    let auth = use_auth();

    if auth().loading {
        return rsx! {
            div { class: "page-loading", "Loading..." }
        };
    }
    if auth().user.is_none() {
        redirect("/login");
        return rsx! {};
    }

    rsx! {
        LedgerProvider {
            Header {}
            main {
                class: "dashboard",
                h1 { "Project Dashboard" }
                ProjectSummary {}
                div {
                    class: "dashboard-lists",
                    ItemsList {}
                    CostsList {}
                }
            }
        }
    }
}
