use dioxus::prelude::*;

use crate::icons::FaDollarSign;
use crate::{use_auth, Icon, LogoutButton};

#[component]
pub fn Header() -> Element {
    let auth = use_auth();
    let name = auth().user.map(|u| u.display_name().to_string());

    rsx! {
        header {
            class: "app-header",
            div {
                class: "brand",
                Icon { icon: FaDollarSign, width: 20, height: 20 }
                span { "Project Cost Tracker" }
            }
            if let Some(name) = name {
                div {
                    class: "account",
                    span { class: "account-name", "{name}" }
                    LogoutButton { class: "btn ghost" }
                }
            }
        }
    }
}
