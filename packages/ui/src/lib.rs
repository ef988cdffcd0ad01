//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const TRACKER_CSS: Asset = asset!("/assets/styling/tracker.css");

mod auth;
pub use auth::{
    redirect, sign_in, sign_up, use_auth, use_tracker_config, AuthProvider, AuthState,
    LogoutButton,
};

mod remote;
pub use remote::ApiRemote;

mod ledger;
pub use ledger::{use_ledger, Ledger, LedgerProvider};

pub mod notifications;
pub use notifications::{notify, use_notifications, NoticeLevel, NotificationProvider};

mod list_parts;

mod items_list;
pub use items_list::ItemsList;

mod costs_list;
pub use costs_list::CostsList;

mod item_form;
pub use item_form::ItemForm;

mod cost_form;
pub use cost_form::CostForm;

mod summary;
pub use summary::ProjectSummary;

mod header;
pub use header::Header;
