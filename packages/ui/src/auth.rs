//! Authentication context and hooks for the UI.

use api::{auth_error_message, UserInfo};
use dioxus::prelude::*;
use store::validate::{Credentials, Registration};
use store::TrackerConfig;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The server's `tracker.toml`, defaults until it arrives.
pub fn use_tracker_config() -> Signal<TrackerConfig> {
    use_context::<Signal<TrackerConfig>>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);
    let mut config = use_signal(TrackerConfig::default);

    // Fetch the current user on mount
    let _ = use_resource(move || async move {
        match api::get_current_user().await {
            Ok(user) => auth_state.set(AuthState {
                user,
                loading: false,
            }),
            Err(e) => {
                tracing::warn!("Failed to read session: {}", e);
                auth_state.set(AuthState {
                    user: None,
                    loading: false,
                });
            }
        }
    });

    let _ = use_resource(move || async move {
        match api::get_tracker_config().await {
            Ok(loaded) => config.set(loaded),
            Err(e) => tracing::warn!("Using default config: {}", e),
        }
    });

    use_context_provider(|| auth_state);
    use_context_provider(|| config);

    rsx! {
        {children}
    }
}

fn signed_in(mut auth_state: Signal<AuthState>, user: UserInfo) {
    auth_state.set(AuthState {
        user: Some(user),
        loading: false,
    });
}

/// Sign in with already validated credentials. The error is the message to
/// show, never the raw server text.
pub async fn sign_in(auth_state: Signal<AuthState>, credentials: Credentials) -> Result<(), String> {
    match api::login_password(credentials.email, credentials.password).await {
        Ok(user) => {
            signed_in(auth_state, user);
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Sign-in failed: {}", e);
            Err(auth_error_message(&e.to_string()).to_string())
        }
    }
}

/// Create an account and sign into it.
pub async fn sign_up(auth_state: Signal<AuthState>, registration: Registration) -> Result<(), String> {
    match api::register(registration.email, registration.password, registration.name).await {
        Ok(user) => {
            signed_in(auth_state, user);
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Sign-up failed: {}", e);
            Err(auth_error_message(&e.to_string()).to_string())
        }
    }
}

/// Send the browser to `path`.
pub fn redirect(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!("redirect to {} ignored off the web", path);
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        match api::logout().await {
            Ok(()) => {
                auth_state.set(AuthState {
                    user: None,
                    loading: false,
                });
                redirect("/login");
            }
            Err(e) => tracing::error!("Failed to log out: {}", e),
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            crate::Icon { width: 14, height: 14, icon: crate::icons::FaRightFromBracket }
            span { "{label}" }
        }
    }
}
