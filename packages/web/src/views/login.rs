//! Login page view with email/password form.

use dioxus::prelude::*;
use store::validate::{validate_sign_in, ValidationErrors};
use ui::icons::FaDollarSign;
use ui::{
    notify, redirect, sign_in, use_auth, use_notifications, use_tracker_config, Icon, NoticeLevel,
};

use super::fields::{PasswordField, TextField};

/// Login page component.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let config = use_tracker_config();
    let mut notifications = use_notifications();
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let mut errors = use_signal(ValidationErrors::new);
    let mut submitting = use_signal(|| false);

    // If already logged in, go to the dashboard
    if !auth().loading && auth().user.is_some() {
        redirect("/");
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let min_len = config().auth.min_password_length;
            let credentials = match validate_sign_in(&email(), &password(), min_len) {
                Ok(credentials) => credentials,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(ValidationErrors::new());

            submitting.set(true);
            match sign_in(auth, credentials).await {
                Ok(()) => {
                    notify(
                        &mut notifications,
                        NoticeLevel::Success,
                        "Success",
                        Some("You have successfully logged in"),
                    );
                    redirect("/");
                }
                Err(message) => notify(&mut notifications, NoticeLevel::Error, "Error", Some(&message)),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                header {
                    Icon { icon: FaDollarSign, width: 32, height: 32 }
                    h1 { "Welcome Back" }
                    p { "Sign in to your account to continue" }
                }

                form {
                    onsubmit: handle_login,
                    TextField {
                        id: "login-email",
                        label: "Email",
                        kind: "email",
                        placeholder: "your.email@example.com",
                        value: email,
                        error: errors().get("email").map(str::to_string),
                    }
                    PasswordField {
                        id: "login-password",
                        label: "Password",
                        placeholder: "Enter your password",
                        value: password,
                        error: errors().get("password").map(str::to_string),
                    }
                    button {
                        class: "btn primary full",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Signing in..." } else { "Sign In" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Don't have an account? "
                    a { href: "/register", "Sign up" }
                }
            }
        }
    }
}
