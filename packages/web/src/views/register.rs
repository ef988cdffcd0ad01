//! Registration page view with email/password form.

use dioxus::prelude::*;
use store::validate::{validate_sign_up, ValidationErrors};
use ui::icons::FaDollarSign;
use ui::{
    notify, redirect, sign_up, use_auth, use_notifications, use_tracker_config, Icon, NoticeLevel,
};

use super::fields::{PasswordField, TextField};

/// Register page component.
#[component]
pub fn Register() -> Element {
    let auth = use_auth();
    let config = use_tracker_config();
    let mut notifications = use_notifications();
    let name = use_signal(String::new);
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let confirm_password = use_signal(String::new);
    let mut errors = use_signal(ValidationErrors::new);
    let mut submitting = use_signal(|| false);

    // If already logged in, go to the dashboard
    if !auth().loading && auth().user.is_some() {
        redirect("/");
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            let min_len = config().auth.min_password_length;
            let registration = match validate_sign_up(
                &name(),
                &email(),
                &password(),
                &confirm_password(),
                min_len,
            ) {
                Ok(registration) => registration,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(ValidationErrors::new());

            submitting.set(true);
            match sign_up(auth, registration).await {
                Ok(()) => {
                    notify(
                        &mut notifications,
                        NoticeLevel::Success,
                        "Account created",
                        Some("Your account has been successfully created"),
                    );
                    redirect("/");
                }
                Err(message) => notify(&mut notifications, NoticeLevel::Error, "Error", Some(&message)),
            }
            submitting.set(false);
        });
    };

    let password_hint = format!(
        "Create a password (min {} characters)",
        config().auth.min_password_length
    );

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                header {
                    Icon { icon: FaDollarSign, width: 32, height: 32 }
                    h1 { "Create Account" }
                    p { "Sign up to start tracking your project costs" }
                }

                form {
                    onsubmit: handle_register,
                    TextField {
                        id: "register-name",
                        label: "Name",
                        placeholder: "John Doe",
                        value: name,
                        error: errors().get("name").map(str::to_string),
                    }
                    TextField {
                        id: "register-email",
                        label: "Email",
                        kind: "email",
                        placeholder: "your.email@example.com",
                        value: email,
                        error: errors().get("email").map(str::to_string),
                    }
                    PasswordField {
                        id: "register-password",
                        label: "Password",
                        placeholder: password_hint,
                        value: password,
                        error: errors().get("password").map(str::to_string),
                    }
                    PasswordField {
                        id: "register-confirm",
                        label: "Confirm Password",
                        placeholder: "Confirm your password",
                        value: confirm_password,
                        error: errors().get("confirm_password").map(str::to_string),
                    }
                    button {
                        class: "btn primary full",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Creating account..." } else { "Sign Up" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Already have an account? "
                    a { href: "/login", "Sign in" }
                }
            }
        }
    }
}
