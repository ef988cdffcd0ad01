//! # Authentication fault codes
//!
//! The server reports sign-in and sign-up failures as a stable code
//! (`auth/wrong-password`, ...) inside the `ServerFnError` text. The client
//! never shows that text; it looks the code up with [`AuthErrorCode::find_in`]
//! and displays [`AuthErrorCode::message`] instead.

/// A provider-level authentication fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthErrorCode {
    #[error("auth/user-not-found")]
    UserNotFound,
    #[error("auth/wrong-password")]
    WrongPassword,
    #[error("auth/too-many-requests")]
    TooManyRequests,
    #[error("auth/email-already-in-use")]
    EmailAlreadyInUse,
    #[error("auth/invalid-email")]
    InvalidEmail,
    #[error("auth/weak-password")]
    WeakPassword,
}

const UNKNOWN_ERROR: &str = "An unknown error occurred";

impl AuthErrorCode {
    pub const ALL: [AuthErrorCode; 6] = [
        AuthErrorCode::UserNotFound,
        AuthErrorCode::WrongPassword,
        AuthErrorCode::TooManyRequests,
        AuthErrorCode::EmailAlreadyInUse,
        AuthErrorCode::InvalidEmail,
        AuthErrorCode::WeakPassword,
    ];

    /// Message shown to the user. Unknown email and wrong password read the
    /// same so the form does not reveal which accounts exist.
    pub fn message(self) -> &'static str {
        match self {
            AuthErrorCode::UserNotFound | AuthErrorCode::WrongPassword => {
                "Invalid email or password"
            }
            AuthErrorCode::TooManyRequests => {
                "Too many failed login attempts. Please try again later"
            }
            AuthErrorCode::EmailAlreadyInUse => "This email is already in use",
            AuthErrorCode::InvalidEmail => "Invalid email address",
            AuthErrorCode::WeakPassword => "Password is too weak",
        }
    }

    /// First code mentioned in an error string.
    pub fn find_in(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|code| text.contains(&code.to_string()))
    }
}

/// User-facing message for a failed sign-in, sign-up or sign-out call.
pub fn auth_error_message(text: &str) -> &'static str {
    AuthErrorCode::find_in(text)
        .map(AuthErrorCode::message)
        .unwrap_or(UNKNOWN_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_email_reads_as_bad_credentials() {
        let raw = format!("error running server function: {}", AuthErrorCode::UserNotFound);
        assert_eq!(auth_error_message(&raw), "Invalid email or password");
        assert_eq!(
            auth_error_message("auth/wrong-password"),
            "Invalid email or password"
        );
    }

    #[test]
    fn test_each_code_has_a_distinct_lookup() {
        for code in AuthErrorCode::ALL {
            assert_eq!(AuthErrorCode::find_in(&code.to_string()), Some(code));
        }
        assert_eq!(
            auth_error_message("auth/email-already-in-use"),
            "This email is already in use"
        );
        assert_eq!(auth_error_message("auth/weak-password"), "Password is too weak");
    }

    #[test]
    fn test_unknown_text_falls_back() {
        assert_eq!(auth_error_message("connection reset"), UNKNOWN_ERROR);
        assert_eq!(AuthErrorCode::find_in(""), None);
    }
}
