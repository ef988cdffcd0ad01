//! Email + password authentication: hashing, session keys, fault codes and
//! the sign-in throttle.

mod errors;
#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod session;
#[cfg(any(feature = "server", test))]
mod throttle;

pub use errors::{auth_error_message, AuthErrorCode};
#[cfg(feature = "server")]
pub use password::{hash_password, verify_password};
#[cfg(feature = "server")]
pub use session::{session_user_id, SESSION_USER_ID_KEY};
#[cfg(any(feature = "server", test))]
pub use throttle::LoginThrottle;
