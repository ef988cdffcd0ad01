//! Process-wide `tracker.toml` and the sign-in throttle built from it.

use std::sync::OnceLock;
use std::time::Duration;

use store::TrackerConfig;

use crate::auth::LoginThrottle;

static CONFIG: OnceLock<TrackerConfig> = OnceLock::new();
static THROTTLE: OnceLock<LoginThrottle> = OnceLock::new();

/// Read the config named by `TRACKER_CONFIG` (default `tracker.toml`).
/// A missing file is the default configuration; a malformed one is logged and
/// ignored.
fn load() -> TrackerConfig {
    dotenvy::dotenv().ok();
    let path = std::env::var("TRACKER_CONFIG")
        .unwrap_or_else(|_| TrackerConfig::filename().to_string());

    let text = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("no config at {}: {}", path, e);
            return TrackerConfig::default();
        }
    };

    match TrackerConfig::from_toml(&text) {
        Ok(config) => {
            tracing::info!("loaded config from {}", path);
            config
        }
        Err(e) => {
            tracing::error!("invalid config {}: {}", path, e);
            TrackerConfig::default()
        }
    }
}

pub fn tracker_config() -> &'static TrackerConfig {
    CONFIG.get_or_init(load)
}

pub fn login_throttle() -> &'static LoginThrottle {
    THROTTLE.get_or_init(|| {
        let auth = &tracker_config().auth;
        LoginThrottle::new(auth.max_failed_logins, Duration::from_secs(auth.lockout_secs))
    })
}
