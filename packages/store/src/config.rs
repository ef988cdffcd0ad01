//! # Deployment configuration — `tracker.toml`
//!
//! Read once by the server at startup (path from `TRACKER_CONFIG`, default
//! [`TrackerConfig::filename`]) and handed to the client through
//! `get_tracker_config`. A missing or empty file is the default configuration.
//!
//! ```toml
//! [display]
//! currency = "$"
//! default_item_sort = "name-asc"
//! default_cost_sort = "description-asc"
//!
//! [auth]
//! min_password_length = 6
//! max_failed_logins = 5
//! lockout_secs = 900
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`TrackerConfig`] | Top-level config, builders and TOML (de)serialisation. |
//! | [`DisplayConfig`] | Currency symbol and initial list orderings. |
//! | [`AuthConfig`] | Password length floor and sign-in throttling. |

use serde::{Deserialize, Serialize};

use crate::sort::{CostSortField, ItemSortField, SortOption};

/// Top-level configuration stored in `tracker.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Select-box encoding, e.g. `"cost-desc"`. Unknown values fall back to
    /// name ascending.
    #[serde(default = "default_item_sort")]
    pub default_item_sort: String,
    #[serde(default = "default_cost_sort")]
    pub default_cost_sort: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    /// Failed sign-ins tolerated per email inside the lockout window.
    #[serde(default = "default_max_failed_logins")]
    pub max_failed_logins: u32,
    #[serde(default = "default_lockout_secs")]
    pub lockout_secs: u64,
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_item_sort() -> String {
    "name-asc".to_string()
}

fn default_cost_sort() -> String {
    "description-asc".to_string()
}

fn default_min_password_length() -> usize {
    6
}

fn default_max_failed_logins() -> u32 {
    5
}

fn default_lockout_secs() -> u64 {
    900
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            default_item_sort: default_item_sort(),
            default_cost_sort: default_cost_sort(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
            max_failed_logins: default_max_failed_logins(),
            lockout_secs: default_lockout_secs(),
        }
    }
}

impl DisplayConfig {
    pub fn item_sort(&self) -> SortOption<ItemSortField> {
        self.default_item_sort
            .parse()
            .unwrap_or(SortOption::asc(ItemSortField::Name))
    }

    pub fn cost_sort(&self) -> SortOption<CostSortField> {
        self.default_cost_sort
            .parse()
            .unwrap_or(SortOption::asc(CostSortField::Description))
    }
}

impl TrackerConfig {
    /// Builder method to set the currency symbol.
    pub fn with_currency(mut self, currency: &str) -> Self {
        self.display.currency = currency.to_string();
        self
    }

    /// Builder method to set the sign-in throttle.
    pub fn with_lockout(mut self, max_failed_logins: u32, lockout_secs: u64) -> Self {
        self.auth.max_failed_logins = max_failed_logins;
        self.auth.lockout_secs = lockout_secs;
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "tracker.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;

    #[test]
    fn test_empty_file_is_default() {
        let config = TrackerConfig::from_toml("").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.display.currency, "$");
        assert_eq!(config.auth.max_failed_logins, 5);
        assert_eq!(config.auth.lockout_secs, 900);
    }

    #[test]
    fn test_partial_sections() {
        let config = TrackerConfig::from_toml(
            "[display]\ncurrency = \"€\"\ndefault_item_sort = \"cost-desc\"\n",
        )
        .unwrap();
        assert_eq!(config.display.currency, "€");
        assert_eq!(config.display.default_cost_sort, "description-asc");
        assert_eq!(config.auth.min_password_length, 6);

        let sort = config.display.item_sort();
        assert_eq!(sort.field, ItemSortField::Cost);
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_bad_sort_falls_back() {
        let mut config = TrackerConfig::default();
        config.display.default_cost_sort = "colour-up".into();
        assert_eq!(
            config.display.cost_sort(),
            SortOption::asc(CostSortField::Description)
        );
    }

    #[test]
    fn test_builders_survive_toml() {
        let config = TrackerConfig::default()
            .with_currency("£")
            .with_lockout(3, 60);
        let parsed = TrackerConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
