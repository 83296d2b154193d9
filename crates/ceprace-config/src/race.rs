use std::time::Duration;

use serde::Deserialize;

/// Race selector configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RaceConfig {
    /// Overall bound on the race, across every provider
    #[serde(default = "default_timeout", with = "crate::duration")]
    pub timeout: Duration,
    /// How a single provider failure affects the race
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// What to do when one provider fails before any winner is known
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Drop the failed provider and keep waiting for the others
    #[default]
    FirstSuccess,
    /// Abort the whole race with the first provider error
    FailFast,
}

const fn default_timeout() -> Duration {
    Duration::from_secs(100)
}
