use std::time::Duration;

use serde::{Deserialize, Deserializer};

/// Deserialize a human-readable duration such as `"1s"` or `"250ms"`
pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    duration_str::parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid duration '{raw}': {e}")))
}
