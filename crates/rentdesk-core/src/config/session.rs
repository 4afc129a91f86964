//! Session lifecycle configuration.

use serde::{Deserialize, Serialize};

/// Session lifecycle configuration.
///
/// There is deliberately no cap on concurrent sessions per user: multiple
/// devices are expected, and issuance is not rate-limited here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session lifetime in days. Fixed at issuance; activity does not
    /// extend it.
    #[serde(default = "default_ttl_days")]
    pub ttl_days: u32,
    /// Interval for the expired-session sweep in minutes.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_days: default_ttl_days(),
            sweep_interval_minutes: default_sweep_interval(),
        }
    }
}

fn default_ttl_days() -> u32 {
    7
}

fn default_sweep_interval() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_issuance_horizon() {
        let config = SessionConfig::default();
        assert_eq!(config.ttl_days, 7);
        assert_eq!(config.sweep_interval_minutes, 15);
    }
}
