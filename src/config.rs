//! Runtime configuration for the locker.

use std::time::Duration;
use tracing::{info, warn};

/// Tunables for the store actor and the lifecycle rules it enforces.
#[derive(Clone, Debug, PartialEq)]
pub struct LockerConfig {
    /// Capacity of the store actor's request channel.
    pub channel_capacity: usize,
    /// How long a client waits for the store before giving up.
    pub request_timeout: Duration,
    /// Number of digits in a generated pickup code.
    pub pickup_code_length: usize,
    /// Age in days after which the sweep flags an active parcel.
    pub expiry_days: u32,
    /// Age in days after which an active parcel shows up on the retention list.
    pub retention_days: u32,
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_filter: String,
}

/// Accepted range for `pickup_code_length`.
pub const PICKUP_CODE_LENGTHS: std::ops::RangeInclusive<usize> = 4..=12;

/// Accepted range for `expiry_days` and `retention_days`.
pub const THRESHOLD_DAYS: std::ops::RangeInclusive<u32> = 1..=36_500;

impl Default for LockerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            request_timeout: Duration::from_secs(5),
            pickup_code_length: 6,
            expiry_days: 3,
            retention_days: 7,
            log_filter: "info".to_string(),
        }
    }
}

impl LockerConfig {
    /// Creates a small config for testing.
    pub fn for_testing() -> Self {
        Self {
            channel_capacity: 16,
            request_timeout: Duration::from_secs(2),
            log_filter: "debug".to_string(),
            ..Default::default()
        }
    }

    /// Defaults overridden by `LOCKER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `LOCKER_*`
    /// key. Values that do not parse, or fall outside their range, are logged
    /// and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(n) = parse_var::<usize>(&lookup, "LOCKER_CHANNEL_CAPACITY") {
            if n > 0 {
                config.channel_capacity = n;
            } else {
                warn!("LOCKER_CHANNEL_CAPACITY must be positive");
            }
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "LOCKER_REQUEST_TIMEOUT_MS") {
            if ms > 0 {
                config.request_timeout = Duration::from_millis(ms);
            } else {
                warn!("LOCKER_REQUEST_TIMEOUT_MS must be positive");
            }
        }
        if let Some(len) = parse_var::<usize>(&lookup, "LOCKER_PICKUP_CODE_LENGTH") {
            if PICKUP_CODE_LENGTHS.contains(&len) {
                config.pickup_code_length = len;
            } else {
                warn!(len, "LOCKER_PICKUP_CODE_LENGTH out of range 4..=12");
            }
        }
        if let Some(days) = parse_var::<u32>(&lookup, "LOCKER_EXPIRY_DAYS") {
            if THRESHOLD_DAYS.contains(&days) {
                config.expiry_days = days;
            } else {
                warn!(days, "LOCKER_EXPIRY_DAYS out of range 1..=36500");
            }
        }
        if let Some(days) = parse_var::<u32>(&lookup, "LOCKER_RETENTION_DAYS") {
            if THRESHOLD_DAYS.contains(&days) {
                config.retention_days = days;
            } else {
                warn!(days, "LOCKER_RETENTION_DAYS out of range 1..=36500");
            }
        }
        config.log_filter = log_filter_from_lookup(&lookup);

        info!(?config, "Loaded locker configuration");
        config
    }
}

/// The `LOCKER_LOG` directive, or the default one when unset or blank. Needs
/// no subscriber, unlike [`LockerConfig::from_env`].
pub fn log_filter_from_env() -> String {
    log_filter_from_lookup(&|key: &str| std::env::var(key).ok())
}

fn log_filter_from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> String {
    lookup("LOCKER_LOG")
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| LockerConfig::default().log_filter)
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparsable setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LockerConfig::default();
        assert_eq!(config.pickup_code_length, 6);
        assert_eq!(config.expiry_days, 3);
        assert_eq!(config.retention_days, 7);
    }

    #[test]
    fn test_overrides_apply() {
        let config = LockerConfig::from_lookup(lookup_from(&[
            ("LOCKER_REQUEST_TIMEOUT_MS", "250"),
            ("LOCKER_PICKUP_CODE_LENGTH", "8"),
            ("LOCKER_EXPIRY_DAYS", "5"),
            ("LOCKER_LOG", "parcel_locker=debug"),
        ]));

        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.pickup_code_length, 8);
        assert_eq!(config.expiry_days, 5);
        assert_eq!(config.retention_days, 7);
        assert_eq!(config.log_filter, "parcel_locker=debug");
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let config = LockerConfig::from_lookup(lookup_from(&[
            ("LOCKER_CHANNEL_CAPACITY", "0"),
            ("LOCKER_PICKUP_CODE_LENGTH", "99"),
            ("LOCKER_RETENTION_DAYS", "a week"),
        ]));

        assert_eq!(config, LockerConfig::default());
    }

    #[test]
    fn test_thresholds_beyond_range_are_ignored() {
        let config = LockerConfig::from_lookup(lookup_from(&[
            ("LOCKER_EXPIRY_DAYS", "4294967295"),
            ("LOCKER_RETENTION_DAYS", "36501"),
        ]));
        assert_eq!(config.expiry_days, 3);
        assert_eq!(config.retention_days, 7);

        let config = LockerConfig::from_lookup(lookup_from(&[("LOCKER_RETENTION_DAYS", "36500")]));
        assert_eq!(config.retention_days, 36_500);
    }

    #[test]
    fn test_log_filter_resolves_without_full_config() {
        assert_eq!(log_filter_from_lookup(&lookup_from(&[])), "info");
        assert_eq!(log_filter_from_lookup(&lookup_from(&[("LOCKER_LOG", "  ")])), "info");
        assert_eq!(
            log_filter_from_lookup(&lookup_from(&[("LOCKER_LOG", "parcel_locker=trace")])),
            "parcel_locker=trace"
        );
    }
}
