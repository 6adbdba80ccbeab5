//! Scheduler configuration and environment variable overrides
//!
//! Settings are resolved with the precedence CLI argument > environment
//! variable > config file (see config_file module) > built-in default.
//!
//! Environment variables (all optional):
//! - HINDSIGHT_BREAK_INTERVAL: Override break interval from config file
//! - HINDSIGHT_DISMISS_DELAY: Override dismiss delay from config file

use crate::constants::{
    BREAK_INTERVAL_DEFAULT_SECONDS, BREAK_INTERVAL_MAX_SECONDS, BREAK_INTERVAL_MIN_SECONDS,
    DISMISS_DELAY_DEFAULT_SECONDS, DISMISS_DELAY_MAX_SECONDS, DISMISS_DELAY_MIN_SECONDS,
    QUICK_BREAK_INTERVAL_SECONDS, QUICK_DISMISS_DELAY_SECONDS,
};
use log::{debug, info, warn};
use std::env;
use std::time::Duration;

pub const BREAK_INTERVAL_ENV: &str = "HINDSIGHT_BREAK_INTERVAL";
pub const DISMISS_DELAY_ENV: &str = "HINDSIGHT_DISMISS_DELAY";

/// Timing parameters of the break scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Time from the end of one break (or start/resume) to the next break
    pub break_interval: Duration,
    /// Minimum time a break stays up before it can be dismissed
    pub dismiss_delay: Duration,
}

impl SchedulerConfig {
    pub fn new(break_interval: Duration, dismiss_delay: Duration) -> Self {
        Self {
            break_interval,
            dismiss_delay,
        }
    }

    /// Short timings for trying the app out
    pub fn quick() -> Self {
        Self::new(
            Duration::from_secs(QUICK_BREAK_INTERVAL_SECONDS),
            Duration::from_secs(QUICK_DISMISS_DELAY_SECONDS),
        )
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(BREAK_INTERVAL_DEFAULT_SECONDS),
            Duration::from_secs(DISMISS_DELAY_DEFAULT_SECONDS),
        )
    }
}

/// Whether `seconds` is an acceptable break interval
pub fn is_valid_break_interval(seconds: u64) -> bool {
    (BREAK_INTERVAL_MIN_SECONDS..=BREAK_INTERVAL_MAX_SECONDS).contains(&seconds)
}

/// Whether `seconds` is an acceptable dismiss delay
pub fn is_valid_dismiss_delay(seconds: u64) -> bool {
    (DISMISS_DELAY_MIN_SECONDS..=DISMISS_DELAY_MAX_SECONDS).contains(&seconds)
}

/// Parse the HINDSIGHT_BREAK_INTERVAL environment variable
///
/// Returns Some(seconds) if a valid interval is configured (10-14400 seconds)
/// Returns None if not set or invalid
pub fn parse_break_interval() -> Option<u64> {
    match env::var(BREAK_INTERVAL_ENV) {
        Ok(val) => match val.parse::<u64>() {
            Ok(seconds) if is_valid_break_interval(seconds) => {
                info!(
                    "Break interval set via environment variable: {} seconds",
                    seconds
                );
                Some(seconds)
            }
            Ok(seconds) => {
                warn!(
                    "Invalid break interval: {} (must be {}-{} seconds). Using default.",
                    seconds, BREAK_INTERVAL_MIN_SECONDS, BREAK_INTERVAL_MAX_SECONDS
                );
                None
            }
            Err(e) => {
                warn!("Failed to parse {}: {}. Using default.", BREAK_INTERVAL_ENV, e);
                None
            }
        },
        Err(_) => {
            debug!("{} not set.", BREAK_INTERVAL_ENV);
            None
        }
    }
}

/// Parse the HINDSIGHT_DISMISS_DELAY environment variable
///
/// Returns Some(seconds) if a valid delay is configured (0-600 seconds)
/// Returns None if not set or invalid
pub fn parse_dismiss_delay() -> Option<u64> {
    match env::var(DISMISS_DELAY_ENV) {
        Ok(val) => match val.parse::<u64>() {
            Ok(seconds) if is_valid_dismiss_delay(seconds) => {
                info!(
                    "Dismiss delay set via environment variable: {} seconds",
                    seconds
                );
                Some(seconds)
            }
            Ok(seconds) => {
                warn!(
                    "Invalid dismiss delay: {} (must be {}-{} seconds). Using default.",
                    seconds, DISMISS_DELAY_MIN_SECONDS, DISMISS_DELAY_MAX_SECONDS
                );
                None
            }
            Err(e) => {
                warn!("Failed to parse {}: {}. Using default.", DISMISS_DELAY_ENV, e);
                None
            }
        },
        Err(_) => {
            debug!("{} not set.", DISMISS_DELAY_ENV);
            None
        }
    }
}

/// Pick the first valid value in precedence order: CLI argument, environment
/// variable, config file. Invalid CLI values are logged and skipped.
pub fn resolve_seconds(
    name: &str,
    cli: Option<u64>,
    env: Option<u64>,
    file: u64,
    is_valid: fn(u64) -> bool,
) -> u64 {
    match cli {
        Some(seconds) if is_valid(seconds) => {
            info!("{} set via command line: {} seconds", name, seconds);
            seconds
        }
        Some(seconds) => {
            warn!(
                "Invalid --{} value: {}. Using config file or environment variable.",
                name, seconds
            );
            env.unwrap_or(file)
        }
        None => env.unwrap_or(file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_quick_presets() {
        let config = SchedulerConfig::default();
        assert_eq!(config.break_interval, Duration::from_secs(20 * 60));
        assert_eq!(config.dismiss_delay, Duration::from_secs(30));

        let quick = SchedulerConfig::quick();
        assert_eq!(quick.break_interval, Duration::from_secs(30));
        assert_eq!(quick.dismiss_delay, Duration::from_secs(5));
    }

    #[test]
    fn test_parse_break_interval() {
        env::set_var(BREAK_INTERVAL_ENV, "10");
        assert_eq!(parse_break_interval(), Some(10), "Should accept minimum");

        env::set_var(BREAK_INTERVAL_ENV, "1200");
        assert_eq!(parse_break_interval(), Some(1200), "Should accept 20 minutes");

        env::set_var(BREAK_INTERVAL_ENV, "14400");
        assert_eq!(parse_break_interval(), Some(14400), "Should accept maximum");

        // Invalid values (same test so the variable isn't shared across threads)
        env::set_var(BREAK_INTERVAL_ENV, "9");
        assert_eq!(parse_break_interval(), None, "Should reject value below 10");

        env::set_var(BREAK_INTERVAL_ENV, "14401");
        assert_eq!(parse_break_interval(), None, "Should reject value above 4 hours");

        env::set_var(BREAK_INTERVAL_ENV, "20m");
        assert_eq!(parse_break_interval(), None, "Should reject value with units");

        env::set_var(BREAK_INTERVAL_ENV, "-60");
        assert_eq!(parse_break_interval(), None, "Should reject negative value");

        env::set_var(BREAK_INTERVAL_ENV, "");
        assert_eq!(parse_break_interval(), None, "Should reject empty string");

        env::remove_var(BREAK_INTERVAL_ENV);
        assert_eq!(parse_break_interval(), None, "Should return None when not set");
    }

    #[test]
    fn test_parse_dismiss_delay() {
        env::set_var(DISMISS_DELAY_ENV, "0");
        assert_eq!(parse_dismiss_delay(), Some(0), "Zero means dismiss immediately");

        env::set_var(DISMISS_DELAY_ENV, "600");
        assert_eq!(parse_dismiss_delay(), Some(600), "Should accept maximum");

        env::set_var(DISMISS_DELAY_ENV, "601");
        assert_eq!(parse_dismiss_delay(), None, "Should reject value above 10 minutes");

        env::set_var(DISMISS_DELAY_ENV, "thirty");
        assert_eq!(parse_dismiss_delay(), None, "Should reject non-numeric value");

        env::remove_var(DISMISS_DELAY_ENV);
        assert_eq!(parse_dismiss_delay(), None, "Should return None when not set");
    }

    #[test]
    fn test_resolve_seconds_precedence() {
        let valid = is_valid_break_interval;

        assert_eq!(resolve_seconds("break-interval", Some(60), Some(120), 1200, valid), 60);
        assert_eq!(resolve_seconds("break-interval", None, Some(120), 1200, valid), 120);
        assert_eq!(resolve_seconds("break-interval", None, None, 1200, valid), 1200);
        assert_eq!(
            resolve_seconds("break-interval", Some(1), Some(120), 1200, valid),
            120,
            "Invalid CLI value should fall through to env"
        );
        assert_eq!(
            resolve_seconds("break-interval", Some(1), None, 1200, valid),
            1200,
            "Invalid CLI value should fall through to config file"
        );
    }
}
