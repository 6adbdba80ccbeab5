//! Centralized constants for Hindsight
//!
//! This module contains all configurable numerical values used throughout
//! the application. Each constant includes documentation on its purpose,
//! unit, and recommended value range.

// ============================================================================
// BREAK INTERVAL CONFIGURATION
// ============================================================================

/// Default time between breaks (the "20" in 20-20-20).
/// Unit: seconds
/// Recommended range: 900-3600 (15-60 minutes)
pub const BREAK_INTERVAL_DEFAULT_SECONDS: u64 = 20 * 60;

/// Minimum break interval allowed.
/// Unit: seconds
/// Range: Fixed minimum, low enough for the quick iteration preset
pub const BREAK_INTERVAL_MIN_SECONDS: u64 = 10;

/// Maximum break interval allowed.
/// Unit: seconds
/// Range: Fixed maximum (4 hours)
pub const BREAK_INTERVAL_MAX_SECONDS: u64 = 4 * 60 * 60;

/// Break interval used by the quick preset (`--quick`).
/// Unit: seconds
pub const QUICK_BREAK_INTERVAL_SECONDS: u64 = 30;

// ============================================================================
// DISMISS DELAY CONFIGURATION
// ============================================================================

/// Default minimum time a break stays up before it can be dismissed.
/// Unit: seconds
/// Recommended range: 20-60
pub const DISMISS_DELAY_DEFAULT_SECONDS: u64 = 30;

/// Minimum dismiss delay allowed (0 = dismiss immediately).
/// Unit: seconds
pub const DISMISS_DELAY_MIN_SECONDS: u64 = 0;

/// Maximum dismiss delay allowed.
/// Unit: seconds
/// Range: Fixed maximum (10 minutes)
pub const DISMISS_DELAY_MAX_SECONDS: u64 = 600;

/// Dismiss delay used by the quick preset (`--quick`).
/// Unit: seconds
pub const QUICK_DISMISS_DELAY_SECONDS: u64 = 5;

// ============================================================================
// TIMERS & POLLING
// ============================================================================

/// Break countdown tick.
/// Unit: milliseconds
/// Range: Fixed, the countdown is displayed in whole seconds
pub const COUNTDOWN_TICK_MS: u64 = 1000;

/// Control thread wait timeout between timer checks.
/// Unit: milliseconds
/// Recommended range: 100-1000 (lower = more precise firing, higher = less CPU)
pub const CONTROL_LOOP_POLL_INTERVAL_MS: u64 = 250;

/// Tray app menu refresh interval.
/// Unit: milliseconds
/// Recommended range: 500-1000 (status line shows whole seconds)
pub const MENU_REFRESH_INTERVAL_MS: u64 = 1000;

/// Wall-clock gap between control loop iterations, beyond the expected poll
/// interval, that is treated as a system sleep.
/// Unit: seconds
/// Recommended range: 10-120
pub const SLEEP_GAP_THRESHOLD_SECS: u64 = 30;

// ============================================================================
// NOTIFICATION TIMEOUTS
// ============================================================================

/// Break notification display duration.
/// Unit: milliseconds
/// Recommended range: 10000-30000 (the quote should stay readable)
pub const NOTIFICATION_BREAK_TIMEOUT_MS: u32 = 15000;

/// Standard notification display duration.
/// Unit: milliseconds
/// Recommended range: 2000-5000
pub const NOTIFICATION_TIMEOUT_MS: u32 = 3000;

// ============================================================================
// QUOTES
// ============================================================================

/// Quote returned when the corpus is empty.
pub const PLACEHOLDER_QUOTE_TEXT: &str = "Breathe.";

/// Built-in quotes used when the quote resource cannot be loaded.
pub const FALLBACK_QUOTE_TEXTS: [&str; 3] = [
    "Rest your eyes, refresh your mind.",
    "Look far to see far.",
    "Take a moment to rest your eyes...",
];
