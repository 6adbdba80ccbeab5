use super::BreakDisplay;
use crate::constants::{NOTIFICATION_BREAK_TIMEOUT_MS, NOTIFICATION_TIMEOUT_MS};
use crate::quotes::Quote;
use log::{debug, error, info};
use std::time::Duration;

/// Presents breaks as desktop notifications
#[derive(Debug, Default)]
pub struct NotificationDisplay;

impl NotificationDisplay {
    pub fn new() -> Self {
        Self
    }
}

fn notify(summary: &str, body: &str, timeout_ms: u32) {
    if let Err(e) = notify_rust::Notification::new()
        .summary(summary)
        .body(body)
        .timeout(notify_rust::Timeout::Milliseconds(timeout_ms))
        .show()
    {
        error!("Failed to show notification: {}", e);
    }
}

/// Notification body for a break quote
pub fn break_body(quote: &Quote, dismiss_delay: Duration) -> String {
    let mut body = quote.text.clone();
    if let Some(attribution) = quote.attribution() {
        body.push('\n');
        body.push_str(&attribution);
    }
    body.push_str(&format!(
        "\n\nLook at something 20 feet away for {} seconds.",
        dismiss_delay.as_secs()
    ));
    body
}

impl BreakDisplay for NotificationDisplay {
    fn present_break(&mut self, quote: &Quote, dismiss_delay: Duration) {
        info!("Showing break notification");
        notify(
            "Hindsight - Time for a break",
            &break_body(quote, dismiss_delay),
            NOTIFICATION_BREAK_TIMEOUT_MS,
        );
    }

    fn enable_dismiss(&mut self) {
        notify(
            "Hindsight",
            "Break complete. Dismiss it from the menu bar to continue.",
            NOTIFICATION_TIMEOUT_MS,
        );
    }

    fn hide_break(&mut self) {
        // Notifications expire on their own
        debug!("Break hidden");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_break_body_includes_author_and_delay() {
        let quote = Quote::new("Rest is not idleness.", Some("John Lubbock"));
        let body = break_body(&quote, Duration::from_secs(30));
        assert!(body.starts_with("Rest is not idleness.\n— John Lubbock"));
        assert!(body.ends_with("for 30 seconds."));
    }

    #[test]
    fn test_break_body_without_author() {
        let quote = Quote::new("Look far to see far.", None);
        let body = break_body(&quote, Duration::from_secs(5));
        assert!(body.starts_with("Look far to see far.\n\n"));
    }
}
