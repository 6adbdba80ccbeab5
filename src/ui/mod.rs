pub mod menubar;
pub mod notifications;
pub mod terminal;

use crate::quotes::Quote;
use std::time::Duration;

/// Presents breaks to the user. Called by the scheduler; implementations
/// render only and never drive the scheduler themselves.
pub trait BreakDisplay {
    /// Show a break with `quote`; dismissal becomes possible after `dismiss_delay`
    fn present_break(&mut self, quote: &Quote, dismiss_delay: Duration);

    /// Countdown tick while dismissal is still disabled
    fn update_countdown(&mut self, _remaining: Duration) {}

    /// The user may now dismiss the break
    fn enable_dismiss(&mut self);

    /// Take the break off screen
    fn hide_break(&mut self);
}

/// Forwards every call to each inner display in order
#[derive(Default)]
pub struct DisplayGroup {
    displays: Vec<Box<dyn BreakDisplay + Send>>,
}

impl DisplayGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, display: Box<dyn BreakDisplay + Send>) -> Self {
        self.displays.push(display);
        self
    }

    pub fn len(&self) -> usize {
        self.displays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displays.is_empty()
    }
}

impl BreakDisplay for DisplayGroup {
    fn present_break(&mut self, quote: &Quote, dismiss_delay: Duration) {
        for display in &mut self.displays {
            display.present_break(quote, dismiss_delay);
        }
    }

    fn update_countdown(&mut self, remaining: Duration) {
        for display in &mut self.displays {
            display.update_countdown(remaining);
        }
    }

    fn enable_dismiss(&mut self) {
        for display in &mut self.displays {
            display.enable_dismiss();
        }
    }

    fn hide_break(&mut self) {
        for display in &mut self.displays {
            display.hide_break();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Tally(Arc<Mutex<Vec<&'static str>>>);

    impl BreakDisplay for Tally {
        fn present_break(&mut self, _quote: &Quote, _dismiss_delay: Duration) {
            self.0.lock().push("present");
        }

        fn enable_dismiss(&mut self) {
            self.0.lock().push("enable");
        }

        fn hide_break(&mut self) {
            self.0.lock().push("hide");
        }
    }

    #[test]
    fn test_display_group_forwards_to_all() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut group = DisplayGroup::new()
            .with(Box::new(Tally(calls.clone())))
            .with(Box::new(Tally(calls.clone())));
        assert_eq!(group.len(), 2);

        group.present_break(&Quote::placeholder(), Duration::from_secs(1));
        group.update_countdown(Duration::ZERO);
        group.enable_dismiss();
        group.hide_break();

        assert_eq!(
            *calls.lock(),
            vec!["present", "present", "enable", "enable", "hide", "hide"]
        );
    }
}
