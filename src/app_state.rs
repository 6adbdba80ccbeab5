use crate::config::SchedulerConfig;
use crate::quotes::Quote;
use crate::scheduler::{Phase, ScheduleState};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Shared, read-only view of the scheduler for front ends.
///
/// Only the control thread publishes into it; the menu bar and terminal
/// front ends read from it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Mutex<AppStateInner>>,
}

struct AppStateInner {
    /// Last snapshot published by the control thread
    schedule: ScheduleState,
    /// Whether the control thread is running
    is_running: bool,
}

impl AppState {
    pub fn new(config: &SchedulerConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AppStateInner {
                schedule: ScheduleState::initial(config),
                is_running: false,
            })),
        }
    }

    /// Replace the published snapshot (control thread only)
    pub fn publish(&self, schedule: ScheduleState) {
        self.inner.lock().schedule = schedule;
    }

    pub fn snapshot(&self) -> ScheduleState {
        self.inner.lock().schedule.clone()
    }

    pub fn phase(&self) -> Phase {
        self.inner.lock().schedule.phase
    }

    pub fn is_paused(&self) -> bool {
        self.inner.lock().schedule.is_paused()
    }

    pub fn is_break_active(&self) -> bool {
        self.inner.lock().schedule.is_break_active()
    }

    pub fn dismiss_enabled(&self) -> bool {
        self.inner.lock().schedule.dismiss_enabled()
    }

    pub fn time_until_next_break(&self) -> Duration {
        self.inner.lock().schedule.time_until_next_break
    }

    pub fn current_quote(&self) -> Option<Quote> {
        self.inner.lock().schedule.current_quote.clone()
    }

    pub fn set_running(&self, running: bool) {
        self.inner.lock().is_running = running;
    }

    pub fn is_running(&self) -> bool {
        self.inner.lock().is_running
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&SchedulerConfig::default())
    }
}
