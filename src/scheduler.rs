//! Break scheduling state machine
//!
//! ```text
//!             interval elapsed / take break now
//!   Running ───────────────────────────────────▶ BreakActive(dismiss: false)
//!      ▲                                              │ countdown elapsed
//!      │ dismiss                                      ▼
//!      └──────────────────────────────────────── BreakActive(dismiss: true)
//!
//!   Running | BreakActive ── pause / system idle ──▶ Paused
//!   Paused ── resume / system resumed ──▶ Running (fresh full interval)
//! ```
//!
//! Timers are deadlines on the injected [`Clock`]. [`BreakScheduler::poll`]
//! turns every deadline that has passed into a [`SchedulerEvent`] and applies
//! it through [`BreakScheduler::handle`], the same entry point used for user
//! actions, so every transition goes through one place.

use crate::clock::Clock;
use crate::config::SchedulerConfig;
use crate::constants::COUNTDOWN_TICK_MS;
use crate::power::PowerManager;
use crate::quotes::{Quote, QuoteRotator};
use crate::ui::BreakDisplay;
use log::{debug, info};
use std::sync::Arc;
use std::time::{Duration, Instant};

const COUNTDOWN_TICK: Duration = Duration::from_millis(COUNTDOWN_TICK_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    BreakActive { dismiss_enabled: bool },
}

/// Inputs of the state machine: timer expirations, user actions and system
/// power signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerEvent {
    IntervalElapsed,
    CountdownTick,
    CountdownElapsed,
    Dismiss,
    Pause,
    Resume,
    TakeBreakNow,
    SystemGoingIdle,
    SystemResumed,
}

/// Read-only view of the scheduler for observers
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleState {
    pub phase: Phase,
    /// Time left on the interval timer, clamped at zero. The full interval
    /// when no interval timer is armed.
    pub time_until_next_break: Duration,
    /// Time left before the current break can be dismissed
    pub remaining_dismiss_delay: Duration,
    pub dismiss_delay: Duration,
    /// Most recently presented quote
    pub current_quote: Option<Quote>,
}

impl ScheduleState {
    /// State of a scheduler that has just been created
    pub fn initial(config: &SchedulerConfig) -> Self {
        Self {
            phase: Phase::Running,
            time_until_next_break: config.break_interval,
            remaining_dismiss_delay: Duration::ZERO,
            dismiss_delay: config.dismiss_delay,
            current_quote: None,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_break_active(&self) -> bool {
        matches!(self.phase, Phase::BreakActive { .. })
    }

    pub fn dismiss_enabled(&self) -> bool {
        self.phase == Phase::BreakActive { dismiss_enabled: true }
    }

    /// How far through the forced part of the break we are, 0.0 to 1.0
    pub fn dismiss_progress(&self) -> f64 {
        if self.dismiss_delay.is_zero() {
            return 1.0;
        }
        let remaining = self.remaining_dismiss_delay.as_secs_f64();
        (1.0 - remaining / self.dismiss_delay.as_secs_f64()).clamp(0.0, 1.0)
    }
}

struct Countdown {
    next_tick: Instant,
    ends_at: Instant,
    remaining: Duration,
}

pub struct BreakScheduler {
    config: SchedulerConfig,
    clock: Arc<dyn Clock>,
    rotator: QuoteRotator,
    display: Box<dyn BreakDisplay + Send>,
    power: Box<dyn PowerManager + Send>,
    phase: Phase,
    /// Deadline of the interval timer; None when disarmed
    interval_timer: Option<Instant>,
    /// Dismiss countdown; None when disarmed
    countdown: Option<Countdown>,
    current_quote: Option<Quote>,
    sleep_prevented: bool,
}

impl BreakScheduler {
    /// Create a scheduler in `Running` with the interval timer armed
    pub fn new(
        config: SchedulerConfig,
        rotator: QuoteRotator,
        display: Box<dyn BreakDisplay + Send>,
        power: Box<dyn PowerManager + Send>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut scheduler = Self {
            config,
            clock,
            rotator,
            display,
            power,
            phase: Phase::Running,
            interval_timer: None,
            countdown: None,
            current_quote: None,
            sleep_prevented: false,
        };
        scheduler.arm_interval_timer();
        info!(
            "Break scheduler started: break every {}s, dismissable after {}s",
            config.break_interval.as_secs(),
            config.dismiss_delay.as_secs()
        );
        scheduler
    }

    /// Apply one event. Returns true if it caused a transition or tick,
    /// false if it was ignored in the current phase.
    pub fn handle(&mut self, event: SchedulerEvent) -> bool {
        use SchedulerEvent::*;

        match (self.phase, event) {
            (Phase::Running, IntervalElapsed | TakeBreakNow) => {
                self.start_break();
                true
            }
            (Phase::BreakActive { dismiss_enabled: false }, CountdownTick) => {
                self.countdown_tick();
                true
            }
            (Phase::BreakActive { dismiss_enabled: false }, CountdownElapsed) => {
                self.enable_dismiss();
                true
            }
            (Phase::BreakActive { dismiss_enabled: true }, Dismiss) => {
                self.finish_break();
                true
            }
            (Phase::BreakActive { dismiss_enabled: false }, Dismiss) => {
                debug!("Dismiss ignored: break cannot be dismissed yet");
                false
            }
            (Phase::Paused, Pause | SystemGoingIdle) => false,
            (_, Pause | SystemGoingIdle) => {
                self.pause(event);
                true
            }
            (Phase::Paused, Resume | SystemResumed) => {
                self.resume(event);
                true
            }
            (phase, event) => {
                debug!("Ignoring {:?} while {:?}", event, phase);
                false
            }
        }
    }

    /// Fire every timer whose deadline has passed. Returns how many fired.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;

        while let Some(event) = self.due_event(now) {
            self.handle(event);
            fired += 1;
        }

        fired
    }

    fn due_event(&self, now: Instant) -> Option<SchedulerEvent> {
        match self.phase {
            Phase::Running => self
                .interval_timer
                .filter(|deadline| *deadline <= now)
                .map(|_| SchedulerEvent::IntervalElapsed),
            Phase::BreakActive { dismiss_enabled: false } => {
                let countdown = self.countdown.as_ref()?;
                if countdown.next_tick < countdown.ends_at && countdown.next_tick <= now {
                    Some(SchedulerEvent::CountdownTick)
                } else if countdown.ends_at <= now {
                    Some(SchedulerEvent::CountdownElapsed)
                } else {
                    None
                }
            }
            Phase::BreakActive { dismiss_enabled: true } | Phase::Paused => None,
        }
    }

    pub fn pause_breaks(&mut self) -> bool {
        self.handle(SchedulerEvent::Pause)
    }

    pub fn resume_breaks(&mut self) -> bool {
        self.handle(SchedulerEvent::Resume)
    }

    /// Dismiss the current break. Returns false (and changes nothing) unless
    /// dismissal is currently enabled.
    pub fn dismiss(&mut self) -> bool {
        self.handle(SchedulerEvent::Dismiss)
    }

    pub fn take_break_now(&mut self) -> bool {
        self.handle(SchedulerEvent::TakeBreakNow)
    }

    /// Apply a system sleep that has already ended: pause as if going idle,
    /// then resume with a fresh interval. A scheduler that was already paused
    /// stays paused. Returns true if the sleep caused a restart.
    pub fn apply_detected_sleep(&mut self) -> bool {
        if !self.handle(SchedulerEvent::SystemGoingIdle) {
            debug!("System sleep while paused; staying paused");
            return false;
        }
        self.handle(SchedulerEvent::SystemResumed)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn current_quote(&self) -> Option<&Quote> {
        self.current_quote.as_ref()
    }

    pub fn time_until_next_break(&self) -> Duration {
        match self.interval_timer {
            Some(deadline) => deadline.saturating_duration_since(self.clock.now()),
            None => self.config.break_interval,
        }
    }

    pub fn remaining_dismiss_delay(&self) -> Duration {
        self.countdown
            .as_ref()
            .map_or(Duration::ZERO, |countdown| countdown.remaining)
    }

    pub fn state(&self) -> ScheduleState {
        ScheduleState {
            phase: self.phase,
            time_until_next_break: self.time_until_next_break(),
            remaining_dismiss_delay: self.remaining_dismiss_delay(),
            dismiss_delay: self.config.dismiss_delay,
            current_quote: self.current_quote.clone(),
        }
    }

    /// Arm the interval timer for a full interval from now, replacing any
    /// timer already armed
    fn arm_interval_timer(&mut self) {
        self.interval_timer = Some(self.clock.now() + self.config.break_interval);
    }

    fn start_break(&mut self) {
        let now = self.clock.now();
        self.interval_timer = None;

        let quote = self.rotator.next_quote();
        info!("Break started: {}", quote);

        self.prevent_sleep();
        self.display.present_break(&quote, self.config.dismiss_delay);
        self.current_quote = Some(quote);

        self.countdown = Some(Countdown {
            next_tick: now + COUNTDOWN_TICK,
            ends_at: now + self.config.dismiss_delay,
            remaining: self.config.dismiss_delay,
        });
        self.phase = Phase::BreakActive {
            dismiss_enabled: false,
        };
    }

    fn countdown_tick(&mut self) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };
        let tick_at = countdown.next_tick;
        countdown.remaining = countdown.ends_at.saturating_duration_since(tick_at);
        countdown.next_tick = tick_at + COUNTDOWN_TICK;

        let remaining = countdown.remaining;
        self.display.update_countdown(remaining);
    }

    fn enable_dismiss(&mut self) {
        self.countdown = None;
        self.phase = Phase::BreakActive {
            dismiss_enabled: true,
        };
        info!("Break can now be dismissed");
        self.display.enable_dismiss();
        self.allow_sleep();
    }

    fn finish_break(&mut self) {
        self.display.hide_break();
        self.allow_sleep();
        self.phase = Phase::Running;
        self.arm_interval_timer();
        info!(
            "Break dismissed, next break in {}s",
            self.config.break_interval.as_secs()
        );
    }

    fn pause(&mut self, reason: SchedulerEvent) {
        let was_on_break = matches!(self.phase, Phase::BreakActive { .. });

        self.interval_timer = None;
        self.countdown = None;
        if was_on_break {
            self.display.hide_break();
            self.allow_sleep();
        }
        self.phase = Phase::Paused;

        match reason {
            SchedulerEvent::SystemGoingIdle => info!("Breaks paused: system going idle"),
            _ => info!("Breaks paused"),
        }
        if was_on_break {
            info!("Break in progress abandoned");
        }
    }

    fn resume(&mut self, reason: SchedulerEvent) {
        self.phase = Phase::Running;
        self.arm_interval_timer();

        match reason {
            SchedulerEvent::SystemResumed => info!("Breaks resumed: system resumed"),
            _ => info!("Breaks resumed"),
        }
    }

    fn prevent_sleep(&mut self) {
        if !self.sleep_prevented {
            self.power.prevent_idle_sleep();
            self.sleep_prevented = true;
        }
    }

    fn allow_sleep(&mut self) {
        if self.sleep_prevented {
            self.power.allow_idle_sleep();
            self.sleep_prevented = false;
        }
    }
}

impl Drop for BreakScheduler {
    fn drop(&mut self) {
        self.allow_sleep();
    }
}
