// Library interface for Hindsight
// Shared by the terminal and tray front ends, and by the integration tests

pub mod app_state;
pub mod clock;
pub mod config;
pub mod config_file;
pub mod constants;
pub mod power;
pub mod quotes;
pub mod scheduler;
pub mod ui;
pub mod utils;

use anyhow::{Context, Result};
use app_state::AppState;
use clock::{Clock, SystemClock};
use config::SchedulerConfig;
use constants::{CONTROL_LOOP_POLL_INTERVAL_MS, SLEEP_GAP_THRESHOLD_SECS};
use log::{debug, info, warn};
use power::{PowerManager, SleepWatch};
use quotes::{QuoteCorpus, QuoteRotator};
use scheduler::{BreakScheduler, SchedulerEvent};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};
use ui::BreakDisplay;

/// Messages from the front ends to the control thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    Event(SchedulerEvent),
    Shutdown,
}

/// Core Hindsight runtime shared between the CLI and the Tray App
///
/// Owns the control thread. The thread owns the [`BreakScheduler`]; front ends
/// talk to it through [`ControlMessage`]s and read the published snapshot in
/// [`HindsightCore::state`].
pub struct HindsightCore {
    pub state: AppState,
    config: SchedulerConfig,
    corpus: Arc<QuoteCorpus>,
    clock: Arc<dyn Clock>,
    sender: Option<Sender<ControlMessage>>,
    control_thread: Option<JoinHandle<()>>,
}

impl HindsightCore {
    pub fn new(config: SchedulerConfig, corpus: QuoteCorpus) -> Self {
        Self::with_clock(config, corpus, Arc::new(SystemClock))
    }

    /// Create a runtime driven by a custom clock
    pub fn with_clock(config: SchedulerConfig, corpus: QuoteCorpus, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: AppState::new(&config),
            config,
            corpus: Arc::new(corpus),
            clock,
            sender: None,
            control_thread: None,
        }
    }

    /// Start the control thread with the given display and power manager
    pub fn start(
        &mut self,
        display: Box<dyn BreakDisplay + Send>,
        power: Box<dyn PowerManager + Send>,
    ) -> Result<()> {
        if self.control_thread.is_some() {
            anyhow::bail!("Break scheduler is already running");
        }

        let (sender, receiver) = mpsc::channel();
        let config = self.config;
        let rotator = QuoteRotator::new(Arc::clone(&self.corpus));
        let clock = Arc::clone(&self.clock);
        let state = self.state.clone();

        let handle = thread::Builder::new()
            .name("break-scheduler".to_string())
            .spawn(move || {
                let scheduler = BreakScheduler::new(config, rotator, display, power, clock);
                run_control_loop(scheduler, receiver, state);
            })
            .context("Failed to spawn break scheduler thread")?;

        self.sender = Some(sender);
        self.control_thread = Some(handle);
        Ok(())
    }

    /// Queue an event for the control thread. Returns false if the control
    /// thread is not running.
    pub fn send(&self, event: SchedulerEvent) -> bool {
        match &self.sender {
            Some(sender) => {
                if sender.send(ControlMessage::Event(event)).is_err() {
                    warn!("Break scheduler has stopped; dropping {:?}", event);
                    return false;
                }
                true
            }
            None => {
                warn!("Break scheduler not started; dropping {:?}", event);
                false
            }
        }
    }

    pub fn pause(&self) -> bool {
        self.send(SchedulerEvent::Pause)
    }

    pub fn resume(&self) -> bool {
        self.send(SchedulerEvent::Resume)
    }

    /// Toggle between paused and running based on the published state
    pub fn toggle_pause(&self) -> bool {
        if self.state.is_paused() {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Request dismissal of the current break. The scheduler ignores it until
    /// the dismiss delay has passed.
    pub fn dismiss(&self) -> bool {
        self.send(SchedulerEvent::Dismiss)
    }

    pub fn take_break_now(&self) -> bool {
        self.send(SchedulerEvent::TakeBreakNow)
    }

    /// Stop the control thread and wait for it to finish
    ///
    /// Events queued before the call are processed first.
    pub fn shutdown(&mut self) -> Result<()> {
        let Some(handle) = self.control_thread.take() else {
            return Ok(());
        };
        if let Some(sender) = self.sender.take() {
            // A closed channel also stops the loop
            let _ = sender.send(ControlMessage::Shutdown);
        }
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("Break scheduler thread panicked"))?;
        info!("Break scheduler stopped");
        Ok(())
    }
}

impl Drop for HindsightCore {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("{:#}", e);
        }
    }
}

/// Body of the control thread: apply queued events, fire due timers and
/// publish a snapshot, until shutdown
fn run_control_loop(
    mut scheduler: BreakScheduler,
    receiver: Receiver<ControlMessage>,
    state: AppState,
) {
    let poll_interval = Duration::from_millis(CONTROL_LOOP_POLL_INTERVAL_MS);
    let mut sleep_watch = SleepWatch::new(
        SystemTime::now(),
        Duration::from_secs(SLEEP_GAP_THRESHOLD_SECS),
    );

    state.set_running(true);
    state.publish(scheduler.state());
    info!("Break scheduler thread started");

    loop {
        match receiver.recv_timeout(poll_interval) {
            Ok(ControlMessage::Event(event)) => {
                debug!("Control message: {:?}", event);
                scheduler.handle(event);
            }
            Ok(ControlMessage::Shutdown) => break,
            Err(RecvTimeoutError::Disconnected) => {
                debug!("Control channel closed");
                break;
            }
            Err(RecvTimeoutError::Timeout) => {}
        }

        if let Some(slept) = sleep_watch.observe(SystemTime::now(), poll_interval) {
            info!("System sleep detected ({}s)", slept.as_secs());
            scheduler.apply_detected_sleep();
        }

        scheduler.poll();
        state.publish(scheduler.state());
    }

    state.publish(scheduler.state());
    state.set_running(false);
}
