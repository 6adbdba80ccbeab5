//! Idle-sleep control while a break is on screen, and system sleep detection
//!
//! The scheduler only talks to the [`PowerManager`] trait. On macOS the
//! [`IoKitPower`] implementation holds a `PreventUserIdleSystemSleep`
//! assertion; elsewhere [`NoopPower`] is used.

use log::{debug, warn};
use std::time::{Duration, SystemTime};

pub trait PowerManager {
    fn prevent_idle_sleep(&mut self);
    fn allow_idle_sleep(&mut self);
}

/// Power manager that does nothing
#[derive(Debug, Default)]
pub struct NoopPower;

impl PowerManager for NoopPower {
    fn prevent_idle_sleep(&mut self) {
        debug!("Idle sleep prevention requested (no-op)");
    }

    fn allow_idle_sleep(&mut self) {
        debug!("Idle sleep allowed (no-op)");
    }
}

#[cfg(target_os = "macos")]
pub use iokit::IoKitPower;

#[cfg(target_os = "macos")]
mod iokit {
    use super::PowerManager;
    use core_foundation::base::TCFType;
    use core_foundation::string::{CFString, CFStringRef};
    use log::{debug, warn};

    type IOPMAssertionID = u32;
    type IOPMAssertionLevel = u32;
    type IOReturn = i32;

    const K_IOPM_ASSERTION_LEVEL_ON: IOPMAssertionLevel = 255;
    const K_IORETURN_SUCCESS: IOReturn = 0;
    const K_IOPM_ASSERTION_TYPE_PREVENT_USER_IDLE_SYSTEM_SLEEP: &str =
        "PreventUserIdleSystemSleep";

    #[link(name = "IOKit", kind = "framework")]
    extern "C" {
        fn IOPMAssertionCreateWithName(
            assertion_type: CFStringRef,
            level: IOPMAssertionLevel,
            name: CFStringRef,
            assertion_id: *mut IOPMAssertionID,
        ) -> IOReturn;

        fn IOPMAssertionRelease(assertion_id: IOPMAssertionID) -> IOReturn;
    }

    /// Holds an IOKit idle-sleep assertion between prevent and allow
    #[derive(Debug, Default)]
    pub struct IoKitPower {
        assertion_id: Option<IOPMAssertionID>,
    }

    impl IoKitPower {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl PowerManager for IoKitPower {
        fn prevent_idle_sleep(&mut self) {
            if self.assertion_id.is_some() {
                return;
            }

            let assertion_type =
                CFString::new(K_IOPM_ASSERTION_TYPE_PREVENT_USER_IDLE_SYSTEM_SLEEP);
            let reason = CFString::new("Break in progress");
            let mut assertion_id: IOPMAssertionID = 0;

            let result = unsafe {
                IOPMAssertionCreateWithName(
                    assertion_type.as_concrete_TypeRef(),
                    K_IOPM_ASSERTION_LEVEL_ON,
                    reason.as_concrete_TypeRef(),
                    &mut assertion_id,
                )
            };

            if result == K_IORETURN_SUCCESS {
                debug!("Idle sleep assertion {} created", assertion_id);
                self.assertion_id = Some(assertion_id);
            } else {
                warn!("Failed to create idle sleep assertion (IOReturn {})", result);
            }
        }

        fn allow_idle_sleep(&mut self) {
            if let Some(assertion_id) = self.assertion_id.take() {
                let result = unsafe { IOPMAssertionRelease(assertion_id) };
                if result == K_IORETURN_SUCCESS {
                    debug!("Idle sleep assertion {} released", assertion_id);
                } else {
                    warn!(
                        "Failed to release idle sleep assertion {} (IOReturn {})",
                        assertion_id, result
                    );
                }
            }
        }
    }

    impl Drop for IoKitPower {
        fn drop(&mut self) {
            self.allow_idle_sleep();
        }
    }
}

/// Power manager for the current platform
pub fn platform_power_manager() -> Box<dyn PowerManager + Send> {
    #[cfg(target_os = "macos")]
    {
        Box::new(IoKitPower::new())
    }
    #[cfg(not(target_os = "macos"))]
    {
        Box::new(NoopPower)
    }
}

/// Detects system sleep from wall-clock gaps between control loop iterations.
///
/// The monotonic clock stops while the machine sleeps, the wall clock doesn't,
/// so an iteration that took far longer on the wall clock than it was supposed
/// to wait means the system was asleep in between.
#[derive(Debug)]
pub struct SleepWatch {
    last_seen: SystemTime,
    threshold: Duration,
}

impl SleepWatch {
    pub fn new(now: SystemTime, threshold: Duration) -> Self {
        Self {
            last_seen: now,
            threshold,
        }
    }

    /// Record an iteration at `now` that was expected to take at most
    /// `expected`. Returns the length of the detected sleep, if any.
    pub fn observe(&mut self, now: SystemTime, expected: Duration) -> Option<Duration> {
        let gap = match now.duration_since(self.last_seen) {
            Ok(gap) => gap,
            Err(_) => {
                // Wall clock moved backwards (manual change or NTP step)
                warn!("System clock moved backwards; ignoring for sleep detection");
                Duration::ZERO
            }
        };
        self.last_seen = now;

        let overrun = gap.saturating_sub(expected);
        if overrun > self.threshold {
            Some(overrun)
        } else {
            None
        }
    }
}
