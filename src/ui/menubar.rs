//! Labels for the menu bar front end
//!
//! Kept free of any tray/windowing types so the text can be tested.

use crate::scheduler::{Phase, ScheduleState};
use crate::utils::format_countdown;

/// Status line shown at the top of the menu
pub fn status_text(state: &ScheduleState) -> String {
    match state.phase {
        Phase::Paused => "Breaks Paused".to_string(),
        Phase::Running => format!(
            "Next break in {}",
            format_countdown(state.time_until_next_break)
        ),
        Phase::BreakActive {
            dismiss_enabled: false,
        } => format!(
            "On a break, {} to go",
            format_countdown(state.remaining_dismiss_delay)
        ),
        Phase::BreakActive {
            dismiss_enabled: true,
        } => "Break complete".to_string(),
    }
}

/// Label of the pause/resume toggle
pub fn pause_toggle_text(state: &ScheduleState) -> &'static str {
    if state.is_paused() {
        "Resume Breaks"
    } else {
        "Pause Breaks"
    }
}

/// RGBA color of the tray icon for the current phase
pub fn status_color(state: &ScheduleState) -> [u8; 4] {
    match state.phase {
        Phase::Running => [52, 199, 89, 255], // green
        Phase::Paused => [255, 149, 0, 255], // orange
        Phase::BreakActive { .. } => [0, 122, 255, 255], // blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SchedulerConfig;
    use std::time::Duration;

    fn state(phase: Phase) -> ScheduleState {
        ScheduleState {
            phase,
            ..ScheduleState::initial(&SchedulerConfig::default())
        }
    }

    #[test]
    fn test_status_text_running() {
        let mut running = state(Phase::Running);
        running.time_until_next_break = Duration::from_secs(19 * 60 + 5);
        assert_eq!(status_text(&running), "Next break in 19:05");
    }

    #[test]
    fn test_status_text_paused() {
        let paused = state(Phase::Paused);
        assert_eq!(status_text(&paused), "Breaks Paused");
        assert_eq!(pause_toggle_text(&paused), "Resume Breaks");
        assert_eq!(status_color(&paused), [255, 149, 0, 255]);
    }

    #[test]
    fn test_status_text_on_break() {
        let mut on_break = state(Phase::BreakActive {
            dismiss_enabled: false,
        });
        on_break.remaining_dismiss_delay = Duration::from_secs(12);
        assert_eq!(status_text(&on_break), "On a break, 0:12 to go");
        assert_eq!(pause_toggle_text(&on_break), "Pause Breaks");

        let done = state(Phase::BreakActive {
            dismiss_enabled: true,
        });
        assert_eq!(status_text(&done), "Break complete");
        assert_eq!(status_color(&done), [0, 122, 255, 255]);
    }
}
