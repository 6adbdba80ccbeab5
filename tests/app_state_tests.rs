use hindsight::app_state::AppState;
use hindsight::config::SchedulerConfig;
use hindsight::quotes::Quote;
use hindsight::scheduler::{Phase, ScheduleState};
use std::thread;
use std::time::Duration;

#[test]
fn test_initial_state() {
    let state = AppState::default();
    assert_eq!(state.phase(), Phase::Running);
    assert!(!state.is_paused());
    assert!(!state.is_break_active());
    assert!(!state.dismiss_enabled());
    assert!(!state.is_running());
    assert!(state.current_quote().is_none());
    assert_eq!(state.time_until_next_break(), Duration::from_secs(20 * 60));
}

#[test]
fn test_published_break_is_visible() {
    let config = SchedulerConfig::quick();
    let state = AppState::new(&config);

    let mut schedule = ScheduleState::initial(&config);
    schedule.phase = Phase::BreakActive {
        dismiss_enabled: true,
    };
    schedule.current_quote = Some(Quote::new("Blink.", None));
    state.publish(schedule);

    assert!(state.is_break_active());
    assert!(state.dismiss_enabled());
    assert_eq!(state.current_quote().map(|q| q.text), Some("Blink.".to_string()));
}

#[test]
fn test_running_flag() {
    let state = AppState::default();
    state.set_running(true);
    assert!(state.is_running());
    state.set_running(false);
    assert!(!state.is_running());
}

#[test]
fn test_snapshot_shared_across_threads() {
    let state = AppState::default();
    let publisher = state.clone();

    let handle = thread::spawn(move || {
        let mut schedule = publisher.snapshot();
        schedule.phase = Phase::Paused;
        publisher.publish(schedule);
        publisher.set_running(true);
    });
    handle.join().expect("Publisher thread panicked");

    assert!(state.is_paused());
    assert!(state.is_running());
}
