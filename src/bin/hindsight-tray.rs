// Hindsight Tray App - macOS menu bar front end for the break reminder
// Breaks are shown as desktop notifications; the menu controls the scheduler

use anyhow::{Context, Result};
use hindsight::config::{
    self, is_valid_break_interval, is_valid_dismiss_delay, resolve_seconds, SchedulerConfig,
};
use hindsight::config_file::Config;
use hindsight::constants::MENU_REFRESH_INTERVAL_MS;
use hindsight::power::platform_power_manager;
use hindsight::quotes::QuoteCorpus;
use hindsight::scheduler::{Phase, ScheduleState};
use hindsight::ui::menubar;
use hindsight::ui::notifications::NotificationDisplay;
use hindsight::ui::DisplayGroup;
use hindsight::utils::escape_applescript;
use hindsight::HindsightCore;
use log::{error, info};
use std::time::{Duration, Instant};
use tao::event::Event;
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tray_icon::menu::{Menu, MenuEvent, MenuItem, PredefinedMenuItem};
use tray_icon::{TrayIcon, TrayIconBuilder};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const ICON_SIZE: u32 = 32;

/// Menu items whose label or enabled state follows the scheduler
struct StatusMenu {
    status_item: MenuItem,
    pause_item: MenuItem,
    break_now_item: MenuItem,
    dismiss_item: MenuItem,
    last_status: String,
    last_phase: Option<Phase>,
}

impl StatusMenu {
    /// Bring the menu and icon in line with the published state
    fn refresh(&mut self, tray: &TrayIcon, state: &ScheduleState) {
        let status = menubar::status_text(state);
        if status != self.last_status {
            self.status_item.set_text(&status);
            if let Err(e) = tray.set_tooltip(Some(format!("Hindsight - {}", status))) {
                error!("Failed to update tray tooltip: {}", e);
            }
            self.last_status = status;
        }

        if self.last_phase == Some(state.phase) {
            return;
        }
        self.last_phase = Some(state.phase);

        self.pause_item.set_text(menubar::pause_toggle_text(state));
        self.break_now_item.set_enabled(state.phase == Phase::Running);
        self.dismiss_item.set_enabled(state.dismiss_enabled());

        match create_status_icon(menubar::status_color(state)) {
            Ok(icon) => {
                if let Err(e) = tray.set_icon(Some(icon)) {
                    error!("Failed to update tray icon: {}", e);
                }
            }
            Err(e) => error!("{:#}", e),
        }
    }
}

/// Scheduler timings for the tray app (precedence: env var > config file)
fn scheduler_config(cfg: &Config) -> SchedulerConfig {
    let break_interval = resolve_seconds(
        "break-interval",
        None,
        config::parse_break_interval(),
        cfg.break_interval_secs,
        is_valid_break_interval,
    );
    let dismiss_delay = resolve_seconds(
        "dismiss-delay",
        None,
        config::parse_dismiss_delay(),
        cfg.dismiss_delay_secs,
        is_valid_dismiss_delay,
    );

    SchedulerConfig::new(
        Duration::from_secs(break_interval),
        Duration::from_secs(dismiss_delay),
    )
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Hindsight Tray App v{}", VERSION);

    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            show_alert(
                "Configuration Error",
                &format!(
                    "Hindsight could not read its configuration file.\n\n{:#}\n\nFix or remove the file and relaunch Hindsight.",
                    e
                ),
            );
            std::process::exit(1);
        }
    };

    let corpus = QuoteCorpus::load(cfg.quotes_path.as_deref());
    let mut core = HindsightCore::new(scheduler_config(&cfg), corpus);

    let mut display = DisplayGroup::new();
    if cfg.notifications {
        display = display.with(Box::new(NotificationDisplay::new()));
    } else {
        info!("Notifications disabled in config; breaks are shown in the menu only");
    }
    core.start(Box::new(display), platform_power_manager())
        .context("Failed to start break scheduler")?;

    info!("Hindsight core started");

    // Create event loop for tray app
    let event_loop = EventLoopBuilder::new().build();

    // Build tray menu
    let status_item = MenuItem::new(menubar::status_text(&core.state.snapshot()), false, None);
    let pause_item = MenuItem::new("Pause Breaks", true, None);
    let break_now_item = MenuItem::new("Take a Break Now", true, None);
    let dismiss_item = MenuItem::new("Dismiss Break", false, None);
    let separator = PredefinedMenuItem::separator();
    let version_item = MenuItem::new(format!("Version {}", VERSION), true, None);
    let quit_item = MenuItem::new("Quit", true, None);

    let menu = Menu::new();
    menu.append(&status_item).context("Failed to add status menu item")?;
    menu.append(&pause_item).context("Failed to add pause menu item")?;
    menu.append(&break_now_item).context("Failed to add break menu item")?;
    menu.append(&dismiss_item).context("Failed to add dismiss menu item")?;
    menu.append(&separator).context("Failed to add separator")?;
    menu.append(&version_item).context("Failed to add version menu item")?;
    menu.append(&quit_item).context("Failed to add quit menu item")?;

    // Create tray icon
    let initial_state = core.state.snapshot();
    let icon = create_status_icon(menubar::status_color(&initial_state))?;
    let tray = TrayIconBuilder::new()
        .with_menu(Box::new(menu))
        .with_tooltip("Hindsight - Rest your eyes")
        .with_icon(icon)
        .build()
        .context("Failed to create tray icon")?;

    info!("Tray icon created, running event loop");

    // Clone IDs for event handling
    let pause_id = pause_item.id().clone();
    let break_now_id = break_now_item.id().clone();
    let dismiss_id = dismiss_item.id().clone();
    let version_id = version_item.id().clone();
    let quit_id = quit_item.id().clone();

    let mut status_menu = StatusMenu {
        status_item,
        pause_item,
        break_now_item,
        dismiss_item,
        last_status: String::new(),
        last_phase: None,
    };
    let refresh_interval = Duration::from_millis(MENU_REFRESH_INTERVAL_MS);

    // Run event loop; tray items are not Send, so menu updates happen here
    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::WaitUntil(Instant::now() + refresh_interval);

        if let Event::LoopDestroyed = event {
            if let Err(e) = core.shutdown() {
                error!("{:#}", e);
            }
            info!("Tray app shutdown complete");
            return;
        }

        // Handle menu events
        if let Ok(event) = MenuEvent::receiver().try_recv() {
            let event_id = event.id;

            if event_id == pause_id {
                core.toggle_pause();
            } else if event_id == break_now_id {
                info!("Take a Break Now menu item clicked");
                core.take_break_now();
            } else if event_id == dismiss_id {
                core.dismiss();
            } else if event_id == version_id {
                show_version();
            } else if event_id == quit_id {
                info!("Quit menu item clicked, exiting");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        status_menu.refresh(&tray, &core.state.snapshot());
    });
}

/// Show version information
fn show_version() {
    info!("Version menu item clicked");
    show_alert(
        "Hindsight Version",
        &format!(
            "Hindsight Tray App\nVersion {}\n\nTake regular breaks to rest your eyes.",
            VERSION
        ),
    );
}

/// Show native macOS alert dialog
fn show_alert(title: &str, message: &str) {
    use std::process::Command;

    let message = escape_applescript(message);
    let title = escape_applescript(title);

    let script = format!(
        r#"display dialog "{}" with title "{}" buttons {{"OK"}} default button "OK""#,
        message, title
    );

    if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
        error!("Failed to show alert: {}", e);
    }
}

/// Solid circle in the status color, transparent outside
fn create_status_icon(color: [u8; 4]) -> Result<tray_icon::Icon> {
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let radius = ICON_SIZE as f32 / 2.0 - 2.0;

    let mut rgba = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);
    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            if dx * dx + dy * dy <= radius * radius {
                rgba.extend_from_slice(&color);
            } else {
                rgba.extend_from_slice(&[0, 0, 0, 0]);
            }
        }
    }

    tray_icon::Icon::from_rgba(rgba, ICON_SIZE, ICON_SIZE).context("Failed to create icon")
}
