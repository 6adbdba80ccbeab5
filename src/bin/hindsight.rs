// Hindsight CLI - terminal front end for the break reminder
// Breaks are printed to the terminal; commands are read from stdin

use anyhow::{Context, Result};
use clap::Parser;
use hindsight::config::{
    self, is_valid_break_interval, is_valid_dismiss_delay, resolve_seconds, SchedulerConfig,
};
use hindsight::config_file::Config;
use hindsight::constants::{QUICK_BREAK_INTERVAL_SECONDS, QUICK_DISMISS_DELAY_SECONDS};
use hindsight::power::platform_power_manager;
use hindsight::quotes::QuoteCorpus;
use hindsight::ui::notifications::NotificationDisplay;
use hindsight::ui::terminal::{TerminalCommand, TerminalDisplay, COMMAND_HELP};
use hindsight::ui::{menubar, DisplayGroup};
use hindsight::utils::format_countdown;
use hindsight::HindsightCore;
use log::{info, warn};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;

/// Take regular breaks to rest your eyes
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Take regular breaks to rest your eyes",
    long_about = "Take regular breaks to rest your eyes.

Every break interval Hindsight interrupts you with a short quote. Look at
something far away until the dismiss delay has passed, then get back to work.

COMMANDS (type and press Enter):
  <Enter>   Dismiss the current break (once the dismiss delay has passed)
  p         Pause breaks
  r         Resume breaks
  b         Take a break now
  s         Show status
  q         Quit

CONFIGURATION:
  Settings are read from (highest precedence first):
    command line flags
    HINDSIGHT_BREAK_INTERVAL / HINDSIGHT_DISMISS_DELAY environment variables
    ~/Library/Application Support/hindsight/config.toml
  Run 'hindsight --write-config' to create a config file with the defaults."
)]
struct Args {
    /// Use short timings for trying things out (30s interval, 5s dismiss delay)
    #[arg(long)]
    quick: bool,

    /// Seconds between breaks (10-14400, overrides config file)
    /// NOTE: Keep range/default values in sync with BREAK_INTERVAL_* constants
    #[arg(long)]
    break_interval: Option<u64>,

    /// Seconds before a break can be dismissed (0-600, overrides config file)
    #[arg(long)]
    dismiss_delay: Option<u64>,

    /// JSON quote file to use instead of the bundled quotes
    #[arg(long)]
    quotes: Option<PathBuf>,

    /// Start with a break right away
    #[arg(long)]
    break_now: bool,

    /// Print the quotes that would be used and exit
    #[arg(long)]
    list_quotes: bool,

    /// Write a config file with the default settings and exit
    #[arg(long)]
    write_config: bool,
}

fn write_default_config() -> Result<()> {
    let path = Config::config_path().context("Failed to determine config directory")?;
    if path.exists() {
        anyhow::bail!(
            "Config file already exists at {}. Edit or remove it first.",
            path.display()
        );
    }
    Config::default().save_to_path(&path)?;
    println!("Configuration written to: {}", path.display());
    Ok(())
}

fn list_quotes(corpus: &QuoteCorpus) {
    println!(
        "{} quotes ({} with author)\n",
        corpus.len(),
        corpus.authored_count()
    );
    for quote in corpus.quotes() {
        println!("{}", quote);
    }
}

/// Build the scheduler timings (precedence: --quick > CLI arg > env var > config file)
fn scheduler_config(args: &Args, cfg: &Config) -> SchedulerConfig {
    if args.quick {
        info!(
            "Quick mode: break every {}s, dismissable after {}s",
            QUICK_BREAK_INTERVAL_SECONDS, QUICK_DISMISS_DELAY_SECONDS
        );
        return SchedulerConfig::quick();
    }

    let break_interval = resolve_seconds(
        "break-interval",
        args.break_interval,
        config::parse_break_interval(),
        cfg.break_interval_secs,
        is_valid_break_interval,
    );
    let dismiss_delay = resolve_seconds(
        "dismiss-delay",
        args.dismiss_delay,
        config::parse_dismiss_delay(),
        cfg.dismiss_delay_secs,
        is_valid_dismiss_delay,
    );

    SchedulerConfig::new(
        Duration::from_secs(break_interval),
        Duration::from_secs(dismiss_delay),
    )
}

fn print_status(core: &HindsightCore) {
    let state = core.state.snapshot();
    println!("{}", menubar::status_text(&state));
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    if args.write_config {
        return write_default_config();
    }

    let cfg = Config::load().context("Failed to load configuration")?;

    // --quotes wins over the config file
    let quotes_path = args.quotes.clone().or_else(|| cfg.quotes_path.clone());
    let corpus = QuoteCorpus::load(quotes_path.as_deref());

    if args.list_quotes {
        list_quotes(&corpus);
        return Ok(());
    }

    let timings = scheduler_config(&args, &cfg);

    info!("Starting Hindsight");
    let mut core = HindsightCore::new(timings, corpus);

    let mut display = DisplayGroup::new().with(Box::new(TerminalDisplay::new()));
    if cfg.notifications {
        display = display.with(Box::new(NotificationDisplay::new()));
    }
    core.start(Box::new(display), platform_power_manager())
        .context("Failed to start break scheduler")?;

    if args.break_now {
        info!("Starting with a break (--break-now flag)");
        core.take_break_now();
    }

    println!(
        "Hindsight is running: a break every {}, dismissable after {}.",
        format_countdown(timings.break_interval),
        format_countdown(timings.dismiss_delay)
    );
    println!("{}", COMMAND_HELP);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;

        match TerminalCommand::parse(&line) {
            Some(TerminalCommand::Dismiss) => {
                let state = core.state.snapshot();
                if state.is_break_active() && !state.dismiss_enabled() {
                    println!(
                        "Keep resting, {} to go.",
                        format_countdown(state.remaining_dismiss_delay)
                    );
                } else {
                    core.dismiss();
                }
            }
            Some(TerminalCommand::Pause) => {
                core.pause();
                println!("Breaks paused. Type 'r' to resume.");
            }
            Some(TerminalCommand::Resume) => {
                core.resume();
                println!("Breaks resumed.");
            }
            Some(TerminalCommand::BreakNow) => {
                core.take_break_now();
            }
            Some(TerminalCommand::Status) => print_status(&core),
            Some(TerminalCommand::Quit) => break,
            None => {
                warn!("Unknown command: {:?}", line.trim());
                println!("{}", COMMAND_HELP);
            }
        }
    }

    core.shutdown()?;
    info!("CLI shutdown complete");
    Ok(())
}
