use super::BreakDisplay;
use crate::quotes::Quote;
use crate::utils::{format_countdown, progress_bar};
use std::io::{self, Write};
use std::time::Duration;

const PROGRESS_WIDTH: usize = 40;

/// Single-line commands accepted by the terminal front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalCommand {
    Dismiss,
    Pause,
    Resume,
    BreakNow,
    Status,
    Quit,
}

impl TerminalCommand {
    /// Parse one line of input. An empty line dismisses the break.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" => Some(Self::Dismiss),
            "p" | "pause" => Some(Self::Pause),
            "r" | "resume" => Some(Self::Resume),
            "b" | "break" => Some(Self::BreakNow),
            "s" | "status" => Some(Self::Status),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub const COMMAND_HELP: &str =
    "Commands: Enter = dismiss break, p = pause, r = resume, b = break now, s = status, q = quit";

/// Presents breaks on stdout for the terminal front end
pub struct TerminalDisplay<W: Write = io::Stdout> {
    out: W,
    dismiss_delay: Duration,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            dismiss_delay: Duration::ZERO,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn progress_line(&self, remaining: Duration) -> String {
        let progress = if self.dismiss_delay.is_zero() {
            1.0
        } else {
            1.0 - remaining.as_secs_f64() / self.dismiss_delay.as_secs_f64()
        };
        format!(
            "{} {}",
            progress_bar(progress, PROGRESS_WIDTH),
            format_countdown(remaining)
        )
    }

    // Terminal output is best effort; a closed stdout must not stop breaks
    fn write_lines(&mut self, lines: &[String]) {
        for line in lines {
            let _ = writeln!(self.out, "{}", line);
        }
        let _ = self.out.flush();
    }
}

impl<W: Write> BreakDisplay for TerminalDisplay<W> {
    fn present_break(&mut self, quote: &Quote, dismiss_delay: Duration) {
        self.dismiss_delay = dismiss_delay;

        let mut lines = vec![
            String::new(),
            "=== Time for a break ===".to_string(),
            String::new(),
            format!("  {}", quote.text),
        ];
        if let Some(attribution) = quote.attribution() {
            lines.push(format!("  {}", attribution));
        }
        lines.push(String::new());
        lines.push(self.progress_line(dismiss_delay));
        self.write_lines(&lines);
    }

    fn update_countdown(&mut self, remaining: Duration) {
        let line = self.progress_line(remaining);
        self.write_lines(&[line]);
    }

    fn enable_dismiss(&mut self) {
        let lines = [
            self.progress_line(Duration::ZERO),
            "Press Enter to get back to work.".to_string(),
        ];
        self.write_lines(&lines);
    }

    fn hide_break(&mut self) {
        self.write_lines(&["=== Break over ===".to_string(), String::new()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(display: TerminalDisplay<Vec<u8>>) -> String {
        String::from_utf8(display.into_inner()).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(TerminalCommand::parse("\n"), Some(TerminalCommand::Dismiss));
        assert_eq!(TerminalCommand::parse("p"), Some(TerminalCommand::Pause));
        assert_eq!(TerminalCommand::parse(" R "), Some(TerminalCommand::Resume));
        assert_eq!(TerminalCommand::parse("b"), Some(TerminalCommand::BreakNow));
        assert_eq!(TerminalCommand::parse("status"), Some(TerminalCommand::Status));
        assert_eq!(TerminalCommand::parse("q"), Some(TerminalCommand::Quit));
        assert_eq!(TerminalCommand::parse("x"), None);
    }

    #[test]
    fn test_present_break_shows_quote_and_author() {
        let mut display = TerminalDisplay::with_writer(Vec::new());
        display.present_break(
            &Quote::new("Rest is not idleness.", Some("John Lubbock")),
            Duration::from_secs(30),
        );

        let text = output(display);
        assert!(text.contains("  Rest is not idleness."));
        assert!(text.contains("  — John Lubbock"));
        assert!(!text.contains("# John Lubbock"));
        assert!(text.contains("0:30"));
    }

    #[test]
    fn test_countdown_progress() {
        let mut display = TerminalDisplay::with_writer(Vec::new());
        display.present_break(&Quote::new("Blink.", None), Duration::from_secs(4));
        display.update_countdown(Duration::from_secs(2));
        display.enable_dismiss();

        let text = output(display);
        let half = format!("[{}{}] 0:02", "#".repeat(20), "-".repeat(20));
        assert!(text.contains(&half), "Missing half-way bar in:\n{}", text);
        assert!(text.contains(&format!("[{}] 0:00", "#".repeat(40))));
        assert!(text.contains("Press Enter"));
    }
}
