// ABOUTME: Centralized CLI output utilities for consistent user-facing messages
// ABOUTME: Provides standardized formatting for errors, warnings, and info messages on stderr

use owo_colors::OwoColorize;
use std::io::IsTerminal;

pub struct CliOutput {
    use_color: bool,
}

impl CliOutput {
    /// Create new CLI output utility with TTY detection
    pub fn new() -> Self {
        Self {
            use_color: std::io::stderr().is_terminal(),
        }
    }

    pub fn with_color(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.render("error:", message, Level::Error));
    }

    pub fn warning(&self, message: &str) {
        eprintln!("{}", self.render("warning:", message, Level::Warning));
    }

    pub fn info(&self, message: &str) {
        eprintln!("{}", self.render("info:", message, Level::Info));
    }

    /// Indented follow-up line, used for error help text
    pub fn hint(&self, message: &str) {
        if self.use_color {
            eprintln!("  {}", message.dimmed());
        } else {
            eprintln!("  {}", message);
        }
    }

    fn render(&self, prefix: &str, message: &str, level: Level) -> String {
        if !self.use_color {
            return format!("{} {}", prefix, message);
        }
        let prefix = match level {
            Level::Error => prefix.red().bold().to_string(),
            Level::Warning => prefix.yellow().bold().to_string(),
            Level::Info => prefix.blue().bold().to_string(),
        };
        format!("{} {}", prefix, message)
    }
}

enum Level {
    Error,
    Warning,
    Info,
}

impl Default for CliOutput {
    fn default() -> Self {
        Self::new()
    }
}
