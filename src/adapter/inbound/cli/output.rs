//! CLI output formatting.
//!
//! Every line goes through [`emit`], which prints either a human-readable
//! line or, with `--json`, one `{"type", "payload"}` object per line.
//! `--quiet` hides informational lines but never warnings or errors.

use std::fmt::Display;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

const APP_NAME: &str = "tsbgate";
const LABEL_WIDTH: usize = 14;
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON lines.
    pub json: bool,
    /// Hide informational output.
    pub quiet: bool,
    /// `-v` count.
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

fn cell() -> &'static RwLock<OutputConfig> {
    static CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();
    CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn current() -> OutputConfig {
    *cell().read()
}

/// How a line behaves under `--quiet` and where it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Warn,
    Error,
}

fn emit(level: Level, kind: &str, payload: Value, human: impl FnOnce() -> String) {
    let config = current();
    if config.json {
        let line = json!({ "type": kind, "payload": payload });
        match level {
            Level::Error => eprintln!("{line}"),
            _ => println!("{line}"),
        }
        return;
    }
    match level {
        Level::Info if config.quiet => {}
        Level::Info | Level::Warn => println!("{}", human()),
        Level::Error => eprintln!("{}", human()),
    }
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    *cell().write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

/// Global verbosity level from `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    current().verbose
}

/// Application name and version.
pub fn header(version: &str) {
    emit(
        Level::Info,
        "header",
        json!({ "app": APP_NAME, "version": version }),
        || format!("{} {}\n", APP_NAME.bold(), version.dimmed()),
    );
}

/// A labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        Level::Info,
        "field",
        json!({ "label": label, "value": &value }),
        || format!("  {:<LABEL_WIDTH$} {}", label.dimmed(), value),
    );
}

pub fn success(message: &str) {
    emit(Level::Info, "success", json!({ "message": message }), || {
        format!("  {} {}", "✓".green(), message)
    });
}

pub fn warning(message: &str) {
    emit(Level::Warn, "warning", json!({ "message": message }), || {
        format!("  {} {}", "⚠".yellow(), message)
    });
}

/// An error line on stderr. Shown even with `--quiet`.
pub fn error(message: &str) {
    emit(Level::Error, "error", json!({ "message": message }), || {
        format!("  {} {}", "×".red(), message)
    });
}

pub fn section(title: &str) {
    emit(Level::Info, "section", json!({ "title": title }), || {
        format!("\n{}", title.bold())
    });
}

pub fn hint(message: &str) {
    emit(Level::Info, "hint", json!({ "message": message }), || {
        format!("  {}: {}", "hint".cyan().dimmed(), message.dimmed())
    });
}

/// Start a spinner. Hidden in JSON and quiet modes.
pub fn spinner(message: &str) -> ProgressBar {
    let config = current();
    let pb = if config.json || config.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(SPINNER_FRAMES)
            .template("  {spinner:.cyan} {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    };
    pb.set_message(message.to_string());
    pb
}

/// Finish a spinner with a check mark.
pub fn spinner_success(pb: &ProgressBar, message: &str) {
    finish(pb, Level::Info, "spinner_success", message, "✓".green().to_string());
}

/// Finish a spinner with a failure mark.
pub fn spinner_fail(pb: &ProgressBar, message: &str) {
    finish(pb, Level::Warn, "spinner_fail", message, "×".red().to_string());
}

fn finish(pb: &ProgressBar, level: Level, kind: &str, message: &str, mark: String) {
    let config = current();
    if config.json {
        pb.finish_and_clear();
        emit(level, kind, json!({ "message": message }), String::new);
    } else if config.quiet && level == Level::Info {
        pb.finish_and_clear();
    } else {
        pb.finish_with_message(format!("{mark} {message}"));
    }
}

/// A value rendered in cyan outside JSON mode.
pub fn highlight(value: impl Display) -> String {
    if is_json() {
        value.to_string()
    } else {
        value.cyan().to_string()
    }
}
