use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::sync::OnceLock;
use tabled::{Table, Tabled};

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub verbosity: Verbosity,
}

static SETTINGS: OnceLock<OutputSettings> = OnceLock::new();

/// Initialize global output settings
pub fn init(format: OutputFormat, verbosity: Verbosity, color: bool) {
    let _ = SETTINGS.set(OutputSettings { format, verbosity });
    if !color {
        colored::control::set_override(false);
    }
}

fn settings() -> OutputSettings {
    SETTINGS.get().copied().unwrap_or_default()
}

pub fn is_json() -> bool {
    settings().format == OutputFormat::Json
}

pub fn is_quiet() -> bool {
    matches!(settings().verbosity, Verbosity::Quiet)
}

pub fn is_verbose() -> bool {
    matches!(settings().verbosity, Verbosity::Verbose)
}

fn should_show_status() -> bool {
    if is_quiet() {
        return false;
    }
    if is_json() && !is_verbose() {
        return false;
    }
    true
}

/// Print data as a table
pub fn print_table<T: Tabled>(items: &[T]) {
    if items.is_empty() {
        println!("{}", "No results".dimmed());
        return;
    }
    println!("{}", Table::new(items));
}

/// Print data as JSON
pub fn print_json<T: Serialize>(data: &T) -> Result<(), serde_json::Error> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}

/// Print a section heading (text mode only)
pub fn print_heading(title: &str) {
    if !is_json() {
        println!("{}", title.bold());
    }
}

/// Print a status line; stderr keeps stdout clean for piping
pub fn print_status(message: &str) {
    if should_show_status() {
        eprintln!("{}", message);
    }
}

pub fn print_error(message: &str) {
    eprintln!("{}: {}", "error".red().bold(), message);
}

pub fn print_warning(message: &str) {
    if !is_quiet() {
        eprintln!("{}: {}", "warning".yellow().bold(), message);
    }
}

pub fn print_success(message: &str) {
    if should_show_status() {
        eprintln!("{}: {}", "success".green().bold(), message);
    }
}

/// Print a verbose-only message
pub fn print_verbose(message: &str) {
    if is_verbose() {
        eprintln!("{} {}", "›".dimmed(), message.dimmed());
    }
}

/// Print primary output without suppression
pub fn print_raw(message: &str) {
    println!("{}", message);
}

/// Progress bar for `len` steps, hidden whenever status lines are
pub fn progress_bar(len: u64) -> ProgressBar {
    if !should_show_status() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}
