//! Terminal output.

use std::io::{self, IsTerminal};

use clap::ValueEnum as _;
use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Writes user-facing messages to stdout, honouring quiet mode, colour
/// settings and the resolved output format.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // The flag wins over `output.format`; unknown config values mean auto.
        let requested = match args.output_format {
            OutputFormat::Auto => {
                OutputFormat::from_str(&config.output.format, true).unwrap_or_default()
            }
            other => other,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Data the user asked for (listings, reports). Written even in quiet
    /// mode.
    pub fn data(&self, text: &str) -> io::Result<()> {
        self.term.write_line(text.strip_suffix('\n').unwrap_or(text))
    }

    /// Pretty JSON document on stdout.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{2713}", msg, |s| s.green().bold().to_string(), |s| s.green().to_string())
    }

    /// Not suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}")
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{26a0}", msg, |s| s.yellow().bold().to_string(), |s| s.yellow().to_string())
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked("\u{2139}", msg, |s| s.blue().bold().to_string(), |s| s.blue().to_string())
    }

    /// Secondary detail such as a field event trace.
    pub fn note(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("  {msg}")
        } else {
            format!("  {}", msg.dimmed())
        };
        self.term.write_line(&line)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    fn marked(
        &self,
        mark: &str,
        msg: &str,
        paint_mark: impl Fn(&str) -> String,
        paint_msg: impl Fn(&str) -> String,
    ) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{mark} {msg}")
        } else {
            format!("{} {}", paint_mark(mark), paint_msg(msg))
        };
        self.term.write_line(&line)
    }

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true, OutputFormat::Plain);
        assert!(out.quiet);
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn color_follows_flag_and_format() {
        assert!(!make_manager(false, false, OutputFormat::Human).no_color);
        assert!(make_manager(false, true, OutputFormat::Human).no_color);
        assert!(make_manager(false, false, OutputFormat::Plain).no_color);
    }

    #[test]
    fn config_can_disable_color() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Human,
        };
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(OutputManager::new(&args, &config).no_color);
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Auto,
        };
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        assert!(OutputManager::new(&args, &config).is_json());
    }

    #[test]
    fn explicit_format_is_kept() {
        let out = make_manager(false, false, OutputFormat::Json);
        assert_eq!(out.resolved_format, OutputFormat::Json);
        assert!(out.is_json());
    }
}
