//! CLI error handling.
//!
//! Structured errors with user-facing messages, suggestions and exit codes.

use std::error::Error as _;

use owo_colors::OwoColorize;
use thiserror::Error;

use formkit_core::domain::FieldError;
use formkit_core::error::FormkitError;

pub use formkit_core::domain::ErrorCategory as CoreCategory;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Arguments that parsed but make no sense together.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The user asked to commit but the book is unchanged or has errors.
    #[error("Book {id} was not committed: {reason}")]
    CommitRefused { id: u32, reason: String },

    /// An unknown `config get` key.
    #[error("Unknown config key '{key}'")]
    UnknownConfigKey { key: String },

    /// A configuration file could not be read, parsed or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from the field framework or the catalog.
    #[error(transparent)]
    Core(#[from] FormkitError),

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::CommitRefused { id, .. } => vec![
                "Fix the fields marked with errors and try again".into(),
                format!("Inspect the stored values: formkit show {id}"),
            ],

            Self::UnknownConfigKey { .. } => {
                let mut out = vec!["Known keys:".to_owned()];
                out.extend(
                    crate::config::AppConfig::KEYS
                        .iter()
                        .map(|k| format!("  • {k}")),
                );
                out
            }

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                "Check the file printed by: formkit config path".into(),
                "Create a default one with: formkit init".into(),
            ],

            Self::Core(core) => core.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::CommitRefused { .. } => ErrorCategory::UserError,
            Self::UnknownConfigKey { .. } | Self::ConfigError { .. } => {
                ErrorCategory::Configuration
            }
            Self::Core(FormkitError::Field(
                FieldError::TypeMismatch { .. } | FieldError::ForeignKey { .. },
            )) => ErrorCategory::Internal,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Contract => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = format!(
            "\n{} {}\n\n  {}\n",
            "✗".red().bold(),
            "Error:".red().bold(),
            self.to_string().red()
        );

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push_str(&format!(
                "\n{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// [`Self::format_colored`] without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("\nError: {self}\n");

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Convert foreign errors into [`CliError`] at call sites with a context
/// message.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, toml::ser::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::ConfigError {
            message: f().into(),
            source: Some(Box::new(e)),
        })
    }
}
