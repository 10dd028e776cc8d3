//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (applied at the call site)
//! 2. `FORMKIT__SECTION__KEY` environment variables, `.env` included
//! 3. The `--config` file, or the default file when it exists
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use formkit_adapters::report::text::{DEFAULT_PAGE_LINES, DEFAULT_TITLE};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the file `formkit init --local` writes.
pub const LOCAL_CONFIG_FILE: &str = "formkit.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub title: String,
    pub page_lines: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.into(),
            page_lines: DEFAULT_PAGE_LINES,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, file and environment.
    ///
    /// An explicit `config_file` must exist; the default file is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default()).context("encoding defaults")?;

        let file = match config_file {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::from(Self::config_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let config = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix("FORMKIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("reading configuration")?
            .try_deserialize::<Self>()
            .context("decoding configuration")?;

        if config.report.page_lines == 0 {
            anyhow::bail!("report.page_lines must be at least 1");
        }

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Path of the default configuration file.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "formkit", "formkit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Look up a dotted key such as `report.title`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "output.no_color" => Some(self.output.no_color.to_string()),
            "output.format" => Some(self.output.format.clone()),
            "report.title" => Some(self.report.title.clone()),
            "report.page_lines" => Some(self.report.page_lines.to_string()),
            _ => None,
        }
    }

    pub const KEYS: [&'static str; 4] = [
        "output.no_color",
        "output.format",
        "report.title",
        "report.page_lines",
    ];
}
