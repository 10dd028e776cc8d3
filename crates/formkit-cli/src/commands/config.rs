//! `formkit config get|list|path`

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config
                .get(&key)
                .ok_or(CliError::UnknownConfigKey { key })?;
            output.data(&value)?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                let text = toml::to_string_pretty(&config)
                    .with_cli_context(|| "Failed to serialise config")?;
                output.data(&text)?;
            }
        }

        ConfigCommands::Path => {
            output.data(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}
