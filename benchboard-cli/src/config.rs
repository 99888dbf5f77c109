use anyhow::{bail, Context, Result};
use benchboard_common::{load_config, ConfigSource, ReportConfig};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show {
        /// Output format (toml, json)
        #[arg(short, long, default_value = "toml")]
        format: String,
    },
    /// Write a configuration file with default settings
    Init {
        /// Output file path
        #[arg(short, long, default_value = "benchboard.toml")]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Effective configuration: the file when given, defaults otherwise, with
/// environment overrides applied on top.
pub fn resolve(path: Option<&Path>) -> Result<ReportConfig> {
    let source = match path {
        Some(path) => ConfigSource::File(path.to_path_buf()),
        None => ConfigSource::Environment,
    };
    load_config(source).with_context(|| match path {
        Some(path) => format!("failed to load configuration from {}", path.display()),
        None => "invalid configuration from environment".to_string(),
    })
}

pub fn handle_command(command: ConfigCommands, config_path: Option<&Path>) -> Result<()> {
    match command {
        ConfigCommands::Show { format } => show_config(&resolve(config_path)?, &format),
        ConfigCommands::Init { output, force } => init_config(&output, force),
    }
}

fn show_config(config: &ReportConfig, format: &str) -> Result<()> {
    let rendered = match format {
        "toml" => toml::to_string_pretty(config)?,
        "json" => serde_json::to_string_pretty(config)?,
        other => bail!("unsupported format: {} (expected toml or json)", other),
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

fn init_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", output.display());
    }
    ReportConfig::default()
        .to_file(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("Wrote default configuration to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchboard.toml");

        init_config(&path, false).unwrap();
        assert!(init_config(&path, false).is_err());
        init_config(&path, true).unwrap();

        let config = resolve(Some(&path)).unwrap();
        assert_eq!(config.mount_id, ReportConfig::default().mount_id);
    }

    #[test]
    fn test_show_rejects_unknown_format() {
        assert!(show_config(&ReportConfig::default(), "yaml").is_err());
        assert!(show_config(&ReportConfig::default(), "json").is_ok());
    }
}
