use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use shared::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    fn default_file_name(self) -> &'static str {
        match self {
            Self::Yaml => "canvas.yaml",
            Self::Json => "canvas.json",
        }
    }
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Format of the configuration file to generate. Defaults to yaml.
    #[arg(
        long,
        short,
        value_enum,
        default_value_t = ConfigFormat::Yaml,
        help = "Format of the configuration file to generate (yaml or json). Defaults to yaml."
    )]
    pub format: ConfigFormat,

    #[arg(
        long,
        short,
        help = "Where to write the file. Defaults to canvas.yaml or canvas.json in the current directory."
    )]
    pub output: Option<PathBuf>,
}

/// Writes a configuration file holding the default settings.
///
/// # Errors
/// Returns an error if serialization or writing the file fails.
pub fn generate_config(args: &ConfigArgs) -> Result<()> {
    let config = Config::with_defaults();
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(args.format.default_file_name()));

    let serialized = match args.format {
        ConfigFormat::Yaml => serde_yml::to_string(&config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
    };

    fs::write(&path, serialized)
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!(
        "Configuration file '{}' generated successfully.",
        path.display()
    );
    Ok(())
}
