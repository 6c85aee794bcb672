//! Config command: inspect and edit the configuration file.
//!
//! Every subcommand targets the file given with the global `--config` flag,
//! or the per-user default file when the flag is absent.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use console::style;

use invtab_core::InvtabConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration, or one section of it
    Show {
        /// Section name (paths, pdf, extraction, output)
        section: Option<String>,
    },

    /// Write a configuration file with the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value (e.g. "output.table_name")
    Get { key: String },

    /// Change one value and save the file
    Set {
        key: String,
        /// JSON literal, or plain text for strings and paths
        value: String,
    },

    /// Print the configuration file location
    Path,
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show { section } => show(&path, section.as_deref()),
        ConfigCommand::Init { force } => init(&path, force),
        ConfigCommand::Get { key } => {
            let value = read(&path)?.get_key(&key)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        ConfigCommand::Set { key, value } => set(&path, &key, &value),
        ConfigCommand::Path => {
            let status = if path.exists() {
                style("exists").green()
            } else {
                style("not created").yellow()
            };
            println!("{} ({})", path.display(), status);
            Ok(())
        }
    }
}

/// The file at `path`, or defaults when it does not exist yet.
fn read(path: &Path) -> anyhow::Result<InvtabConfig> {
    if !path.exists() {
        return Ok(InvtabConfig::default());
    }
    InvtabConfig::from_file(path).with_context(|| format!("Failed to load config {}", path.display()))
}

fn show(path: &Path, section: Option<&str>) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} {} not found, showing defaults.",
            style("ℹ").blue(),
            path.display()
        );
    }

    let config = read(path)?;
    let value = match section {
        Some(section) => config.get_key(section)?,
        None => serde_json::to_value(&config)?,
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    save(path, &InvtabConfig::default())?;

    println!("{} Created {}", style("✓").green(), path.display());
    Ok(())
}

fn set(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let mut config = read(path)?;
    let value = config.set_key(key, raw)?;
    save(path, &config)?;

    println!(
        "{} {} = {} in {}",
        style("✓").green(),
        key,
        serde_json::to_string(&value)?,
        path.display()
    );
    Ok(())
}

fn save(path: &Path, config: &InvtabConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create {}", parent.display()))?;
    }
    config.save(path)?;
    Ok(())
}
