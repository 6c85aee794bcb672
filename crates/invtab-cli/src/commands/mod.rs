//! Subcommands and the helpers they share.

pub mod config;
pub mod extract;
pub mod run;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use invtab_core::{HeaderLayout, InvtabConfig};

/// Header layout choice on the command line.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LayoutArg {
    /// Find fields by their printed labels
    Labeled,
    /// Fixed line offsets of the template
    Positional,
}

impl From<LayoutArg> for HeaderLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Labeled => HeaderLayout::Labeled,
            LayoutArg::Positional => HeaderLayout::Positional,
        }
    }
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("invtab")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvtabConfig> {
    if let Some(path) = config_path {
        return InvtabConfig::from_file(Path::new(path))
            .with_context(|| format!("Failed to load config {}", path));
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        return InvtabConfig::from_file(&default_path)
            .with_context(|| format!("Failed to load config {}", default_path.display()));
    }

    Ok(InvtabConfig::default())
}
