//! `init` command: write a commented default `coursekit.toml`.

use std::fs;

use anyhow::{Context, Result, bail};

use crate::config::SiteConfig;
use crate::embed::init::{CONFIG_TOML, ConfigVars};
use crate::log;

/// Write the default config at `config.config_path`, or print it when `dry`.
///
/// An existing config file is never overwritten.
pub fn new_config(config: &SiteConfig, dry: bool) -> Result<()> {
    let content = CONFIG_TOML.render(&ConfigVars::default());
    if dry {
        print!("{content}");
        return Ok(());
    }

    let path = &config.config_path;
    if path.exists() {
        bail!(
            "'{}' already exists.\n\
             Edit it, or remove it to start from the defaults.",
            path.display()
        );
    }

    let root = config.get_root();
    fs::create_dir_all(root)
        .with_context(|| format!("Failed to create directory '{}'", root.display()))?;
    fs::write(path, content).with_context(|| format!("Failed to write '{}'", path.display()))?;

    log!("init"; "wrote {}", path.display());
    Ok(())
}
