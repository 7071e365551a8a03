//! config command - Get, set, or list configuration values

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::config::{Config, KEYS};

use super::source;

/// Get a configuration value.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let config = source::load_config(ctx)?;
    let value = config.get_key(key)?;

    if !value.is_empty() {
        println!("{}", value);
    }
    Ok(())
}

/// Set a value in the project configuration, or the global one with
/// `global`.
pub fn set(ctx: &Context, key: &str, value: &str, global: bool) -> Result<()> {
    let config = source::load_config(ctx)?;

    let path = if global {
        let path = match config.global_config_loaded_from() {
            Some(path) => path.to_path_buf(),
            None => Config::global_write_path()?,
        };
        let mut file = config.global;
        file.set_key(key, value)?;
        Config::write_global(&path, &file).context("Failed to write config")?;
        path
    } else {
        let mut file = config.project.unwrap_or_default();
        file.set_key(key, value)?;
        Config::write_project(&ctx.cwd()?, &file).context("Failed to write config")?
    };

    if !ctx.quiet {
        println!("Set {} = {} in {}", key, value, path.display());
    }
    Ok(())
}

/// List all effective configuration values.
pub fn list(ctx: &Context) -> Result<()> {
    let config = source::load_config(ctx)?;

    println!("# Effective Configuration");
    for key in KEYS {
        let value = config.get_key(key)?;
        if value.is_empty() {
            println!("{} = (not set)", key);
        } else {
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}
