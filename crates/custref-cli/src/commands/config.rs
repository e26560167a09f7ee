//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &mut Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", config.redacted().to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init { force } => {
            init_config(config, path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", path.display()))
            );
        }
        ConfigAction::Set { key, value } => {
            set_value(config, path, &key, &value)?;
            println!("{}", formatter.success(&format!("Set {} = {}", key, value)));
        }
    }

    Ok(())
}

/// Write defaults, refusing to clobber an existing file unless forced.
fn init_config(config: &mut Config, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    *config = Config::default();
    config.save_to(path)
}

/// Update one value and persist it; a mapping change must stay complete.
fn set_value(config: &mut Config, path: &Path, key: &str, value: &str) -> Result<()> {
    let mut updated = config.clone();
    updated.set(key, value)?;
    updated.field_mapping()?;
    updated.save_to(path)?;
    *config = updated;
    Ok(())
}
