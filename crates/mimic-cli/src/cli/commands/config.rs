//! Config management commands.

use anyhow::Result;
use mimic_core::Config;
use mimic_core::config::paths;

pub fn path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}

pub fn init() -> Result<()> {
    let path = paths::config_path();
    if path.exists() {
        anyhow::bail!("Config already exists at {}", path.display());
    }

    Config::default().write_to(&path)?;
    println!("Created config at {}", path.display());
    Ok(())
}
