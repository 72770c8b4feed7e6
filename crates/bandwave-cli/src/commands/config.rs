//! Show or create the configuration file.

use super::common::load_config;
use bandwave_config::{Config, default_config_path, ensure_user_config_dir};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration file to show [default: the user config file]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the default configuration to the user config file
    #[arg(long)]
    init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    force: bool,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    if args.init {
        ensure_user_config_dir()?;
        let path = default_config_path();
        if path.exists() && !args.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
        Config::default().save(&path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let config = load_config(args.config.as_deref())?;
    let source = match &args.config {
        Some(path) => path.display().to_string(),
        None if default_config_path().is_file() => default_config_path().display().to_string(),
        None => "built-in defaults".to_string(),
    };
    println!("# Source: {source}");
    print!("{}", config.to_toml()?);
    Ok(())
}
