//! `dradis config` command - Configuration inspection
//!
//! Settings come from the global config file (or `--config`), overridden
//! by `DRADIS_URL`, `DRADIS_API_KEY`, `DRADIS_VERIFY` and `DRADIS_TIMEOUT`.

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::commands::utils::{load_config, print_serialized};
use crate::cli::helpers::mask_secret;
use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (API key masked)
    Show,

    /// Show the path of the global config file
    Path,
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Path => run_path(global),
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let mut config = load_config(global)?;
    config.api_key = config.api_key.as_deref().map(mask_secret);

    if print_serialized(&config, global.format)? {
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    print_config_value("dradis_url", config.url.as_deref());
    print_config_value("api_key", config.api_key.as_deref());
    println!("  {}: {}", style("verify").cyan(), config.verify());
    println!("  {}: {}", style("timeout_secs").cyan(), config.timeout_secs());

    if let Err(e) = config.validate() {
        println!();
        println!("{} {}", style("!").yellow(), e);
    }
    Ok(())
}

fn print_config_value(key: &str, value: Option<&str>) {
    match value {
        Some(v) => println!("  {}: {}", style(key).cyan(), v),
        None => println!("  {}: {}", style(key).cyan(), style("(not set)").dim()),
    }
}

fn run_path(global: &GlobalOpts) -> Result<()> {
    if let Some(ref path) = global.config {
        println!("{}", path.display());
        return Ok(());
    }
    let path = Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine the config directory"))?;
    if global.quiet {
        println!("{}", path.display());
    } else {
        let state = if path.exists() {
            style("exists").green()
        } else {
            style("not found").dim()
        };
        println!("{} ({})", path.display(), state);
    }
    Ok(())
}
