/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML configuration file
[POS]:    CLI initialization layer
[UPDATE]: When BoardConfig schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::PathBuf;

use trackit_board::BoardConfig;
use trackit_board::config::{ApiConfig, SessionConfig, SyncConfig};

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Welcome to TrackIt").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a client configuration.").dim()
    );

    if output.exists() {
        let overwrite = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} exists. Overwrite?", output.display()))
            .default(false)
            .interact()?;
        if !overwrite {
            println!("{}", style("Aborted.").yellow());
            return Ok(());
        }
    }

    let theme = ColorfulTheme::default();
    let defaults = BoardConfig::default();

    let base_url: String = Input::with_theme(&theme)
        .with_prompt("API base URL")
        .default(defaults.api.base_url.clone())
        .interact_text()?;

    let poll_interval_secs: u64 = Input::with_theme(&theme)
        .with_prompt("Refresh interval (seconds)")
        .default(defaults.sync.poll_interval_secs)
        .validate_with(|value: &u64| {
            if *value > 0 {
                Ok(())
            } else {
                Err("must be greater than zero")
            }
        })
        .interact_text()?;

    let config = BoardConfig {
        api: ApiConfig {
            base_url: base_url.trim().to_string(),
            ..defaults.api
        },
        sync: SyncConfig { poll_interval_secs },
        session: SessionConfig::default(),
    };
    config.validate().context("validate configuration")?;
    config.write_to(&output)?;

    println!(
        "{} {}",
        style("Configuration written to").green(),
        style(output.display()).cyan()
    );
    Ok(())
}
