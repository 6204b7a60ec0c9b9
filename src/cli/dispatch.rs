use anyhow::Result;
use leadsift::commands::{balance, checkpoint, run, status};
use leadsift::config::{Settings, SettingsOverrides};

use super::types::{CheckpointCommands, Cli, Commands};

pub fn dispatch(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let api_key = cli.api_key.as_deref();

    match cli.command {
        Commands::Run { input, tuning } => {
            let settings = settings.apply(&tuning.overrides());
            run::execute(&input, &settings, api_key)
        }
        Commands::Status {
            input,
            output_dir,
            batch_size,
        } => {
            let settings = settings.apply(&SettingsOverrides {
                output_dir,
                batch_size,
                ..Default::default()
            });
            status::execute(input.as_deref(), &settings)
        }
        Commands::Checkpoint {
            command,
            output_dir,
        } => {
            let settings = settings.apply(&SettingsOverrides {
                output_dir,
                ..Default::default()
            });
            match command {
                CheckpointCommands::Show => checkpoint::show(&settings),
                CheckpointCommands::Clear => checkpoint::clear(&settings),
            }
        }
        Commands::Balance => {
            settings.validate()?;
            balance::execute(&settings, api_key)
        }
    }
}
