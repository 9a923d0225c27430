//! Tankhouse - Main Entry Point
//!
//! Outlet ion concentration prediction for electrolytic copper refining.

use clap::Parser;
use tankhouse::cli::{cmd_check, cmd_params, cmd_predict, cmd_types, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tankhouse=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Types { models } => {
            cmd_types(&models)?;
        }
        Commands::Params { prediction_type } => {
            cmd_params(&prediction_type)?;
        }
        Commands::Check { prediction_type, input } => {
            cmd_check(&prediction_type, &input)?;
        }
        Commands::Predict { prediction_type, input, defaults, models } => {
            cmd_predict(&prediction_type, input.as_ref(), defaults, &models)?;
        }
    }

    Ok(())
}
