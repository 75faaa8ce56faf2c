//! Restock CLI - replenishment suggestions from sales and stock reports.

mod cli;
mod commands;
mod logging;
mod manifest;

use std::path::Path;

use clap::Parser;
use cli::{Cli, Commands};
use restock::RestockConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Calculate {
            fulfillment,
            physical,
            sales,
            workbook,
            company,
            params,
            output,
        } => commands::calculate::run(
            commands::calculate::Inputs {
                fulfillment,
                physical,
                sales,
                workbook,
                company,
            },
            params.apply(config),
            output,
            cli.verbose,
        ),

        Commands::Consolidate {
            manifest,
            supplier,
            company_filter,
            sku,
            params,
            output,
        } => commands::consolidate::run(
            manifest,
            supplier,
            company_filter,
            sku,
            params.apply(config),
            output,
            cli.verbose,
        ),

        Commands::Allocate {
            manifest,
            sku,
            quantity,
            json,
            params,
        } => commands::allocate::run(manifest, sku, quantity, json, params.apply(config)),

        Commands::Order {
            manifest,
            supplier,
            company,
            date,
            sequence,
            set,
            add,
            output,
            params,
        } => commands::order::run(
            manifest,
            supplier,
            company,
            date,
            sequence,
            commands::order::Edits { set, add },
            output,
            params.apply(config),
        ),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<RestockConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(RestockConfig::from_json_file(path)?),
        None => Ok(RestockConfig::default()),
    }
}
