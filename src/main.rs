use clap::Parser;

use fuelwatch::adapter::inbound::cli::command::{CheckCommand, Cli, ColorChoice, Commands};
use fuelwatch::adapter::inbound::cli::output::{self, OutputConfig};
use fuelwatch::adapter::inbound::cli::{check, prices, run};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let result = match cli.command {
        Commands::Run(args) => run::execute(&args.config).await,
        Commands::Check(CheckCommand::Config(args)) => check::execute_config(&args.config),
        Commands::Prices(args) => prices::execute(&args.config).await,
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
