use clap::Parser;
use gcp_iam::{cli::Cli, commands, config::Config, logging::init_logging};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color);

    let config = Config::from_cli(&cli)?;

    if let Some(source) = config.environment.source() {
        log::debug!("Using environment file {}", source.display());
    }
    log::debug!("Catalog holds {} services", config.catalog.services().len());

    commands::run(&cli.command, &config)?;

    Ok(())
}
