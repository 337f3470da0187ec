use clap::Parser;
use escalaflex::cli::Cli;
use escalaflex::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    startup::init_logging(cli.verbose)?;

    info!("Starting EscalaFlex");

    // Load configuration
    let config = startup::load_config()?;

    // Run the command
    let output = startup::run(cli, config).await?;
    println!("{}", output);

    Ok(())
}
