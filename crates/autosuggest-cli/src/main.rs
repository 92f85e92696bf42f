// Autosuggest demo entry point

use anyhow::Result;
use autosuggest_cli::{logging, App, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    tracing::info!("Starting autosuggest demo, logging to {}", log_path.display());

    let config = cli.autocomplete_config()?;
    let source = cli.source()?;

    let mut app = App::new(source, config, &cli.initial)?;
    let result = app.run().await;
    let value = app.finish().await;

    match result {
        Ok(()) => {
            tracing::info!("Demo exited with value {:?}", value);
            println!("{}", value);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Demo error: {}", e);
            Err(e)
        }
    }
}
