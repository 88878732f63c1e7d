// bases/download_cli/src/main.rs
mod app;
mod config;
mod output;

use app::App;
use clap::Parser;
use color_eyre::Result;
use config::{CliArgs, Config};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    let config = Config::from_args(args);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Ctrl-C stops new work; whatever is in flight finishes
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current tracks");
            on_interrupt.cancel();
        }
    });

    let mut app = App::new(config);

    if let Err(error) = app.run(&cancel).await {
        app.print_error(&error);
        std::process::exit(1);
    }
    Ok(())
}
