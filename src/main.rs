use dotenvy::dotenv;
use homework_status_bot::config::Settings;
use homework_status_bot::logging::init_logging;
use homework_status_bot::runner::run_bot;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenv().ok();

    let settings = match Settings::new() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&settings.log_file).map_err(|e| {
        eprintln!("Failed to initialize logging: {e}");
        e
    })?;

    info!("Starting Homework Status Bot...");

    let shutdown = CancellationToken::new();
    spawn_ctrlc_handler(shutdown.clone());

    match run_bot(&settings, shutdown).await {
        Ok(()) => {}
        Err(e) if e.is_fatal() => {
            error!(severity = "critical", "Bot stopped: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            error!("Bot stopped: {e}");
            return Err(e.into());
        }
    }

    info!("Bot stopped.");
    Ok(())
}

fn spawn_ctrlc_handler(shutdown: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, shutting down");
                shutdown.cancel();
            }
            Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
        }
    });
}
