use dotenvy::dotenv;
use greet_bot::config::Settings;
use greet_bot::{logging, runner};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load .env file
    dotenv().ok();

    if let Err(e) = logging::init() {
        eprintln!("Failed to compile log redaction patterns: {e}");
        std::process::exit(1);
    }

    info!("Starting greet bot...");

    let settings = match Settings::new() {
        Ok(s) => {
            info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    runner::run_bot(settings).await;

    info!("Bot stopped.");
}
