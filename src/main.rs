use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use quotes_bff::app::app::App;
use quotes_bff::util::logger::Logger;


#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    let dotenv_result = dotenv();

    let _logger = match Logger::new() {
        Ok(logger) => Some(logger),
        Err(e) => {
            let env_filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,quotes_bff=debug"));
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(true)
                .try_init();
            warn!("⚠️ File logging disabled: {}", e);
            None
        }
    };

    info!("🚀 Starting quotes BFF");
    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialise application: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = app.start().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
