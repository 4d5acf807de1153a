use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stockroom::config::Config;
use stockroom::{Server, Store};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();

    let server = match Server::bind(config.addr()).await {
        Ok(server) => server,
        Err(e) => {
            error!(addr = %config.addr(), "bind failed: {e}");
            std::process::exit(1);
        }
    };

    info!("Server is running on http://localhost:{}", config.port);

    if let Err(e) = server.serve(stockroom::app(Store::seeded())).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
