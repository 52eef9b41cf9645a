mod config;
mod constants;
mod db;
mod error;
mod handlers;
mod server;
mod weather;


use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("picnic_server=debug,tower_http=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = server::run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
