use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db;
use crate::handlers::*;
use crate::weather::{OpenWeatherClient, WeatherClient};

/// Shared by every request: the database pool and the weather service.
#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) db: DatabaseConnection,
    pub(crate) weather: Arc<dyn WeatherClient>,
}

impl State {
    /// Attempt to create a new State instance, making sure the schema exists.
    pub(crate) async fn try_new(config: &Config) -> Result<State> {
        let db = db::connect(&config.database_url)
            .await
            .context("Failed to connect to the database")?;
        db::create_schema(&db)
            .await
            .context("Failed to create the database schema")?;

        let weather = OpenWeatherClient::new(
            config.weather_api_url.clone(),
            config.weather_api_key.clone(),
        );

        Ok(State {
            db,
            weather: Arc::new(weather),
        })
    }
}

/// Every route of the API, sharing `state`.
pub(crate) fn app(state: State) -> Router {
    Router::new()
        .route("/cities/", get(list_cities).post(create_city))
        .route("/users/", get(list_users).post(create_user))
        .route("/picnics/", get(list_picnics).post(create_picnic))
        .route("/picnic-register/", post(register_to_picnic))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}

/// Run the server.
pub(crate) async fn run() -> Result<()> {
    let config = Config::from_env()?;
    let state = State::try_new(&config).await?;

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    tracing::info!("Listening on {}", config.addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
