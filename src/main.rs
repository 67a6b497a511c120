use jobboard_auth::{config::Config, routes::app_router, state::AppState, AppError};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobboard_auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env()?;
    // Keys are loaded here, so a bad key file stops the process before it listens.
    let state = Arc::new(AppState::new(&cfg).await?);

    let app = app_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&cfg.bind_addr)
        .await
        .map_err(|e| AppError::Internal(format!("bind {}: {e}", cfg.bind_addr)))?;
    tracing::info!(addr = %cfg.bind_addr, "listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))
}
