use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinedex_core::{
    catalog::PostgresCatalogRepository, providers::ImdbApiProvider,
};
use cinedex_server::{config::Config, routes, state::AppState};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "cinedex-server")]
#[command(about = "Movie catalog server with IMDb search and import")]
struct Cli {
    /// Bind address override (defaults to SERVER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port override (defaults to SERVER_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.server_host = host;
    }
    if let Some(port) = cli.port {
        config.server_port = port;
    }

    let catalog = PostgresCatalogRepository::connect(&config.database_url)
        .await
        .context("Failed to connect to the database")?;
    catalog
        .initialize_schema()
        .await
        .context("Failed to run database migrations")?;

    let provider = ImdbApiProvider::new(config.metadata_api_base_url.clone());
    info!(base_url = %config.metadata_api_base_url, "Metadata provider ready");

    let cors = build_cors_layer(&config.cors_allowed_origins);
    let addr: SocketAddr =
        format!("{}:{}", config.server_host, config.server_port)
            .parse()
            .context("Invalid server address")?;

    let state = AppState::new(Arc::new(catalog), Arc::new(provider));
    let app = routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
