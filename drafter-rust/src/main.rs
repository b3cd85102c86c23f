use axum::http::{header, HeaderValue, Method};
use dotenvy::dotenv;
use postdraft::{server, Config, Generator};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxedError> {
    // Load environment variables
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,postdraft=debug,postdraft_sdk=debug")),
        )
        .init();

    let config = Config::from_env()?;
    let generator = Generator::from_config(&config)?;
    if !generator.has_provider() {
        tracing::warn!(
            "no provider credential configured; set GROQ_API_KEY or HUGGINGFACE_API_KEY"
        );
    }

    let app = server::router(Arc::new(generator)).layer(
        CorsLayer::new()
            .allow_origin(config.app_url.parse::<HeaderValue>()?)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true),
    );

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "server listening on http://localhost:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
