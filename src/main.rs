use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;

use axum::{
    http::{Request, Uri},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::RelayConfig;
use crate::contentful_api_service::ContentfulAPIService;
use crate::deepl_api_service::DeepLAPIService;

mod config;
mod contentful_api_service;
mod deepl_api_service;
mod env_utils;
mod error;
mod route_handlers;
#[cfg(test)]
mod test_utils;
mod utils;

/// Read-only per-process state shared by every webhook request.
pub struct AppState {
    pub deepl: DeepLAPIService,
    pub contentful: ContentfulAPIService,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Self {
        let client = reqwest::Client::new();
        Self {
            deepl: DeepLAPIService::new(client.clone(), config.deepl),
            contentful: ContentfulAPIService::new(client, config.contentful),
        }
    }
}

struct RequestUri(Uri);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("initializing app state ...");

    let config = RelayConfig::from_env();
    tracing::debug!("Loaded config: {:?}", config);
    let state = Arc::new(AppState::new(config));

    let port = env_utils::get_port();
    let addr = format!("[::]:{port}")
        .parse::<std::net::SocketAddr>()
        .context("unable to parse listen address")?;
    let host_uri = env_utils::get_host_uri();

    tracing::info!("Starting server at host: {}", host_uri);

    axum::Server::bind(&addr)
        .serve(
            get_main_router(state)
                .layer(axum::middleware::from_fn(
                    |request: Request<_>, next: Next<_>| async move {
                        let uri = request.uri().clone();

                        let mut response = next.run(request).await;

                        response.extensions_mut().insert(RequestUri(uri));

                        response
                    },
                ))
                .layer(TraceLayer::new_for_http().on_response(
                    |response: &Response, latency: std::time::Duration, _span: &tracing::Span| {
                        let url = match response.extensions().get::<RequestUri>().map(|r| &r.0) {
                            Some(uri) => uri.to_string(),
                            None => "unknown".to_string(),
                        };
                        let status = response.status();
                        let latency = utils::duration_to_ms_string(latency);

                        if url == "/healthcheck" {
                            tracing::trace!("{} {} {}", url, status, latency);
                            return;
                        }

                        tracing::info!("{} {} {}", url, status, latency);
                    },
                ))
                .into_make_service(),
        )
        .await
        .context("error while starting API server")?;

    Ok(())
}

/**
 * main router for the relay: the Contentful webhook route plus a health check
 **/
fn get_main_router(state: Arc<AppState>) -> Router {
    tracing::debug!("initializing router ...");

    Router::new()
        .route(
            "/contentful-webhook",
            post(route_handlers::contentful_webhook::handler),
        )
        .route("/healthcheck", get(|| async { "Ok" }))
        .with_state(state)
}
