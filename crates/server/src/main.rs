use std::{net::SocketAddr, sync::Arc};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod providers;
mod subscribe;

use app_state::AppState;
use config::load_settings;
use subscribe::{
    method_not_allowed, payload_too_large_as_json, subscribe_default, subscribe_klaviyo,
    subscribe_mailerlite,
};

const MAX_SUBSCRIBE_BODY_BYTES: usize = 16 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings()?;
    let http = reqwest::Client::builder()
        .timeout(settings.upstream_timeout())
        .build()?;
    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(
        %addr,
        default_provider = %settings.default_provider,
        static_dir = ?settings.static_dir,
        "waitlist server starting"
    );

    let app = build_router(Arc::new(AppState::new(settings, http)));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let static_dir = state.settings.static_dir.clone();

    let subscriptions = Router::new()
        .route(
            "/api/subscribe",
            post(subscribe_default).fallback(method_not_allowed),
        )
        .route(
            "/api/klaviyo-subscribe",
            post(subscribe_klaviyo).fallback(method_not_allowed),
        )
        .route(
            "/api/mailerlite-subscribe",
            post(subscribe_mailerlite).fallback(method_not_allowed),
        )
        .route(
            "/.netlify/functions/klaviyo-subscribe",
            post(subscribe_klaviyo).fallback(method_not_allowed),
        )
        .route(
            "/.netlify/functions/mailerlite-subscribe",
            post(subscribe_mailerlite).fallback(method_not_allowed),
        )
        .layer(RequestBodyLimitLayer::new(MAX_SUBSCRIBE_BODY_BYTES))
        .layer(middleware::map_response(payload_too_large_as_json));

    let router = Router::new()
        .route("/healthz", get(healthz))
        .merge(subscriptions)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
