/*
 * Responsibility
 * - Tracing + panic hook setup
 * - Config loading → AppState → Router assembly
 * - Middleware order: gate (inside state) → security headers → http (outermost)
 * - Start the server with axum::serve()
 */
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{api, config::Config, middleware, state::AppState};

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,console_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the process. Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env().inspect_err(|e| tracing::error!(error = %e, "config"))?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        auth_app_url = %config.handoff.auth_app_url,
        app_url = %config.handoff.app_url,
        allowed_domains = ?config.handoff.allowed_domains,
        "starting console gate in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = AppState::new(config.handoff);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let router = api::routes();
    let router = middleware::gate::apply(router, state.clone());
    let router = router.with_state(state);
    let router = middleware::security_headers::apply(router);
    middleware::http::apply(router)
}
