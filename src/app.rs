/*
 * Responsibility
 * - Logging/panic setup -> Config -> dependencies -> Router
 * - HTTP-level middleware
 * - axum::serve() with graceful shutdown
 */
use std::{panic, process, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repos::{self, PgSequenceRepo, PgTaskListRepo, PgUserRepo};
use crate::services::{
    AuthService, TaskListService,
    auth::{PasswordService, TokenSigner},
};
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,task_manager=debug,tower_http=debug cargo run
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
        // stderr can be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env().map_err(|e| {
        tracing::error!(error = %e, "refusing to start");
        e
    })?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = repos::connect(config)
        .await
        .context("failed to connect to the database")?;
    repos::migrate(&pool).await.context("failed to run migrations")?;

    let op_timeout = config.db_operation_timeout;
    let users = Arc::new(PgUserRepo::new(pool.clone(), op_timeout));
    let sequences = Arc::new(PgSequenceRepo::new(pool.clone(), op_timeout));
    let task_lists = Arc::new(PgTaskListRepo::new(pool, sequences, op_timeout));

    let passwords = PasswordService::new(config.password_hash_cost)?;
    let tokens = TokenSigner::new(
        config.auth_token_secret.as_bytes(),
        config.auth_issuer.clone(),
        config.auth_token_ttl_seconds,
    );

    let auth = Arc::new(AuthService::new(users, passwords, tokens));
    let task_lists = Arc::new(TaskListService::new(task_lists));

    Ok(AppState::new(auth, task_lists))
}

pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    middleware::http::apply(router, request_timeout)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down server gracefully");
}
