//! Main entry point for the TourGo backend.
//!
//! This file initializes the Axum web server, sets up the database pool and
//! shared state, registers all API routes and middleware, and spawns the
//! reminder polling scheduler. It orchestrates the application's startup,
//! graceful shutdown included.

mod api;
mod auth;
mod cache;
mod config;
mod database;
mod errors;
mod middleware;
mod services;
mod state;
mod utils;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use config::Config;
use notify::{LogSink, NotificationChannel};
use services::reminders::OverdueSource;
use services::scheduler::{spawn_reminder_scheduler, SchedulerConfig};
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();
    let state = AppState::new(config)
        .await
        .expect("Database unavailable at startup!");

    let channel: Arc<dyn NotificationChannel> = if state.config.realtime_push_enabled {
        Arc::clone(&state.hub) as Arc<dyn NotificationChannel>
    } else {
        Arc::new(LogSink)
    };
    let scheduler = spawn_reminder_scheduler(
        SchedulerConfig::from_app_config(&state.config),
        Arc::clone(&state.reminders) as Arc<dyn OverdueSource>,
        channel,
    );

    let app = Router::new()
        .route("/", get(root_handler))
        .nest("/api/auth", auth::routes::router())
        .nest("/api/tasks", api::tasks::routes::router(state.clone()))
        .nest("/api/notifications", api::notifications::routes::router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::log_server_errors,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind server port!");
    info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error!");

    if scheduler.shutdown().await.is_ok() {
        info!("reminder scheduler signalled to stop");
    }
}

async fn root_handler() -> &'static str {
    "Welcome to TourGo!"
}

fn cors_layer(config: &Config) -> CorsLayer {
    match &config.cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>().expect("Invalid CORS origin!"))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION]),
        None => CorsLayer::new(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
