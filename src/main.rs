use std::{sync::Arc, time::Duration};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docintel_forwarder::{
    config::AppConfig,
    forwarder::default_forwarders,
    handlers::{build_router, AppState},
    telemetry::{ConsolePlugin, MetricsRegistry},
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    info!("Loading application configuration");
    let config = match AppConfig::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    debug!("Configuration loaded: {:?}", config);

    debug!("Setting up CORS layer with 1-hour max age");
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let metrics_registry = Arc::new(MetricsRegistry::new(config.debug_mode));
    if config.debug_mode {
        debug!("Registering Console plugin for exchange records");
        metrics_registry
            .register_exporter(Box::new(ConsolePlugin::new()))
            .await;
    }

    let state = AppState::new(config.clone(), default_forwarders(), metrics_registry);
    let app = build_router(state).layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Document Intelligence simulator listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap_or_else(|e| {
            error!("Server error: {}", e);
            std::process::exit(1);
        });
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install CTRL+C signal handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            debug!("CTRL+C signal received");
        },
        _ = terminate => {
            debug!("Terminate signal received");
        },
    }
    info!("Shutdown signal received, starting graceful shutdown");
}
