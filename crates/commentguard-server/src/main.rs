//! CommentGuard Server
//!
//! Loads the classification artifacts once, then serves comment analysis
//! requests until a shutdown signal arrives.

use anyhow::Result;
use clap::Parser;
use commentguard_server::cli::Cli;
use commentguard_server::{create_router, AppState, ServerConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting CommentGuard server");

    // Load configuration
    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("YouTube API: {}", config.youtube_api_url);
    info!("Classifiers: {}", config.classifiers_config.display());
    if !config.api_key_configured() {
        warn!("YOUTUBE_API_KEY is not set; comment analysis requests will be rejected");
    }

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Artifacts must load before serving
    let state = match AppState::new(config, Some(metrics_handle)) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to load classification model: {:#}", e);
            return Err(e.context("startup failed: classification artifacts unavailable"));
        }
    };
    info!("Application state initialized successfully");

    let addr: SocketAddr = format!("{}:{}", cli.listen, cli.port).parse()?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    warn!("Shutdown signal received, stopping server...");
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("commentguard=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("commentguard=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "commentguard_requests_total",
        "Total number of API requests by endpoint"
    );
    metrics::describe_counter!(
        "commentguard_comments_classified_total",
        "Total number of comments classified"
    );
    metrics::describe_counter!(
        "commentguard_comments_flagged_total",
        "Total number of comments flagged"
    );
    metrics::describe_counter!(
        "commentguard_inference_errors_total",
        "Comments reported with the safe default after an inference error"
    );
    metrics::describe_histogram!(
        "commentguard_batch_latency_us",
        metrics::Unit::Microseconds,
        "Batch classification latency in microseconds"
    );
    metrics::describe_counter!("commentguard_errors_total", "Error responses by status code");

    info!("Metrics exporter initialized");
    Ok(handle)
}
