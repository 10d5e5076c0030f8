//! Tomato Timer - A state-managed HTTP server driving a Pomodoro focus timer
//!
//! This is the main entry point for the tomato-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use tomato_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{alerts_task, countdown_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("tomato_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting tomato-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, work={}min, short break={}min, long break={}min, long break every {} sessions",
        config.host, config.port, config.work, config.short_break, config.long_break, config.long_break_interval
    );

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.initial_timer(),
    ));

    // Start the countdown tick driver
    let countdown_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_task(countdown_state).await;
    });

    // Start the notification renderer
    let alerts_state = Arc::clone(&state);
    tokio::spawn(async move {
        alerts_task(alerts_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start               - Start or resume the countdown");
    info!("  POST /pause               - Pause the countdown in place");
    info!("  POST /reset               - Reset the session to idle");
    info!("  POST /skip                - Skip to the next phase");
    info!("  POST /duration/:kind      - Set a phase duration in minutes");
    info!("  POST /long-break-interval - Set the long break threshold");
    info!("  GET  /status              - Current timer snapshot");
    info!("  GET  /health              - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
