//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, DurationKind};
use super::requests::{DurationUpdate, LongBreakIntervalUpdate};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start() {
        Ok(timer) => {
            info!("Start endpoint called - {} phase running", timer.phase_label);
            Ok(Json(ApiResponse::for_timer(
                "Timer started".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to start timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /pause - Pause the countdown in place
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.pause() {
        Ok(timer) => {
            info!("Pause endpoint called - {} remaining", timer.clock);
            Ok(Json(ApiResponse::for_timer(
                "Timer paused".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to pause timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Reset the session back to idle
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        Ok(timer) => {
            info!("Reset endpoint called - session re-initialized");
            Ok(Json(ApiResponse::for_timer(
                "Timer session reset".to_string(),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /skip - Advance to the next phase on demand
pub async fn skip_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.skip() {
        Ok(timer) => {
            info!("Skip endpoint called - now in {} phase", timer.phase_label);
            Ok(Json(ApiResponse::for_timer(
                format!("Skipped to {}", timer.phase_label),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to skip phase: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /duration/{kind} - Reconfigure a phase duration in minutes.
/// Unknown kinds are rejected by the path deserializer with a 400.
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<DurationKind>,
    Json(update): Json<DurationUpdate>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.set_duration(kind, update.minutes) {
        Ok(timer) => {
            info!("Duration endpoint called - {:?} set to {} minutes", kind, update.minutes);
            Ok(Json(ApiResponse::for_timer(
                format!("Duration updated to {} minutes", update.minutes),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to update duration: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /long-break-interval - Reconfigure the long-break threshold
pub async fn long_break_interval_handler(
    State(state): State<Arc<AppState>>,
    Json(update): Json<LongBreakIntervalUpdate>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.set_long_break_interval(update.sessions) {
        Ok(timer) => {
            info!("Interval endpoint called - long break every {} sessions", update.sessions);
            Ok(Json(ApiResponse::for_timer(
                format!("Long break every {} sessions", update.sessions),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to update long break interval: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the full timer snapshot and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_snapshot() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer snapshot: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
