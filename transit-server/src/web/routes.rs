//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::warn;

use crate::domain::{Coordinate, StopIndex};
use crate::planner::PlanError;
use crate::routing::WalkingRouter;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<R>(state: AppState<R>) -> Router
where
    R: WalkingRouter + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/stops", get(list_stops::<R>))
        .route("/api/route", get(route_geometry::<R>))
        .route("/api/itinerary", post(plan_itinerary::<R>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All stops in route order.
async fn list_stops<R>(State(state): State<AppState<R>>) -> Json<StopsResponse> {
    let stops = state
        .network
        .stops()
        .iter()
        .enumerate()
        .map(|(i, stop)| StopResult::from_stop(StopIndex(i), stop))
        .collect();

    Json(StopsResponse { stops })
}

/// The reference route polyline.
async fn route_geometry<R>(State(state): State<AppState<R>>) -> Json<RouteGeometryResponse> {
    Json(RouteGeometryResponse::from_polyline(state.network.route()))
}

fn parse_coordinate(field: &str, value: &str) -> Result<Coordinate, AppError> {
    value.parse().map_err(|e| AppError::BadRequest {
        message: format!("Invalid {field} coordinate: {e}"),
    })
}

/// Plan an itinerary between two points.
async fn plan_itinerary<R>(
    State(state): State<AppState<R>>,
    body: Bytes,
) -> Result<Json<ItineraryResponse>, AppError>
where
    R: WalkingRouter + Send + Sync + 'static,
{
    // Parse JSON manually so we can log the body on failure
    let req: PlanItineraryRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid itinerary request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let from = parse_coordinate("from", &req.from)?;
    let to = parse_coordinate("to", &req.to)?;
    let mode = req.mode.unwrap_or(state.planner.config().default_mode);

    let itinerary = state
        .planner
        .plan(&state.network, from, to, mode)
        .await
        .map_err(AppError::from)?;

    Ok(Json(ItineraryResponse::from_itinerary(&itinerary)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unprocessable { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::NoStops => AppError::Unprocessable {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
        };

        warn!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
