use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, put},
    Json, Router,
};

use crate::controllers::fleet_controller::FleetController;
use crate::dto::api_response::ApiResponse;
use crate::dto::fleet_dto::{
    BusDetailResponse, DriverAssignmentResponse, FleetStatsResponse, MutationResponse,
    RouteDetailResponse, SearchQuery, TrackingRequest, UpdateBusStatusRequest,
};
use crate::models::{Bus, Driver, DriverPatch};
use crate::services::fleet_service::{BusEdit, BusEditOutcome};
use crate::state::AppState;
use crate::store::FleetSnapshot;
use crate::utils::errors::AppError;

pub fn create_fleet_router() -> Router<AppState> {
    Router::new()
        .route("/snapshot", get(snapshot))
        .route("/search", get(search))
        .route("/stats", get(stats))
        .route("/buses/:id", get(bus_detail))
        .route("/buses/:id/status", put(set_bus_status))
        .route("/buses/:id/manage", put(save_bus_edit))
        .route("/routes/:id", get(route_detail))
        .route("/routes/:id/active-bus", get(active_bus_on_route))
        .route("/drivers/:id", patch(patch_driver))
        .route("/me/assignment", get(my_assignment))
        .route("/me/tracking", put(set_my_tracking))
}

fn controller(state: &AppState) -> FleetController {
    FleetController::new(state.store.clone(), state.session.clone())
}

async fn snapshot(State(state): State<AppState>) -> Result<Json<FleetSnapshot>, AppError> {
    let response = controller(&state).snapshot().await?;
    Ok(Json(response))
}

async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<BusDetailResponse>>, AppError> {
    let response = match controller(&state).search(&query.q).await? {
        Some(detail) => ApiResponse::success(detail),
        None => ApiResponse {
            success: true,
            message: Some("No active bus found for this route number.".to_string()),
            data: None,
        },
    };
    Ok(Json(response))
}

async fn stats(State(state): State<AppState>) -> Result<Json<FleetStatsResponse>, AppError> {
    let response = controller(&state).stats().await?;
    Ok(Json(response))
}

async fn bus_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BusDetailResponse>, AppError> {
    let response = controller(&state).bus_detail(&id).await?;
    Ok(Json(response))
}

async fn set_bus_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateBusStatusRequest>,
) -> Result<Json<MutationResponse<Bus>>, AppError> {
    let response = controller(&state).set_bus_status(&id, request.status).await?;
    Ok(Json(response))
}

async fn save_bus_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(edit): Json<BusEdit>,
) -> Result<Json<ApiResponse<BusEditOutcome>>, AppError> {
    let outcome = controller(&state).save_bus_edit(&id, edit).await?;
    Ok(Json(ApiResponse::success_with_message(
        outcome,
        "Bus updated".to_string(),
    )))
}

async fn route_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RouteDetailResponse>, AppError> {
    let response = controller(&state).route_detail(&id).await?;
    Ok(Json(response))
}

async fn active_bus_on_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Bus>>, AppError> {
    let response = match controller(&state).active_bus_on_route(&id).await? {
        Some(bus) => ApiResponse::success(bus),
        None => ApiResponse {
            success: true,
            message: Some("No bus is online on this route.".to_string()),
            data: None,
        },
    };
    Ok(Json(response))
}

async fn patch_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<DriverPatch>,
) -> Result<Json<MutationResponse<Driver>>, AppError> {
    let response = controller(&state).patch_driver(&id, patch).await?;
    Ok(Json(response))
}

async fn my_assignment(State(state): State<AppState>) -> Result<Json<DriverAssignmentResponse>, AppError> {
    let response = controller(&state).my_assignment().await?;
    Ok(Json(response))
}

async fn set_my_tracking(
    State(state): State<AppState>,
    Json(request): Json<TrackingRequest>,
) -> Result<Json<MutationResponse<Bus>>, AppError> {
    let response = controller(&state).set_my_tracking(request.status).await?;
    Ok(Json(response))
}
