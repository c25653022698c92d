use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::session_controller::SessionController;
use crate::dto::api_response::ApiResponse;
use crate::dto::session_dto::{SelectRoleRequest, SessionResponse};
use crate::models::{LoginForm, RegistrationForm};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_session_router() -> Router<AppState> {
    Router::new()
        .route("/", get(current_session))
        .route("/role", post(select_role))
        .route("/login-flow", post(switch_to_login))
        .route("/back", post(back_to_selection))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

fn controller(state: &AppState) -> SessionController {
    SessionController::new(state.session.clone(), state.store.clone())
}

async fn current_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(controller(&state).current().await)
}

async fn select_role(
    State(state): State<AppState>,
    Json(request): Json<SelectRoleRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let response = controller(&state).select_role(request.role).await?;
    Ok(Json(response))
}

async fn switch_to_login(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let response = controller(&state).switch_to_login().await?;
    Ok(Json(response))
}

async fn back_to_selection(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let response = controller(&state).back_to_selection().await?;
    Ok(Json(response))
}

async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    let response = controller(&state).register(form).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Account created".to_string(),
    )))
}

async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    let response = controller(&state).login(form).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn logout(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(controller(&state).logout().await)
}
