use super::state::AppState;
use crate::errors::ApiError;
use crate::models::{LoginRequest, LoginResponse};
use picshare_events::AppEvent;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

/// `POST /api/admin/login`
///
/// A plain comparison against the configured password. Nothing is issued on
/// success; the client only uses the answer to unlock its admin view.
pub async fn admin_login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::Rejected(e.status(), e.body_text()))?;

    if !state.login_delay.is_zero() {
        tokio::time::sleep(state.login_delay).await;
    }

    let success = request.password.as_deref() == Some(&*state.admin_password);
    state.events.emit(AppEvent::AdminLogin { success });

    if !success {
        return Err(ApiError::InvalidPassword);
    }

    Ok(Json(LoginResponse { success: true }))
}
