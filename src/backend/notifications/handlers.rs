//! Notification HTTP Handlers

use axum::extract::{Path, State};

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::{ApiResponse, Notification};

/// `GET /api/notifications` - the caller's notifications, newest first
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> BackendResult<ApiResponse<Vec<Notification>>> {
    let mut tx = state.gateway.begin().await?;
    let notifications = tx.notifications_for(caller.user_id).await?;
    tx.commit().await?;
    Ok(ApiResponse::success("Fetch notifications", notifications))
}

/// `PATCH /api/notifications/{id}/read`
///
/// Someone else's notification is reported as missing.
pub async fn mark_notification_read(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<i64>,
) -> BackendResult<ApiResponse<()>> {
    let mut tx = state.gateway.begin().await?;
    if !tx.mark_notification_read(id, caller.user_id).await? {
        return Err(BackendError::NotFound("Notification not found".to_string()));
    }
    tx.commit().await?;
    Ok(ApiResponse::empty("Notification marked as read"))
}
