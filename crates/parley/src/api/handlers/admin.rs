//! Admin-only handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::auth::{RequireAdmin, RequireSuperAdmin, Role};
use crate::user::UserInfo;

use super::MessageResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// List all users (admin or super-admin).
#[instrument(skip(state, _user))]
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
) -> ApiResult<Json<Vec<UserInfo>>> {
    let users = state.users.list_users().await?;

    let user_infos: Vec<UserInfo> = users.into_iter().map(|u| u.into()).collect();
    info!(count = user_infos.len(), "Listed users");
    Ok(Json(user_infos))
}

/// Request body for a role change.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// Change a user's role (super-admin only).
///
/// The new role is validated against the enumeration before anything is
/// written. Tokens issued before the change keep their embedded role until
/// they expire.
#[instrument(skip(state, _user, request))]
pub async fn update_user_role(
    State(state): State<AppState>,
    RequireSuperAdmin(_user): RequireSuperAdmin,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateRoleRequest>,
) -> ApiResult<Json<UserInfo>> {
    let role: Role = request
        .role
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid role specified"))?;

    let user = state.users.update_role(&user_id, role).await?;

    info!(user_id = %user.id, role = %role, "Updated user role");
    Ok(Json(user.into()))
}

/// Delete a user (super-admin only).
#[instrument(skip(state, _user))]
pub async fn delete_user(
    State(state): State<AppState>,
    RequireSuperAdmin(_user): RequireSuperAdmin,
    Path(user_id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    state.users.delete_user(&user_id).await?;

    info!(user_id = %user_id, "Deleted user");
    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}
