//! Authentication handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::auth::CurrentUser;
use crate::user::UserInfo;

use super::MessageResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// Request body for register and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Response for register and login: the session token plus the user.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Register a new user.
///
/// New registrations always get the default `user` role.
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let user = state
        .users
        .register(&request.username, &request.password)
        .await?;

    let token = state.auth.issue_token(&user.id, user.role)?;

    info!(user_id = %user.id, "User registered successfully");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// Log in with username and password.
///
/// Unknown usernames and wrong passwords produce the identical response;
/// the uniform message is a deliberate anti-enumeration policy.
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let user = state
        .users
        .verify_credentials(&request.username, &request.password)
        .await?
        .ok_or_else(|| ApiError::bad_request("Invalid Credentials"))?;

    let token = state.auth.issue_token(&user.id, user.role)?;

    info!(user_id = %user.id, "User logged in successfully");

    Ok(Json(AuthResponse {
        token,
        user: user.into(),
    }))
}

/// Get the current user's details.
#[instrument(skip(state, user))]
pub async fn get_me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<UserInfo>> {
    let db_user = state
        .users
        .get_user(user.id())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(db_user.into()))
}

/// Request body for changing own password.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Change the current user's password.
///
/// Requires the correct current password before the new one is accepted.
#[instrument(skip(state, user, request))]
pub async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (current_password, new_password) = match (&request.current_password, &request.new_password)
    {
        (Some(current), Some(new)) if !current.is_empty() && !new.is_empty() => (current, new),
        _ => {
            return Err(ApiError::bad_request(
                "Current password and new password are required",
            ));
        }
    };

    let db_user = state
        .users
        .get_user(user.id())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    if !state.users.verify_password(&db_user, current_password)? {
        return Err(ApiError::bad_request("Invalid current password"));
    }

    state.users.update_password(user.id(), new_password).await?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully".to_string(),
    }))
}
