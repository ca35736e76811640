//! Authentication middleware and token issue/verify.

use axum::{
    extract::{FromRequestParts, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation, decode, encode};
use std::sync::Arc;
use tracing::warn;

use super::{AuthConfig, AuthError, Claims, Role, TokenUser};

/// Request header carrying the session token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Extract the session token from request headers.
fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Authentication state shared across handlers.
///
/// Issues and verifies the stateless session tokens. Tokens are never
/// persisted server-side; a token remains valid until its expiry.
#[derive(Clone)]
pub struct AuthState {
    config: Arc<AuthConfig>,
    encoding_key: Option<EncodingKey>,
    decoding_key: Option<DecodingKey>,
}

impl AuthState {
    /// Create new auth state from config.
    /// Resolves `env:VAR_NAME` syntax in jwt_secret at construction time.
    pub fn new(mut config: AuthConfig) -> Self {
        if let Ok(Some(resolved)) = config.resolve_jwt_secret() {
            config.jwt_secret = Some(resolved);
        }

        let encoding_key = config
            .jwt_secret
            .as_ref()
            .map(|s| EncodingKey::from_secret(s.as_bytes()));
        let decoding_key = config
            .jwt_secret
            .as_ref()
            .map(|s| DecodingKey::from_secret(s.as_bytes()));

        Self {
            config: Arc::new(config),
            encoding_key,
            decoding_key,
        }
    }

    /// Get allowed CORS origins from config.
    pub fn allowed_origins(&self) -> &[String] {
        &self.config.allowed_origins
    }

    /// Issue a signed session token for a user.
    pub fn issue_token(&self, user_id: &str, role: Role) -> Result<String, AuthError> {
        let encoding_key = self
            .encoding_key
            .as_ref()
            .ok_or_else(|| AuthError::Internal("no JWT secret configured".to_string()))?;

        let now = Utc::now().timestamp();
        let claims = Claims {
            user: TokenUser {
                id: user_id.to_string(),
                role,
            },
            iat: now,
            exp: now + self.config.token_ttl_secs,
        };

        encode(&jsonwebtoken::Header::default(), &claims, encoding_key)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Verify a session token and return its claims.
    ///
    /// Rejects tokens whose signature does not match or whose expiry has
    /// passed; both surface to the client as the same 401.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let decoding_key = self
            .decoding_key
            .as_ref()
            .ok_or_else(|| AuthError::Internal("no JWT secret configured".to_string()))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Expiry is exact: a token issued for one hour dies at the hour.
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, decoding_key, &validation).map_err(|e| {
            warn!("token validation failed: {:?}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }
}

/// Authenticated user extracted from request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Verified claims.
    pub claims: Claims,
}

impl CurrentUser {
    /// Get the user ID.
    pub fn id(&self) -> &str {
        &self.claims.user.id
    }

    /// Get the user's role.
    pub fn role(&self) -> Role {
        self.claims.user.role
    }
}

/// Extract authentication from request.
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

/// Authentication middleware.
///
/// Reads the token from the `x-auth-token` header, verifies it and
/// injects `CurrentUser` into request extensions. Missing or invalid
/// tokens short-circuit the request before any handler runs.
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = token_from_headers(req.headers()).ok_or(AuthError::MissingToken)?;
    let claims = auth.verify_token(token)?;

    req.extensions_mut().insert(CurrentUser { claims });

    Ok(next.run(req).await)
}

/// Roles allowed to view administrative listings.
const ADMIN_ROLES: &[Role] = &[Role::Admin, Role::SuperAdmin];

/// Roles allowed to mutate other users.
const SUPER_ADMIN_ROLES: &[Role] = &[Role::SuperAdmin];

fn require_role(parts: &mut Parts, roles: &[Role]) -> Result<CurrentUser, AuthError> {
    let user = parts
        .extensions
        .get::<CurrentUser>()
        .cloned()
        .ok_or(AuthError::MissingToken)?;

    if !user.role().allowed(roles) {
        return Err(AuthError::InsufficientPermissions);
    }

    Ok(user)
}

/// Require admin or super-admin role.
///
/// Use as an extractor in handlers that require administrative access.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, ADMIN_ROLES).map(RequireAdmin)
    }
}

/// Require the super-admin role.
#[derive(Debug, Clone)]
pub struct RequireSuperAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireSuperAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, SUPER_ADMIN_ROLES).map(RequireSuperAdmin)
    }
}
