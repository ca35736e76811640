//! JWT claims and user roles.

use serde::{Deserialize, Serialize};

/// User role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular user.
    #[default]
    User,
    /// Administrator; may view the user list.
    Admin,
    /// Super administrator; may change roles and delete users.
    SuperAdmin,
}

impl Role {
    /// Check whether this role is a member of the given allow-list.
    ///
    /// Every role-gated route goes through this predicate.
    pub fn allowed(&self, roles: &[Role]) -> bool {
        roles.contains(self)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
            Role::SuperAdmin => write!(f, "super_admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "super_admin" => Ok(Role::SuperAdmin),
            _ => Err(format!("unknown role: {}", s)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Identity embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUser {
    /// User ID.
    pub id: String,
    /// Role at the time the token was issued.
    pub role: Role,
}

/// JWT claims structure.
///
/// The identity lives in a nested `user` object; `exp` drives rejection
/// of stale tokens during verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated identity.
    pub user: TokenUser,

    /// Issued at (as Unix timestamp).
    pub iat: i64,

    /// Expiration time (as Unix timestamp).
    pub exp: i64,
}
