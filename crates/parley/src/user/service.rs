//! User service for business logic.

use anyhow::{Context, Result, bail};
use tracing::{info, instrument};

use super::models::User;
use super::repository::UserRepository;
use crate::auth::Role;

/// Service for user management operations.
#[derive(Debug, Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    /// Create a new user service.
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Register a new user with the default role.
    ///
    /// The password is hashed before storage and never kept in plaintext.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            bail!("Username and password are required");
        }

        if !self.repo.is_username_available(username).await? {
            bail!("User already exists");
        }

        let hash = hash_password(password)?;
        let user = self.repo.create(username, &hash, Role::User).await?;
        info!(user_id = %user.id, username = %user.username, "Registered new user");

        Ok(user)
    }

    /// Get a user by ID.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.repo.get(id).await
    }

    /// Get a user by username.
    #[instrument(skip(self))]
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.repo.get_by_username(username).await
    }

    /// List all users.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.repo.list().await
    }

    /// Verify user credentials.
    ///
    /// Returns `None` both for an unknown username and a wrong password so
    /// callers cannot distinguish the two (anti-enumeration).
    #[instrument(skip(self, password))]
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<User>> {
        match self.repo.get_by_username(username).await? {
            Some(user) if verify_password(password, &user.password_hash)? => Ok(Some(user)),
            _ => Ok(None),
        }
    }

    /// Verify a password against a specific user's stored hash.
    pub fn verify_password(&self, user: &User, password: &str) -> Result<bool> {
        verify_password(password, &user.password_hash)
    }

    /// Update a user's password; the new password is hashed here.
    #[instrument(skip(self, new_password))]
    pub async fn update_password(&self, id: &str, new_password: &str) -> Result<User> {
        if new_password.is_empty() {
            bail!("Current password and new password are required");
        }

        let hash = hash_password(new_password)?;
        let user = self.repo.update_password(id, &hash).await?;
        info!(user_id = %id, "User password updated");

        Ok(user)
    }

    /// Update a user's role.
    #[instrument(skip(self))]
    pub async fn update_role(&self, id: &str, role: Role) -> Result<User> {
        let user = self.repo.update_role(id, role).await?;
        info!(user_id = %id, role = %role, "User role updated");

        Ok(user)
    }

    /// Delete a user.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.repo.delete(id).await?;
        info!(user_id = %id, "Deleted user");

        Ok(())
    }
}

/// Hash a password using bcrypt.
fn hash_password(password: &str) -> Result<String> {
    // Use a lower cost factor for development speed
    let cost = if cfg!(debug_assertions) { 4 } else { 10 };
    bcrypt::hash(password, cost).context("hashing password")
}

/// Verify a password against a bcrypt hash.
fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash).context("verifying password")
}
