//! User management module.
//!
//! The credential store: user records with hashed passwords and roles,
//! plus the service-level operations the API and CLI are built on.

mod models;
mod repository;
mod service;

pub use models::{User, UserInfo};
pub use repository::UserRepository;
pub use service::UserService;
