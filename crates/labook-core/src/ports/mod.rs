//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod id;
mod repository;

pub use auth::{AuthError, PasswordService, TokenManager, TokenPayload};
pub use id::IdGenerator;
pub use repository::{PostRepository, UserRepository};
