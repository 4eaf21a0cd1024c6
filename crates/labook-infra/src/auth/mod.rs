//! Authentication implementations.

mod jwt;
mod password;

pub use jwt::{JwtConfig, JwtTokenManager};
pub use password::Argon2PasswordService;
