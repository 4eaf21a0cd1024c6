//! In-memory repositories - used when no database is configured.
//!
//! Data is lost on process restart.

mod post;
mod user;

pub use post::InMemoryPostRepository;
pub use user::InMemoryUserRepository;
