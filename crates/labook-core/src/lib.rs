//! # Labook Core
//!
//! The domain layer of Labook, a small social network.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod business;
pub mod domain;
pub mod error;
pub mod ports;

pub use business::{PostBusiness, UserBusiness};
pub use error::PostError;
