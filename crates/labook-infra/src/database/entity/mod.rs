//! SeaORM entities.

pub mod like_dislike;
pub mod post;
pub mod user;
