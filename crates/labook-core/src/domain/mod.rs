//! Domain entities - the core business objects.

mod like_dislike;
mod post;
mod user;

pub use like_dislike::LikeDislikeRecord;
pub use post::{Creator, Post, PostRecord, PostsWithCreators};
pub use user::{Role, User};
