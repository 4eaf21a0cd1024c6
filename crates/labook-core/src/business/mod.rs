//! Business services - validation, authorization and orchestration of the ports.

mod dto;
mod post;
mod user;

#[cfg(test)]
mod test_support;

pub use dto::{
    AuthOutput, DeletePostInput, GetPostsInput, InsertPostInput, LikeDislikeInput, LoginInput,
    PostOutput, SignupInput, UpdatePostInput,
};
pub use post::PostBusiness;
pub use user::UserBusiness;

use crate::domain::Role;
use crate::error::PostError;
use crate::ports::{TokenManager, TokenPayload};

/// Decode the caller's token or reject the request.
pub(crate) fn authenticate(
    tokens: &dyn TokenManager,
    token: Option<&str>,
) -> Result<TokenPayload, PostError> {
    let token = token.ok_or_else(|| PostError::invalid("token not informed"))?;

    tokens
        .get_payload(token)
        .ok_or_else(|| PostError::invalid("token not valid"))
}

/// Admins may act on anything; everyone else only on what they own.
pub(crate) fn is_admin_or_owner(role: Role, subject_id: &str, owner_id: &str) -> bool {
    role == Role::Admin || subject_id == owner_id
}
