//! Post handlers. Each one forwards to `PostBusiness` with the caller's token.
//!
//! Bodies are optional: a missing or unparsable body reaches the service as
//! absent fields, after its token check.

use actix_web::{HttpResponse, web};

use labook_core::business::{
    DeletePostInput, GetPostsInput, InsertPostInput, LikeDislikeInput, UpdatePostInput,
};
use labook_shared::dto::{LikeDislikeRequest, ListPostsQuery, PostContentRequest};

use crate::middleware::auth::BearerToken;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    token: BearerToken,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let posts = state
        .posts
        .get_posts(GetPostsInput {
            q: query.into_inner().q,
            token: token.into_inner(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    token: BearerToken,
    body: Option<web::Json<PostContentRequest>>,
) -> AppResult<HttpResponse> {
    let output = state
        .posts
        .insert_new_post(InsertPostInput {
            content: body.and_then(|body| body.into_inner().content),
            token: token.into_inner(),
        })
        .await?;

    Ok(HttpResponse::Created().json(output))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    token: BearerToken,
    path: web::Path<String>,
    body: Option<web::Json<PostContentRequest>>,
) -> AppResult<HttpResponse> {
    let output = state
        .posts
        .update_post(UpdatePostInput {
            id: path.into_inner(),
            content: body.and_then(|body| body.into_inner().content),
            token: token.into_inner(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(output))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    token: BearerToken,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let output = state
        .posts
        .delete_post(DeletePostInput {
            id: path.into_inner(),
            token: token.into_inner(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(output))
}

/// PUT /api/posts/{id}/like
pub async fn like_dislike(
    state: web::Data<AppState>,
    token: BearerToken,
    path: web::Path<String>,
    body: Option<web::Json<LikeDislikeRequest>>,
) -> AppResult<HttpResponse> {
    let output = state
        .posts
        .like_dislike(LikeDislikeInput {
            id: path.into_inner(),
            like: body.and_then(|body| body.into_inner().like),
            token: token.into_inner(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(output))
}
