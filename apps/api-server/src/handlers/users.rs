//! Account handlers.

use actix_web::{HttpResponse, web};

use labook_core::business::{LoginInput, SignupInput};
use labook_shared::dto::{LoginRequest, SignupRequest};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/users/signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let output = state
        .users
        .signup(SignupInput {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Created().json(output))
}

/// POST /api/users/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let output = state
        .users
        .login(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Ok().json(output))
}
