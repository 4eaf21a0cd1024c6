//! Account use cases: signup and login, both ending in a fresh token.

use std::sync::Arc;

use super::dto::{AuthOutput, LoginInput, SignupInput};
use crate::domain::User;
use crate::error::PostError;
use crate::ports::{IdGenerator, PasswordService, TokenManager, TokenPayload, UserRepository};

const MIN_NAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 6;

pub struct UserBusiness {
    users: Arc<dyn UserRepository>,
    ids: Arc<dyn IdGenerator>,
    tokens: Arc<dyn TokenManager>,
    passwords: Arc<dyn PasswordService>,
}

impl UserBusiness {
    pub fn new(
        users: Arc<dyn UserRepository>,
        ids: Arc<dyn IdGenerator>,
        tokens: Arc<dyn TokenManager>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            users,
            ids,
            tokens,
            passwords,
        }
    }

    fn issue(&self, user: &User, message: &str) -> Result<AuthOutput, PostError> {
        let token = self.tokens.create_token(&TokenPayload {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role,
        })?;

        Ok(AuthOutput {
            message: message.to_string(),
            token,
            expires_in: self.tokens.expiration_seconds(),
        })
    }

    /// Create a normal account and log it in.
    pub async fn signup(&self, input: SignupInput) -> Result<AuthOutput, PostError> {
        let name = input.name.trim();
        if name.chars().count() < MIN_NAME_LEN {
            return Err(PostError::invalid(format!(
                "name must have at least {MIN_NAME_LEN} characters"
            )));
        }
        if input.email.is_empty() || !input.email.contains('@') {
            return Err(PostError::invalid("invalid email address"));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(PostError::invalid(format!(
                "password must have at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(PostError::invalid("email already registered"));
        }

        let password_hash = self.passwords.hash(&input.password)?;
        let user = User::new(
            self.ids.generate(),
            name.to_string(),
            input.email,
            password_hash,
        );

        self.users.insert(user.clone()).await?;
        tracing::info!(user_id = %user.id, "User signed up");

        self.issue(&user, "signup completed successfully")
    }

    pub async fn login(&self, input: LoginInput) -> Result<AuthOutput, PostError> {
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| PostError::invalid("invalid email or password"))?;

        if !self.passwords.verify(&input.password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(PostError::invalid("invalid email or password"));
        }

        self.issue(&user, "login completed successfully")
    }
}
