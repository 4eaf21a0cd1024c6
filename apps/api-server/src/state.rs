//! Application state - shared across all handlers.

use std::sync::Arc;

use labook_core::ports::{IdGenerator, PasswordService, PostRepository, TokenManager, UserRepository};
use labook_core::{PostBusiness, UserBusiness};
use labook_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository, JwtConfig,
    JwtTokenManager, UuidIdGenerator,
};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use labook_infra::{PostgresPostRepository, PostgresUserRepository, database};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostBusiness>,
    pub users: Arc<UserBusiness>,
}

type Repositories = (Arc<dyn PostRepository>, Arc<dyn UserRepository>);

fn in_memory_repositories() -> Repositories {
    let users = Arc::new(InMemoryUserRepository::new());
    let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new(users.clone()));
    let users: Arc<dyn UserRepository> = users;
    (posts, users)
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let repositories: Repositories = match &config.database {
            Some(db_config) => match database::connect(db_config).await {
                Ok(conn) => {
                    let posts: Arc<dyn PostRepository> =
                        Arc::new(PostgresPostRepository::new(conn.clone()));
                    let users: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(conn));
                    (posts, users)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    in_memory_repositories()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                in_memory_repositories()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repositories: Repositories = {
            if config.database.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory repositories");
            in_memory_repositories()
        };

        let state = Self::assemble(repositories, config.jwt.clone());
        tracing::info!("Application state initialized");
        state
    }

    /// State backed by in-memory repositories only.
    #[cfg(test)]
    pub fn in_memory(jwt: JwtConfig) -> Self {
        Self::assemble(in_memory_repositories(), jwt)
    }

    fn assemble((post_repo, user_repo): Repositories, jwt: JwtConfig) -> Self {
        let ids: Arc<dyn IdGenerator> = Arc::new(UuidIdGenerator);
        let tokens: Arc<dyn TokenManager> = Arc::new(JwtTokenManager::new(jwt));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        let posts = PostBusiness::new(post_repo, user_repo.clone(), ids.clone(), tokens.clone());
        let users = UserBusiness::new(user_repo, ids, tokens, passwords);

        Self {
            posts: Arc::new(posts),
            users: Arc::new(users),
        }
    }
}
