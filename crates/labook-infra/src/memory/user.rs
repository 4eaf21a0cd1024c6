use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use labook_core::domain::{Creator, User};
use labook_core::error::RepoError;
use labook_core::ports::UserRepository;

/// Users keyed by id.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creator snapshots for the given ids, skipping unknown ones.
    pub(crate) async fn creators<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a str>,
    ) -> Vec<Creator> {
        let store = self.store.read().await;
        ids.into_iter()
            .filter_map(|id| store.get(id))
            .map(|user| Creator {
                id: user.id.clone(),
                name: user.name.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: User) -> Result<(), RepoError> {
        let mut store = self.store.write().await;

        if store.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("email already exists".to_string()));
        }
        if store.contains_key(&user.id) {
            return Err(RepoError::Constraint("id already exists".to_string()));
        }

        store.insert(user.id.clone(), user);
        Ok(())
    }
}
