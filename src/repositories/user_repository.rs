//! In-memory user store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::user::{Role, User};

#[derive(Clone, Default)]
pub struct UserRepository {
    inner: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl UserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) -> User {
        let mut users = self.inner.write().await;
        users.insert(user.id, user.clone());
        user
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.inner.read().await.get(&id).cloned()
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.inner
            .read()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub async fn update(&self, user: User) -> Option<User> {
        let mut users = self.inner.write().await;
        users.contains_key(&user.id).then(|| {
            users.insert(user.id, user.clone());
            user
        })
    }

    pub async fn count_by_role(&self, role: Role) -> usize {
        self.inner
            .read()
            .await
            .values()
            .filter(|u| u.role == role)
            .count()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}
