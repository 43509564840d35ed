//! In-memory user store.
//!
//! Used when no PostgreSQL instance is configured and by tests.

use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;

use crate::user::{RepositoryError, Result, User, UserRepository};

#[derive(Debug, Default)]
struct Store {
    sequence: i64,
    rows: BTreeMap<i64, User>,
    /// Unique index on `email`.
    emails: HashMap<String, i64>,
}

impl Store {
    fn insert(&mut self, mut user: User) -> Result<User> {
        if self.emails.contains_key(&user.email) {
            return Err(RepositoryError::DuplicateEmail(user.email));
        }

        self.sequence += 1;
        let id = self.sequence;
        user.id = Some(id);

        self.emails.insert(user.email.clone(), id);
        self.rows.insert(id, user.clone());

        Ok(user)
    }

    fn update(&mut self, id: i64, user: User) -> Result<User> {
        let Some(previous) = self.rows.get(&id) else {
            return Err(RepositoryError::NotFound(id));
        };

        if previous.email != user.email {
            if self.emails.contains_key(&user.email) {
                return Err(RepositoryError::DuplicateEmail(user.email));
            }

            self.emails.remove(&previous.email);
            self.emails.insert(user.email.clone(), id);
        }

        self.rows.insert(id, user.clone());

        Ok(user)
    }
}

/// [`UserRepository`] keeping every row in process memory.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    store: RwLock<Store>,
}

impl MemoryUserRepository {
    /// Create an empty [`MemoryUserRepository`].
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserRepository for MemoryUserRepository {
    async fn save(&self, user: User) -> Result<User> {
        let mut store = self.store.write().await;

        match user.id {
            Some(id) => store.update(id, user),
            None => store.insert(user),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.store.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let store = self.store.read().await;

        Ok(store
            .emails
            .get(email)
            .and_then(|id| store.rows.get(id))
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.store.read().await.rows.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.store.read().await.rows.len() as u64)
    }

    async fn delete_by_id(&self, id: i64) -> Result<()> {
        let mut store = self.store.write().await;

        match store.rows.remove(&id) {
            Some(user) => {
                store.emails.remove(&user.email);
            },
            None => tracing::debug!(id, "user already deleted"),
        }

        Ok(())
    }
}
