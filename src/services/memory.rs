use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Internship, User};
use crate::services::store::{RecordStore, StoreError};

/// In-process record store
///
/// Used for local development (`database.backend = "memory"`) and tests.
/// Internships keep their insertion order.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    internships: RwLock<Vec<Internship>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn insert_user(&self, user: User) -> Result<Uuid, StoreError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(StoreError::Conflict(format!("Email already registered: {}", user.email)));
        }

        let id = user.id;
        users.insert(id, user);
        Ok(id)
    }

    async fn get_user(&self, id: Uuid) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("User {} not found", id)))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("User with email {} not found", email)))
    }

    async fn update_user(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::Conflict(format!("Email already registered: {}", user.email)));
        }

        match users.get_mut(&user.id) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = User { created_at, ..user };
                Ok(())
            }
            None => Err(StoreError::NotFound(format!("User {} not found", user.id))),
        }
    }

    async fn insert_internship(&self, internship: Internship) -> Result<Uuid, StoreError> {
        let id = internship.id;
        self.internships.write().await.push(internship);
        Ok(id)
    }

    async fn insert_internships(&self, internships: Vec<Internship>) -> Result<usize, StoreError> {
        let count = internships.len();
        self.internships.write().await.extend(internships);
        Ok(count)
    }

    async fn get_internship(&self, id: Uuid) -> Result<Internship, StoreError> {
        self.internships
            .read()
            .await
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Internship {} not found", id)))
    }

    async fn list_internships(&self) -> Result<Vec<Internship>, StoreError> {
        Ok(self.internships.read().await.clone())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
