//! In-process `UserStore` used by resolver and auth tests.

use super::user_service::{AggregateField, UserStore};
use crate::models::{UpdateOutcome, User, UserUpdate};
use crate::utils::AppError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn with_users(users: Vec<User>) -> Self {
        Self { users: Mutex::new(users) }
    }

    pub fn get(&self, id: &str) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    fn apply<F>(&self, id: &str, mut f: F) -> UpdateOutcome
    where
        F: FnMut(&mut User) -> bool,
    {
        let mut outcome = UpdateOutcome::default();
        for user in self.users.lock().unwrap().iter_mut().filter(|u| u.id == id) {
            outcome.total += 1;
            if f(user) {
                outcome.updated += 1;
            } else {
                outcome.noops += 1;
            }
        }
        outcome
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn fetch_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.get(id))
    }

    async fn fetch_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn aggregate_field(&self, field: AggregateField) -> Result<Vec<String>, AppError> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for user in self.users.lock().unwrap().iter() {
            let value = match field {
                AggregateField::Occupation => &user.occupation,
                AggregateField::Rank => &user.rank,
                AggregateField::Address => &user.address,
            };
            if let Some(value) = value {
                *counts.entry(value.clone()).or_default() += 1;
            }
        }

        // Same ordering as a terms aggregation: count desc, then key asc
        let mut buckets: Vec<(String, u64)> = counts.into_iter().collect();
        buckets.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(buckets.into_iter().map(|(key, _)| key).collect())
    }

    async fn update_fields(&self, update: &UserUpdate) -> Result<UpdateOutcome, AppError> {
        Ok(self.apply(&update.id, |user| {
            user.name = update.name.clone();
            user.email = update.email.clone();
            user.rank = update.rank.clone();
            user.occupation = update.occupation.clone();
            user.address = update.address.clone();
            user.job_history = update.job_history.clone();
            user.message = update.message.clone();
            true
        }))
    }

    async fn append_favorite(&self, id: &str, favorite: Option<&str>) -> Result<UpdateOutcome, AppError> {
        Ok(self.apply(id, |user| {
            user.favorite
                .get_or_insert_with(Vec::new)
                .push(favorite.map(str::to_string));
            true
        }))
    }

    async fn remove_favorite(&self, id: &str, favorite: Option<&str>) -> Result<UpdateOutcome, AppError> {
        Ok(self.apply(id, |user| {
            let list = match user.favorite.as_mut() {
                Some(list) => list,
                None => return false,
            };
            match list.iter().position(|f| f.as_deref() == favorite) {
                Some(i) => {
                    list.remove(i);
                    true
                }
                None => false,
            }
        }))
    }
}
