use crate::database::{queries, Elasticsearch};
use crate::models::{UpdateOutcome, User, UserUpdate};
use crate::utils::AppError;
use async_trait::async_trait;
use std::sync::Arc;

/// Fields that can be aggregated into distinct-value lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateField {
    Occupation,
    Rank,
    Address,
}

impl AggregateField {
    pub fn field(&self) -> &'static str {
        match self {
            AggregateField::Occupation => "occupation",
            AggregateField::Rank => "rank",
            AggregateField::Address => "address",
        }
    }

    pub fn aggregation_name(&self) -> &'static str {
        match self {
            AggregateField::Occupation => "occupations",
            AggregateField::Rank => "ranks",
            AggregateField::Address => "addresses",
        }
    }
}

/// Data access for user records. Each call issues exactly one datastore request.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<User>, AppError>;

    async fn fetch_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn fetch_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Distinct values of `field`, most frequent first
    async fn aggregate_field(&self, field: AggregateField) -> Result<Vec<String>, AppError>;

    /// Overwrites name, email, rank, occupation, address, jobHistory and message
    async fn update_fields(&self, update: &UserUpdate) -> Result<UpdateOutcome, AppError>;

    async fn append_favorite(&self, id: &str, favorite: Option<&str>) -> Result<UpdateOutcome, AppError>;

    /// Removes the first occurrence; a missing value leaves the record untouched
    async fn remove_favorite(&self, id: &str, favorite: Option<&str>) -> Result<UpdateOutcome, AppError>;
}

pub type SharedUserStore = Arc<dyn UserStore>;

pub struct UserService {
    es: Arc<Elasticsearch>,
    search_size: usize,
}

impl UserService {
    pub fn new(es: Arc<Elasticsearch>, search_size: usize) -> Self {
        Self { es, search_size }
    }

    async fn first_match(&self, field: &str, value: &str) -> Result<Option<User>, AppError> {
        let response = self.es.search::<User>(&queries::term(field, value)).await?;
        Ok(response.into_sources().into_iter().next())
    }

    fn log_outcome(&self, action: &str, id: &str, outcome: &UpdateOutcome) {
        if outcome.total == 0 {
            log::warn!("⚠️  {} matched no document for id {}", action, id);
        } else {
            log::info!(
                "✅ {} id {}: updated={} noops={}",
                action, id, outcome.updated, outcome.noops
            );
        }
    }
}

#[async_trait]
impl UserStore for UserService {
    async fn fetch_all(&self) -> Result<Vec<User>, AppError> {
        log::info!("📋 Fetching all users from {}", self.es.index());
        let response = self.es.search::<User>(&queries::match_all(self.search_size)).await?;
        Ok(response.into_sources())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        log::info!("👤 Fetching user by id: {}", id);
        self.first_match("id", id).await
    }

    async fn fetch_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        log::info!("📧 Fetching user by email: {}", email);
        self.first_match("email", email).await
    }

    async fn aggregate_field(&self, field: AggregateField) -> Result<Vec<String>, AppError> {
        log::info!("📊 Aggregating distinct {} values", field.field());

        let name = field.aggregation_name();
        let body = queries::terms_aggregation(name, field.field());
        let mut response = self.es.search::<serde_json::Value>(&body).await?;

        let aggregation = response
            .aggregations
            .remove(name)
            .ok_or_else(|| AppError::Search(format!("Aggregation '{}' missing from response", name)))?;

        for bucket in &aggregation.buckets {
            log::debug!("   {} = {} ({} docs)", name, bucket.key_string(), bucket.doc_count);
        }
        Ok(aggregation.buckets.iter().map(|b| b.key_string()).collect())
    }

    async fn update_fields(&self, update: &UserUpdate) -> Result<UpdateOutcome, AppError> {
        let outcome = self.es.update_by_query(&queries::update_fields(update)).await?;
        self.log_outcome("Update user", &update.id, &outcome);
        Ok(outcome)
    }

    async fn append_favorite(&self, id: &str, favorite: Option<&str>) -> Result<UpdateOutcome, AppError> {
        let outcome = self
            .es
            .update_by_query(&queries::append_favorite(id, favorite))
            .await?;
        self.log_outcome("Add favorite", id, &outcome);
        Ok(outcome)
    }

    async fn remove_favorite(&self, id: &str, favorite: Option<&str>) -> Result<UpdateOutcome, AppError> {
        let outcome = self
            .es
            .update_by_query(&queries::remove_favorite(id, favorite))
            .await?;
        self.log_outcome("Remove favorite", id, &outcome);
        Ok(outcome)
    }
}
