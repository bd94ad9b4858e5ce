pub mod queries;

use crate::models::{SearchResponse, UpdateOutcome};
use crate::utils::AppError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Long-lived handle to the Elasticsearch REST API, scoped to one index alias.
#[derive(Clone)]
pub struct Elasticsearch {
    client: reqwest::Client,
    base_url: String,
    index: String,
}

impl Elasticsearch {
    pub fn new(base_url: &str, index: &str) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            index: index.to_string(),
        })
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// Checks that the cluster answers on its root endpoint.
    pub async fn ping(&self) -> Result<(), AppError> {
        let response = self.client.head(&self.base_url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::Search(format!("Ping failed: {}", response.status())));
        }
        Ok(())
    }

    pub async fn search<T: DeserializeOwned>(&self, body: &Value) -> Result<SearchResponse<T>, AppError> {
        let url = format!("{}/{}/_search", self.base_url, self.index);
        log::debug!("🔎 POST {} {}", url, body);

        let response = self.client.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    /// Runs an update-by-query and waits for the affected shards to refresh.
    pub async fn update_by_query(&self, body: &Value) -> Result<UpdateOutcome, AppError> {
        let url = format!("{}/{}/_update_by_query", self.base_url, self.index);
        log::debug!("✏️  POST {}?refresh=true {}", url, body);

        let response = self
            .client
            .post(&url)
            .query(&[("refresh", "true")])
            .json(body)
            .send()
            .await?;
        let outcome: UpdateOutcome = Self::decode(response).await?;

        if !outcome.failures.is_empty() {
            log::warn!(
                "❌ Update by query reported {} failures: {}",
                outcome.failures.len(),
                Value::Array(outcome.failures)
            );
            return Err(AppError::Search("update was rejected by the datastore".to_string()));
        }
        Ok(outcome)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            log::warn!("❌ Elasticsearch returned {}: {}", status, text);
            return Err(AppError::Search(format!("datastore returned status {}", status.as_u16())));
        }

        response.json::<T>().await.map_err(|e| {
            log::warn!("❌ Failed to decode Elasticsearch response: {}", e);
            AppError::Search("unexpected datastore response".to_string())
        })
    }
}
