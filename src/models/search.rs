use serde::Deserialize;
use std::collections::HashMap;

/// Subset of the `_search` response body we read.
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    pub hits: Hits<T>,
    #[serde(default)]
    pub aggregations: HashMap<String, TermsAggregation>,
}

#[derive(Debug, Deserialize)]
pub struct Hits<T> {
    pub hits: Vec<Hit<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Hit<T> {
    #[serde(rename = "_source")]
    pub source: T,
}

#[derive(Debug, Deserialize)]
pub struct TermsAggregation {
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Deserialize)]
pub struct Bucket {
    pub key: serde_json::Value,
    pub doc_count: u64,
}

impl Bucket {
    pub fn key_string(&self) -> String {
        match &self.key {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl<T> SearchResponse<T> {
    pub fn into_sources(self) -> Vec<T> {
        self.hits.hits.into_iter().map(|hit| hit.source).collect()
    }
}

/// Counters returned by `_update_by_query`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateOutcome {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub noops: u64,
    #[serde(default)]
    pub failures: Vec<serde_json::Value>,
}
