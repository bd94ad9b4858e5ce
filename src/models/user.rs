use async_graphql::{ComplexObject, SimpleObject, ID};
use serde::{Deserialize, Deserializer, Serialize};

/// A document stored under the `users` alias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
#[graphql(complex)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    #[graphql(skip)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[graphql(skip)]
    pub password: Option<String>,  // bcrypt hash, never exposed
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sub_image: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub job_history: Option<String>,
    #[serde(default)]
    pub favorite: Option<Vec<Option<String>>>,  // may hold nulls appended by putFavorite
    #[serde(default, deserialize_with = "optional_string_or_number")]
    pub timestamp: Option<String>,
}

#[ComplexObject]
impl User {
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }
}

/// Fields overwritten by `putUser`. Missing values are written as null.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip)]
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub rank: Option<String>,
    pub occupation: Option<String>,
    pub address: Option<String>,
    pub job_history: Option<String>,
    pub message: Option<String>,
}

/// Stored ids and timestamps show up both as strings and as numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
