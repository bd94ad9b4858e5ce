use crate::models::UserUpdate;
use async_graphql::{InputObject, SimpleObject, ID};

#[derive(Debug, Clone, SimpleObject)]
pub struct Rank {
    pub rank: Option<String>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Occupation {
    pub name: Option<String>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Address {
    pub address: Option<String>,
}

/// Login result
#[derive(Debug, Clone, SimpleObject)]
pub struct Auth {
    pub id: ID,
    pub token: String,
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "File")]
pub struct UploadedFile {
    pub filename: String,
    pub mimetype: String,
    pub encoding: String,
}

#[derive(Debug, Clone, InputObject)]
#[graphql(name = "updateUser")]
pub struct UpdateUserInput {
    pub id: ID,
    pub name: Option<String>,
    pub email: Option<String>,
    pub rank: Option<String>,
    pub occupation: Option<String>,
    pub address: Option<String>,
    pub job_history: Option<String>,
    pub message: Option<String>,
}

impl From<UpdateUserInput> for UserUpdate {
    fn from(input: UpdateUserInput) -> Self {
        UserUpdate {
            id: input.id.to_string(),
            name: input.name,
            email: input.email,
            rank: input.rank,
            occupation: input.occupation,
            address: input.address,
            job_history: input.job_history,
            message: input.message,
        }
    }
}

#[derive(Debug, Clone, InputObject)]
#[graphql(name = "updateFavorite")]
pub struct UpdateFavoriteInput {
    pub id: ID,
    pub favorite: Option<String>,
    /// `true` adds the favorite, anything else removes it
    pub flag: Option<bool>,
}
