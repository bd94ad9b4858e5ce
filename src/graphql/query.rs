use super::report;
use super::types::{Address, Occupation, Rank, UploadedFile};
use crate::models::User;
use crate::services::{AggregateField, SharedUserStore};
use crate::utils::AppError;
use async_graphql::{Context, Object, Result, ID};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<User> {
        let store = ctx.data::<SharedUserStore>()?;
        store
            .fetch_by_id(&id)
            .await
            .map_err(report)?
            .ok_or_else(|| report(AppError::NotFound(format!("User {} does not exist", id.as_str()))))
    }

    /// The filter arguments are accepted but not applied: every user is returned.
    async fn users(
        &self,
        ctx: &Context<'_>,
        occupation: Option<Vec<Option<String>>>,
        rank: Option<Vec<Option<String>>>,
        address: Option<Vec<Option<String>>>,
    ) -> Result<Vec<User>> {
        if occupation.is_some() || rank.is_some() || address.is_some() {
            log::debug!(
                "users filters ignored: occupation={:?} rank={:?} address={:?}",
                occupation, rank, address
            );
        }
        let store = ctx.data::<SharedUserStore>()?;
        Ok(store.fetch_all().await.map_err(report)?)
    }

    async fn ranks(&self, ctx: &Context<'_>) -> Result<Vec<Rank>> {
        let values = aggregate(ctx, AggregateField::Rank).await?;
        Ok(values.into_iter().map(|rank| Rank { rank: Some(rank) }).collect())
    }

    async fn occupations(&self, ctx: &Context<'_>) -> Result<Vec<Occupation>> {
        let values = aggregate(ctx, AggregateField::Occupation).await?;
        Ok(values.into_iter().map(|name| Occupation { name: Some(name) }).collect())
    }

    async fn addresses(&self, ctx: &Context<'_>) -> Result<Vec<Address>> {
        let values = aggregate(ctx, AggregateField::Address).await?;
        Ok(values.into_iter().map(|address| Address { address: Some(address) }).collect())
    }

    /// Upload listing is not backed by any storage.
    async fn uploads(&self) -> Option<Vec<UploadedFile>> {
        None
    }
}

async fn aggregate(ctx: &Context<'_>, field: AggregateField) -> Result<Vec<String>> {
    let store = ctx.data::<SharedUserStore>()?;
    Ok(store.aggregate_field(field).await.map_err(report)?)
}
