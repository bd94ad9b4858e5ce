use super::report;
use super::types::{Auth, UpdateFavoriteInput, UpdateUserInput, UploadedFile};
use super::UploadDir;
use crate::config::AuthSettings;
use crate::models::UserUpdate;
use crate::services::auth_service::{self, Claims};
use crate::services::{upload_service, SharedUserStore};
use crate::utils::AppError;
use async_graphql::{Context, Object, Result, Upload, ID};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<Auth> {
        let store = ctx.data::<SharedUserStore>()?;
        let settings = ctx.data::<AuthSettings>()?;

        log::info!("🔐 login - email: {}", email);
        match auth_service::login(store.as_ref(), settings, &email, &password).await {
            Ok(result) => {
                log::info!("✅ Login successful: {}", email);
                Ok(Auth {
                    id: ID(result.id),
                    token: result.token,
                })
            }
            Err(e) => {
                log::warn!("❌ Login failed: {} - {}", email, e);
                Err(e.into())
            }
        }
    }

    async fn put_user(&self, ctx: &Context<'_>, input: UpdateUserInput) -> Result<bool> {
        require_token(ctx)?;
        let store = ctx.data::<SharedUserStore>()?;

        let update = UserUpdate::from(input);
        store.update_fields(&update).await.map_err(report)?;
        Ok(true)
    }

    async fn put_favorite(&self, ctx: &Context<'_>, input: UpdateFavoriteInput) -> Result<bool> {
        require_token(ctx)?;
        let store = ctx.data::<SharedUserStore>()?;

        let favorite = input.favorite.as_deref();
        if input.flag.unwrap_or(false) {
            store.append_favorite(&input.id, favorite).await.map_err(report)?;
        } else {
            store.remove_favorite(&input.id, favorite).await.map_err(report)?;
        }
        Ok(true)
    }

    /// Stores the file under the public directory. `id` is not linked to the file.
    async fn single_upload(&self, ctx: &Context<'_>, file: Upload, id: ID) -> Result<UploadedFile> {
        require_token(ctx)?;
        let dir = ctx.data::<UploadDir>()?;

        let value = file
            .value(ctx)
            .map_err(|e| report(AppError::Upload(e.to_string())))?;
        let filename = value.filename.clone();
        let mimetype = value
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());

        log::info!("📤 singleUpload - file: {}, id: {}", filename, id.as_str());
        upload_service::save_upload(&dir.0, &filename, value.into_read())
            .await
            .map_err(report)?;

        Ok(UploadedFile {
            filename,
            mimetype,
            encoding: "7bit".to_string(),
        })
    }
}

/// Rejects the call when tokens are enforced and the request carried none.
fn require_token(ctx: &Context<'_>) -> Result<()> {
    let settings = ctx.data::<AuthSettings>()?;
    if settings.required && ctx.data_opt::<Claims>().is_none() {
        return Err(AppError::Unauthorized("Missing or invalid bearer token".to_string()).into());
    }
    Ok(())
}
