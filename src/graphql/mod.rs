//! GraphQL schema for the users collection.
//!
//! Every resolver maps to exactly one `UserStore` call; failures surface as a
//! GraphQL error carrying only the message.

pub mod mutation;
pub mod query;
pub mod types;

use crate::config::AuthSettings;
use crate::services::auth_service::Claims;
use crate::services::SharedUserStore;
use crate::utils::AppError;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, Schema};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};
use std::path::PathBuf;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type UsersSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Directory uploads are written to (also served as static files)
#[derive(Debug, Clone)]
pub struct UploadDir(pub PathBuf);

pub fn build_schema(store: SharedUserStore, auth: AuthSettings, upload_dir: PathBuf) -> UsersSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .data(auth)
        .data(UploadDir(upload_dir))
        .finish()
}

/// Logs a resolver failure and turns it into a message-only GraphQL error.
pub(crate) fn report(e: AppError) -> async_graphql::Error {
    log::error!("❌ {}", e);
    e.into()
}

pub async fn graphql_handler(
    schema: web::Data<UsersSchema>,
    http_req: HttpRequest,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    let claims = http_req.extensions().get::<Claims>().cloned();
    if let Some(claims) = claims {
        request = request.data(claims);
    }
    schema.execute(request).await.into()
}

pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}
