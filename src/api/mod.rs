pub mod health;

use crate::graphql;
use crate::utils::AppError;
use actix_files::Files;
use actix_web::{guard, web, HttpRequest};
use std::path::Path;

const BODY_LIMIT: usize = 1024 * 1024;

/// Mounts every route. Order matters: the static file service catches `/*`.
pub fn configure(cfg: &mut web::ServiceConfig, public_dir: &Path) {
    cfg.app_data(web::JsonConfig::default().limit(BODY_LIMIT))
        .app_data(web::FormConfig::default().limit(BODY_LIMIT))
        .service(
            web::resource("/graphql")
                .route(web::post().to(graphql::graphql_handler))
                .route(
                    web::get()
                        .guard(guard::fn_guard(|ctx| ctx.head().uri.query().is_some()))
                        .to(graphql::graphql_handler),
                )
                .route(web::get().to(graphql::graphiql)),
        )
        .route("/health", web::get().to(health::health_check))
        .service(Files::new("/", public_dir))
        .default_service(web::to(not_found));
}

async fn not_found(req: HttpRequest) -> Result<&'static str, AppError> {
    Err(AppError::NotFound(req.path().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthSettings;
    use crate::database::Elasticsearch;
    use crate::middleware::{json_errors, BearerAuth};
    use crate::models::User;
    use crate::services::memory_store::MemoryUserStore;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn auth() -> AuthSettings {
        AuthSettings {
            secret_key: "test-secret".to_string(),
            token_ttl_secs: 60,
            required: false,
        }
    }

    fn schema(public_dir: &Path) -> graphql::UsersSchema {
        let store = Arc::new(MemoryUserStore::with_users(vec![User {
            id: "1".to_string(),
            name: Some("Ada".to_string()),
            ..Default::default()
        }]));
        graphql::build_schema(store, auth(), public_dir.to_path_buf())
    }

    macro_rules! app {
        ($public:expr, $es_url:expr) => {{
            let public = $public.to_path_buf();
            let es = Elasticsearch::new($es_url, "users").unwrap();
            test::init_service(
                App::new()
                    .app_data(web::Data::new(schema(&public)))
                    .app_data(web::Data::new(es))
                    .wrap(json_errors())
                    .wrap(BearerAuth::new(auth()))
                    .configure(|cfg| configure(cfg, &public)),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_graphql_post() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path(), "http://127.0.0.1:9");

        let req = test::TestRequest::post()
            .uri("/graphql")
            .set_json(json!({ "query": "{ users { id name } }" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["users"], json!([{ "id": "1", "name": "Ada" }]));
    }

    #[actix_web::test]
    async fn test_graphql_get_with_query_string() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path(), "http://127.0.0.1:9");

        let req = test::TestRequest::get()
            .uri("/graphql?query=%7Busers%7Bid%7D%7D")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["users"][0]["id"], "1");
    }

    #[actix_web::test]
    async fn test_graphiql_page() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path(), "http://127.0.0.1:9");

        let req = test::TestRequest::get().uri("/graphql").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_static_file_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("avatar.txt"), "pixels").unwrap();
        let app = app!(dir.path(), "http://127.0.0.1:9");

        let req = test::TestRequest::get().uri("/avatar.txt").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "pixels");
    }

    #[actix_web::test]
    async fn test_missing_path_is_json_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path(), "http://127.0.0.1:9");

        let req = test::TestRequest::get().uri("/nope.png").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_health_reports_datastore() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path(), &server.uri());

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["datastore"], "up");
    }

    #[actix_web::test]
    async fn test_health_degraded_when_datastore_down() {
        let dir = tempfile::tempdir().unwrap();
        let app = app!(dir.path(), "http://127.0.0.1:9");

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["datastore"], "down");
    }
}
