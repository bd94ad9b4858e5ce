use crate::database::Elasticsearch;
use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    pub datastore: String,
}

pub async fn health_check(es: web::Data<Elasticsearch>) -> impl Responder {
    let datastore_up = match es.ping().await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("⚠️  Health check: datastore unreachable: {}", e);
            false
        }
    };

    let body = HealthResponse {
        status: if datastore_up { "healthy" } else { "degraded" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        datastore: if datastore_up { "up" } else { "down" }.to_string(),
    };

    HttpResponse::Ok().json(body)
}
