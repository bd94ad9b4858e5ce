pub mod auth_service;
pub mod upload_service;
pub mod user_service;

#[cfg(test)]
pub mod memory_store;

pub use user_service::*;
