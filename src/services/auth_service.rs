use crate::config::AuthSettings;
use crate::services::user_service::UserStore;
use crate::utils::AppError;
use bcrypt::verify;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub email: String,
    pub id: String,
    pub iat: usize,            // issued at
    pub exp: usize,            // expiration
}

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub id: String,
    pub token: String,
}

// Generate JWT token
pub fn generate_jwt(id: &str, email: &str, settings: &AuthSettings) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        email: email.to_string(),
        id: id.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::seconds(settings.token_ttl_secs)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.secret_key.as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

// Verify JWT token
pub fn verify_token(token: &str, settings: &AuthSettings) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.secret_key.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}

// User login
pub async fn login(
    store: &dyn UserStore,
    settings: &AuthSettings,
    email: &str,
    password: &str,
) -> Result<LoginResult, AppError> {
    let user = store
        .fetch_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".to_string()))?;

    let stored_password = user
        .password
        .as_deref()
        .ok_or_else(|| AppError::Unauthorized("Password is incorrect".to_string()))?;

    let valid = verify(password, stored_password)
        .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))?;

    if !valid {
        return Err(AppError::Unauthorized("Password is incorrect".to_string()));
    }

    let token = generate_jwt(&user.id, email, settings)?;

    Ok(LoginResult { id: user.id, token })
}
