use crate::config::AuthSettings;
use crate::services::auth_service;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

/// Decodes `Authorization: Bearer <token>` and attaches the claims to the request.
/// Requests without a valid token pass through untouched; enforcement happens in
/// the resolvers.
pub struct BearerAuth {
    settings: Rc<AuthSettings>,
}

impl BearerAuth {
    pub fn new(settings: AuthSettings) -> Self {
        Self { settings: Rc::new(settings) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthService {
            service,
            settings: self.settings.clone(),
        }))
    }
}

pub struct BearerAuthService<S> {
    service: S,
    settings: Rc<AuthSettings>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string());

        if let Some(token) = token {
            match auth_service::verify_token(&token, &self.settings) {
                Ok(claims) => {
                    log::debug!("🔑 Bearer token valid for user: {}", claims.id);
                    req.extensions_mut().insert(claims);
                }
                Err(e) => log::debug!("🔑 Ignoring bearer token: {}", e),
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res)
        })
    }
}
