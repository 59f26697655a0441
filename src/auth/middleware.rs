use std::sync::Arc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    http::Method,
    Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::TokenCodec;
use crate::error::AppError;

/// Bearer-token middleware guarding every route except the public ones
/// (health check, login, registration). On success the decoded claims are
/// inserted into request extensions for the [`crate::auth::extractors`] layer;
/// on failure the request is answered directly with a 401 response.
pub struct AuthMiddleware {
    codec: Arc<dyn TokenCodec>,
}

impl AuthMiddleware {
    pub fn new(codec: Arc<dyn TokenCodec>) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            codec: self.codec.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    codec: Arc<dyn TokenCodec>,
}

fn is_public(req: &ServiceRequest) -> bool {
    let path = req.path();
    path == "/health"
        || path.starts_with("/api/auth/login")
        // Registration is the one unauthenticated /api/users operation.
        || (path == "/api/users" && req.method() == Method::POST)
}

impl<S> AuthMiddlewareService<S> {
    fn authenticate(&self, req: &ServiceRequest) -> Result<(), AppError> {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Missing token".into()))?;

        let claims = self.codec.decode(token)?;
        req.extensions_mut().insert(claims);
        Ok(())
    }
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !is_public(&req) {
            if let Err(app_err) = self.authenticate(&req) {
                let (request, _payload) = req.into_parts();
                let response = app_err.error_response().map_into_right_body();
                return Box::pin(async move { Ok(ServiceResponse::new(request, response)) });
            }
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}
