// src/security/api_key.rs
//
// Shared-secret gate for the parse endpoint. Clients present the key in the
// X-API-Key header; everything except the banner, health and monitoring
// routes is protected.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    Error, HttpResponse,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use tracing::warn;

const API_KEY_HEADER: &str = "X-API-Key";
const EXEMPT_PREFIXES: [&str; 2] = ["/health", "/monitoring"];

/// Routes that skip the key check. CORS preflights pass through as well;
/// the browser never attaches custom headers to them.
fn is_exempt(method: &Method, path: &str) -> bool {
    *method == Method::OPTIONS
        || path == "/"
        || EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p))
}

pub struct ApiKeyGuard {
    key: String,
}

impl ApiKeyGuard {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyGuardMiddleware {
            service: Rc::new(service),
            key: self.key.clone(),
        }))
    }
}

pub struct ApiKeyGuardMiddleware<S> {
    service: Rc<S>,
    key: String,
}

impl<S, B> Service<ServiceRequest> for ApiKeyGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !is_exempt(req.method(), req.path()) {
            let presented = req
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|v| v.to_str().ok());
            if presented != Some(self.key.as_str()) {
                // Never log the presented value.
                warn!(path = %req.path(), "request rejected: invalid API key");
                return Box::pin(async move {
                    let resp = HttpResponse::Forbidden()
                        .json(serde_json::json!({"error": "Invalid API key"}));
                    Ok(req.into_response(resp.map_into_right_body()))
                });
            }
        }

        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
