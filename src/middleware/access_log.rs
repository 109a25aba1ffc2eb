//! Access-log middleware.
//!
//! Emits one structured event per request once the response is written.
//! Token contents are never logged; only whether the caller presented one.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header;
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::time::Instant;
use tracing::{info, warn};

/// Access log middleware factory.
pub struct AccessLog;

impl<S, B> Transform<S, ServiceRequest> for AccessLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessLogMiddleware { service }))
    }
}

/// Access log middleware service.
pub struct AccessLogMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AccessLogMiddleware<S>
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
        let started = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let remote = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();
        let authed = req.headers().contains_key(header::AUTHORIZATION);

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let status = res.status().as_u16();
            let elapsed_ms = started.elapsed().as_millis() as u64;

            if res.status().is_server_error() {
                warn!(
                    target: "access",
                    %method, %path, %remote, authed, status, elapsed_ms,
                    "request failed"
                );
            } else if res.status().is_client_error() {
                warn!(
                    target: "access",
                    %method, %path, %remote, authed, status, elapsed_ms,
                    "request rejected"
                );
            } else {
                info!(
                    target: "access",
                    %method, %path, %remote, authed, status, elapsed_ms,
                    "request served"
                );
            }

            Ok(res)
        })
    }
}
