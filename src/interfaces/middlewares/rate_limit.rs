use std::{
    rc::Rc,
    task::{Context, Poll},
};

use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};

use crate::{
    constants::MSG_GLOBAL_RATE_LIMITED, limiter::rate_limiter::SlidingWindowStore,
    utils::get_client_ip::get_client_ip,
};

/// Coarse per-address gate applied before any route runs. The contact
/// endpoint nests its own tighter gate behind this one.
#[derive(Clone)]
pub struct GlobalRateLimit {
    store: SlidingWindowStore,
    trust_proxy_headers: bool,
}

impl GlobalRateLimit {
    pub fn new(store: SlidingWindowStore, trust_proxy_headers: bool) -> Self {
        GlobalRateLimit {
            store,
            trust_proxy_headers,
        }
    }
}

impl<S> Transform<S, ServiceRequest> for GlobalRateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = GlobalRateLimitService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(GlobalRateLimitService {
            service: Rc::new(service),
            store: self.store.clone(),
            trust_proxy_headers: self.trust_proxy_headers,
        })
    }
}

pub struct GlobalRateLimitService<S> {
    service: Rc<S>,
    store: SlidingWindowStore,
    trust_proxy_headers: bool,
}

impl<S> Service<ServiceRequest> for GlobalRateLimitService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let store = self.store.clone();
        let trust_proxy_headers = self.trust_proxy_headers;

        Box::pin(async move {
            let client_ip = get_client_ip(req.request(), trust_proxy_headers);

            if !store.is_allowed(&client_ip) {
                tracing::warn!(%client_ip, "global rate limit exceeded");
                let response = HttpResponse::TooManyRequests()
                    .json(serde_json::json!({"error": MSG_GLOBAL_RATE_LIMITED}));
                return Ok(req.into_response(response));
            }

            service.call(req).await
        })
    }
}
