//! Static-asset visit counting.
//!
//! [`VisitCounter`] is shared between the admin handlers and the
//! [`CountVisits`] middleware that wraps the `/app` scope.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use futures::future::{ready, Ready};

/// Process-wide count of requests served from the static file tree.
#[derive(Debug, Default)]
pub struct VisitCounter {
    hits: AtomicU64,
}

impl VisitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }

    pub fn read(&self) -> u64 {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.hits.store(0, Ordering::SeqCst);
    }
}

/// Middleware bumping a [`VisitCounter`] once per request it sees.
#[derive(Clone)]
pub struct CountVisits {
    hits: Arc<VisitCounter>,
}

impl CountVisits {
    pub fn new(hits: Arc<VisitCounter>) -> Self {
        Self { hits }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CountVisits
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = CountVisitsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CountVisitsMiddleware {
            service,
            hits: Arc::clone(&self.hits),
        }))
    }
}

/// Service wrapper produced by [`CountVisits`].
pub struct CountVisitsMiddleware<S> {
    service: S,
    hits: Arc<VisitCounter>,
}

impl<S, B> Service<ServiceRequest> for CountVisitsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        self.hits.increment();
        self.service.call(req)
    }
}
