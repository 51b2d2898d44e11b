use std::sync::Arc;

use crate::config::Platform;
use crate::metrics::VisitCounter;
use crate::store::ChirpStore;

/// Shared handles injected into every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ChirpStore>,
    pub hits: Arc<VisitCounter>,
    pub platform: Platform,
}

impl AppState {
    pub fn new(store: Arc<dyn ChirpStore>, platform: Platform) -> Self {
        Self {
            store,
            hits: Arc::new(VisitCounter::new()),
            platform,
        }
    }
}
