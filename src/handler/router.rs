//! Request dispatch module
//!
//! Entry point for request processing: normalizes and classifies the path, then hands
//! off to the status page or flag branch. Only the path and the identity headers are read.

use hyper::Request;
use std::sync::Arc;

use super::flags;
use super::identity::IdentityContext;
use super::status_page;
use crate::config::{IdentityConfig, StatusPageConfig};
use crate::http::{self, HttpResponse};
use crate::routing::{match_route, normalize_path, Route};
use crate::storage::ObjectStore;

/// Stateless request dispatcher.
///
/// Holds only immutable settings and the injected object store, so one instance can
/// serve any number of concurrent requests.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn ObjectStore>,
    identity: IdentityConfig,
    status_page: StatusPageConfig,
}

impl Dispatcher {
    /// Dispatcher with the default header names and verbatim status page
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::with_options(store, IdentityConfig::default(), StatusPageConfig::default())
    }

    pub fn with_options(
        store: Arc<dyn ObjectStore>,
        identity: IdentityConfig,
        status_page: StatusPageConfig,
    ) -> Self {
        Self {
            store,
            identity,
            status_page,
        }
    }

    /// Header names this dispatcher reads identity from
    pub const fn identity(&self) -> &IdentityConfig {
        &self.identity
    }

    /// Produce the response for `req`. Method and body are ignored.
    pub async fn handle<B: Sync>(&self, req: &Request<B>) -> HttpResponse {
        let path = normalize_path(req.uri().path());
        match match_route(&path) {
            Route::StatusPage => {
                let ctx = IdentityContext::from_headers(req.headers(), &self.identity);
                status_page::serve_status_page(&ctx, self.status_page)
            }
            Route::Flag(segment) => flags::serve_flag(self.store.as_ref(), segment).await,
            Route::NotFound => http::build_404_response(),
        }
    }
}
