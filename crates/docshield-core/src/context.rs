//! Request-scoped inputs for guards and handlers.

use std::fmt;
use std::sync::Arc;

use crate::actor::{Actor, Anonymous};
use crate::guard::csrf::CsrfState;

/// Shared handle to the acting user of one request.
pub type ActorRef = Arc<dyn Actor + Send + Sync>;

/// What guards need to know about a request. Built fresh per request.
#[derive(Clone)]
pub struct RequestContext {
    method: String,
    referer: Option<String>,
    base_url: String,
    actor: ActorRef,
    csrf: CsrfState,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, base_url: impl Into<String>, actor: ActorRef) -> Self {
        Self {
            method: method.into(),
            referer: None,
            base_url: base_url.into(),
            actor,
            csrf: CsrfState::Pending,
        }
    }

    /// Context for an unauthenticated caller.
    pub fn anonymous(method: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::new(method, base_url, Arc::new(Anonymous))
    }

    #[must_use]
    pub fn with_referer(mut self, referer: Option<String>) -> Self {
        self.referer = referer;
        self
    }

    #[must_use]
    pub fn with_csrf_state(mut self, state: CsrfState) -> Self {
        self.csrf = state;
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn referer(&self) -> Option<&str> {
        self.referer.as_deref()
    }

    /// Root URL the request targeted, e.g. `https://docs.example.com/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn actor(&self) -> &(dyn Actor + Send + Sync) {
        self.actor.as_ref()
    }

    pub fn actor_ref(&self) -> ActorRef {
        Arc::clone(&self.actor)
    }

    pub fn csrf_state(&self) -> CsrfState {
        self.csrf
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("method", &self.method)
            .field("referer", &self.referer)
            .field("base_url", &self.base_url)
            .field("csrf", &self.csrf)
            .finish_non_exhaustive()
    }
}
