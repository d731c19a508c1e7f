//! Ordered interceptors run before a handler.
//!
//! A chain runs its stages in insertion order and stops at the first error;
//! the handler only runs when every stage passed. [`protected`] is the full
//! order for a capability-gated handler: CSRF first, then the capability
//! check, so a forged request is rejected the same way whatever the victim's
//! capabilities are. The gateway builds its per-handler chains from it.

use std::sync::Arc;

use crate::context::RequestContext;
use crate::error::{DocShieldError, Result};

use super::csrf::CsrfState;

/// One pre-handler check.
pub trait Interceptor: Send + Sync {
    fn name(&self) -> &'static str;
    fn check(&self, ctx: &RequestContext) -> Result<()>;
}

/// Rejects unsafe-method requests with a foreign or missing Referer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsrfCheck;

impl Interceptor for CsrfCheck {
    fn name(&self) -> &'static str {
        "csrf"
    }

    fn check(&self, ctx: &RequestContext) -> Result<()> {
        ctx.csrf_state()
            .advance(ctx.method(), ctx.referer(), ctx.base_url())
            .map(|_: CsrfState| ())
    }
}

/// Rejects actors lacking a capability.
#[derive(Debug, Clone)]
pub struct RequireCapability {
    capability: String,
}

impl RequireCapability {
    pub fn new(capability: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
        }
    }

    pub fn capability(&self) -> &str {
        &self.capability
    }
}

impl Interceptor for RequireCapability {
    fn name(&self) -> &'static str {
        "capability"
    }

    fn check(&self, ctx: &RequestContext) -> Result<()> {
        if ctx.actor().has_capability(&self.capability) {
            return Ok(());
        }
        tracing::warn!(capability = %self.capability, method = ctx.method(), "capability missing");
        Err(DocShieldError::Forbidden(format!(
            "missing capability: {}",
            self.capability
        )))
    }
}

/// Ordered list of interceptors.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    stages: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage; it runs after every stage already present.
    #[must_use]
    pub fn then(mut self, stage: impl Interceptor + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Runs every stage in order; first failure wins.
    pub fn check(&self, ctx: &RequestContext) -> Result<()> {
        for stage in &self.stages {
            stage.check(ctx)?;
        }
        Ok(())
    }

    /// Checks, then invokes `handler` once. The handler never runs on rejection.
    pub fn run<T, H>(&self, ctx: &RequestContext, handler: H) -> Result<T>
    where
        H: FnOnce(&RequestContext) -> Result<T>,
    {
        self.check(ctx)?;
        handler(ctx)
    }

    /// Turns the chain and a handler into one guarded handler.
    pub fn wrap<T, H>(self, handler: H) -> impl Fn(&RequestContext) -> Result<T>
    where
        H: Fn(&RequestContext) -> Result<T>,
    {
        move |ctx: &RequestContext| self.run(ctx, &handler)
    }
}

/// CSRF check followed by a capability check.
pub fn protected(capability: impl Into<String>) -> InterceptorChain {
    InterceptorChain::new()
        .then(CsrfCheck)
        .then(RequireCapability::new(capability))
}

/// Guards `handler` with a capability check.
pub fn gate<T, H>(capability: impl Into<String>, handler: H) -> impl Fn(&RequestContext) -> Result<T>
where
    H: Fn(&RequestContext) -> Result<T>,
{
    InterceptorChain::new()
        .then(RequireCapability::new(capability))
        .wrap(handler)
}

/// Guards `handler` with the CSRF check.
pub fn csrf_guard<T, H>(handler: H) -> impl Fn(&RequestContext) -> Result<T>
where
    H: Fn(&RequestContext) -> Result<T>,
{
    InterceptorChain::new().then(CsrfCheck).wrap(handler)
}
