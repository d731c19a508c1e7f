//! Shared application state for the docshield gateway.
//!
//! Holds the validated config and the document store. Startup errors are
//! returned as `Result` instead of panicking.

use std::sync::Arc;

use docshield_core::actor::{if_enabled, UserActor};
use docshield_core::document::Document;
use docshield_core::error::{DocShieldError, Result};
use docshield_core::guard::{protected, CsrfCheck, InterceptorChain, RequireCapability};
use docshield_core::redaction::Entity;

use crate::config::GatewayConfig;
use crate::store::{DocumentStore, MemoryStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Build application state, seeding the in-memory store when configured.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let store = match &cfg.store.seed_file {
            Some(path) => MemoryStore::load_seed_file(path)?,
            None => {
                tracing::warn!("no store.seed_file configured; starting with an empty store");
                MemoryStore::new()
            }
        };
        Ok(Self::with_store(cfg, Arc::new(store)))
    }

    pub fn with_store(cfg: GatewayConfig, store: Arc<dyn DocumentStore>) -> Self {
        if !cfg.csrf.enabled {
            tracing::warn!("csrf protection disabled by config");
        }
        Self {
            inner: Arc::new(AppStateInner { cfg, store }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    pub fn comments_enabled(&self) -> bool {
        self.inner.cfg.features.comments
    }

    pub fn csrf_enabled(&self) -> bool {
        self.inner.cfg.csrf.enabled
    }

    /// Enabled user owning `api_key`, or `AuthFailed`.
    pub fn resolve_api_key(&self, api_key: &str) -> Result<UserActor> {
        let query = Document::new().with("api_key", api_key);
        let user = self.store().find_one(Entity::User.collection(), &query);
        if_enabled(user)
            .map(UserActor::new)
            .ok_or(DocShieldError::AuthFailed)
    }

    /// Root URL a request targeted: `public_base_url`, else `http://{host}/`.
    pub fn base_url(&self, host: Option<&str>) -> String {
        match (&self.inner.cfg.gateway.public_base_url, host) {
            (Some(base), _) => base.clone(),
            (None, Some(host)) => format!("http://{host}/"),
            (None, None) => "http://localhost/".to_string(),
        }
    }

    /// Guards for a handler: CSRF (when enabled) first, then `capability`.
    pub fn guards(&self, capability: Option<&str>) -> InterceptorChain {
        match (self.csrf_enabled(), capability) {
            (true, Some(cap)) => protected(cap),
            (true, None) => InterceptorChain::new().then(CsrfCheck),
            (false, Some(cap)) => InterceptorChain::new().then(RequireCapability::new(cap)),
            (false, None) => InterceptorChain::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use docshield_core::Actor;
    use serde_json::json;

    fn state(yaml: &str) -> AppState {
        let cfg = config::load_from_str(yaml).unwrap();
        let store = MemoryStore::from_seed(json!({
            "users": [
                {"_id": "u1", "api_key": "k1", "enabled": true, "permissions": ["see_logs"]},
                {"_id": "u2", "api_key": "k2", "enabled": false, "permissions": ["*"]}
            ]
        }))
        .unwrap();
        AppState::with_store(cfg, Arc::new(store))
    }

    #[test]
    fn api_key_resolves_enabled_users_only() {
        let s = state("version: 1\n");
        let alice = s.resolve_api_key("k1").unwrap();
        assert!(alice.has_capability("see_logs"));
        assert!(matches!(s.resolve_api_key("k2"), Err(DocShieldError::AuthFailed)));
        assert!(s.resolve_api_key("nope").is_err());
    }

    #[test]
    fn base_url_prefers_config() {
        let s = state("version: 1\n");
        assert_eq!(s.base_url(Some("h:8080")), "http://h:8080/");
        assert_eq!(s.base_url(None), "http://localhost/");

        let s = state("version: 1\ngateway:\n  public_base_url: \"https://docs.example.com/\"\n");
        assert_eq!(s.base_url(Some("h:8080")), "https://docs.example.com/");
    }

    #[test]
    fn guards_follow_config() {
        let s = state("version: 1\n");
        assert_eq!(s.guards(Some("x")).stage_names(), vec!["csrf", "capability"]);
        assert_eq!(s.guards(None).stage_names(), vec!["csrf"]);

        let s = state("version: 1\ncsrf:\n  enabled: false\n");
        assert_eq!(s.guards(Some("x")).stage_names(), vec!["capability"]);
        assert!(s.guards(None).stage_names().is_empty());
    }
}
