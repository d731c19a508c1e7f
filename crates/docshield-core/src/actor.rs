//! The acting user of a request.
//!
//! The engine only ever asks an [`Actor`] one question: does it hold a given
//! capability. Actors are passed explicitly to every redaction and gate call.

use serde_json::Value;

use crate::document::Document;

/// Capability holding a user's permission list matches every capability.
pub const WILDCARD_CAPABILITY: &str = "*";

/// Anything that can answer capability queries.
pub trait Actor {
    fn has_capability(&self, name: &str) -> bool;
}

impl<A: Actor + ?Sized> Actor for &A {
    fn has_capability(&self, name: &str) -> bool {
        (**self).has_capability(name)
    }
}

impl<A: Actor + ?Sized> Actor for std::sync::Arc<A> {
    fn has_capability(&self, name: &str) -> bool {
        (**self).has_capability(name)
    }
}

/// Actor with no capabilities at all (unauthenticated callers).
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl Actor for Anonymous {
    fn has_capability(&self, _name: &str) -> bool {
        false
    }
}

/// Actor backed by a stored user document.
///
/// Capabilities come from the `permissions` array; `"*"` grants all of them.
#[derive(Debug, Clone)]
pub struct UserActor {
    user: Document,
}

impl UserActor {
    pub fn new(user: Document) -> Self {
        Self { user }
    }

    pub fn document(&self) -> &Document {
        &self.user
    }

    pub fn id(&self) -> Option<&Value> {
        self.user.id()
    }

    pub fn enabled(&self) -> bool {
        is_enabled(&self.user)
    }

    pub fn permissions(&self) -> Vec<&str> {
        string_list(&self.user, "permissions")
    }
}

impl Actor for UserActor {
    fn has_capability(&self, name: &str) -> bool {
        self.permissions()
            .into_iter()
            .any(|p| p == name || p == WILDCARD_CAPABILITY)
    }
}

/// True when the user has at least one group and one default sharing target.
pub fn has_groups_and_sharing(user: &Document) -> bool {
    !string_list(user, "groups").is_empty() && !string_list(user, "default_sharing").is_empty()
}

/// Returns the user only when its `enabled` flag is set.
pub fn if_enabled(user: Option<Document>) -> Option<Document> {
    user.filter(is_enabled)
}

fn is_enabled(user: &Document) -> bool {
    user.get("enabled").and_then(Value::as_bool).unwrap_or(false)
}

fn string_list<'a>(doc: &'a Document, field: &str) -> Vec<&'a str> {
    match doc.get(field) {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(perms: Value) -> Document {
        Document::new()
            .with("_id", "u1")
            .with("enabled", true)
            .with("permissions", perms)
    }

    #[test]
    fn capabilities_come_from_permissions() {
        let a = UserActor::new(user(json!(["see_logs"])));
        assert!(a.has_capability("see_logs"));
        assert!(!a.has_capability("manage_users"));
    }

    #[test]
    fn wildcard_grants_everything() {
        let a = UserActor::new(user(json!(["*"])));
        assert!(a.has_capability("manage_users"));
        assert!(a.has_capability("anything"));
    }

    #[test]
    fn missing_permissions_means_nothing() {
        let a = UserActor::new(Document::new().with("_id", "u2"));
        assert!(!a.has_capability("see_logs"));
        assert!(!a.enabled());
        assert!(!Anonymous.has_capability("see_logs"));
    }

    #[test]
    fn groups_and_sharing_both_required() {
        let both = Document::new()
            .with("groups", json!(["cert"]))
            .with("default_sharing", json!(["cert"]));
        let no_sharing = Document::new()
            .with("groups", json!(["cert"]))
            .with("default_sharing", json!([]));
        assert!(has_groups_and_sharing(&both));
        assert!(!has_groups_and_sharing(&no_sharing));
        assert!(!has_groups_and_sharing(&Document::new()));
    }

    #[test]
    fn if_enabled_filters_disabled_users() {
        assert!(if_enabled(Some(user(json!([])))).is_some());
        assert!(if_enabled(Some(Document::new().with("enabled", false))).is_none());
        assert!(if_enabled(None).is_none());
    }
}
