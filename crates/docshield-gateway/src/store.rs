//! In-memory document store.
//!
//! Stands in for the real storage layer: collections of schemaless documents,
//! queried by exact field match. Seeded once at startup from a JSON file of
//! the form `{"users": [...], "files": [...], ...}`.

use std::fs;

use dashmap::DashMap;
use serde_json::Value;

use docshield_core::document::{Document, ID_FIELD};
use docshield_core::enrich::UserLookup;
use docshield_core::error::{DocShieldError, Result};
use docshield_core::redaction::Entity;

/// Narrow storage interface consumed by handlers.
pub trait DocumentStore: Send + Sync {
    fn find_one(&self, collection: &str, query: &Document) -> Option<Document>;
    fn find(&self, collection: &str, query: &Document) -> Vec<Document>;
    /// Applies `update` to the first match. False when nothing matched.
    fn update_one(
        &self,
        collection: &str,
        query: &Document,
        update: &mut dyn FnMut(&mut Document),
    ) -> bool;
}

/// Collections held in a `DashMap`, one vector of documents per collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, collection: &str, doc: Document) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(doc);
    }

    /// Builds a store from a `{collection: [documents]}` JSON object.
    pub fn from_seed(seed: Value) -> Result<Self> {
        let Value::Object(collections) = seed else {
            return Err(DocShieldError::BadRequest(
                "seed must be an object of collections".into(),
            ));
        };

        let store = Self::new();
        for (name, docs) in collections {
            let Value::Array(docs) = docs else {
                return Err(DocShieldError::BadRequest(format!(
                    "seed collection {name} must be an array"
                )));
            };
            for d in docs {
                store.insert(&name, Document::try_from(d)?);
            }
        }
        Ok(store)
    }

    pub fn load_seed_file(path: &str) -> Result<Self> {
        let s = fs::read_to_string(path)
            .map_err(|e| DocShieldError::Internal(format!("read seed failed: {e}")))?;
        let seed: Value = serde_json::from_str(&s)
            .map_err(|e| DocShieldError::BadRequest(format!("invalid seed json: {e}")))?;
        let store = Self::from_seed(seed)?;
        tracing::info!(path, collections = store.collections.len(), "store seeded");
        Ok(store)
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, |c| c.len())
    }
}

impl DocumentStore for MemoryStore {
    fn find_one(&self, collection: &str, query: &Document) -> Option<Document> {
        self.collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.matches(query)).cloned())
    }

    fn find(&self, collection: &str, query: &Document) -> Vec<Document> {
        self.collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| d.matches(query)).cloned().collect())
            .unwrap_or_default()
    }

    fn update_one(
        &self,
        collection: &str,
        query: &Document,
        update: &mut dyn FnMut(&mut Document),
    ) -> bool {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return false;
        };
        if let Some(doc) = docs.iter_mut().find(|d| d.matches(query)) {
            update(doc);
            return true;
        }
        false
    }
}

/// Query matching a document by identifier.
pub fn by_id(id: impl Into<Value>) -> Document {
    Document::new().with(ID_FIELD, id)
}

/// Fetches `collection/id` or fails with `NotFound`.
pub fn get_or_404(store: &dyn DocumentStore, collection: &str, id: &str) -> Result<Document> {
    store
        .find_one(collection, &by_id(id))
        .ok_or_else(|| DocShieldError::NotFound(format!("{collection}/{id}")))
}

/// Resolves comment analysts against the `users` collection.
pub struct StoreUserLookup<'a>(pub &'a dyn DocumentStore);

impl UserLookup for StoreUserLookup<'_> {
    fn find_user(&self, id: &Value) -> Option<Document> {
        tracing::debug!(analyst = %id, "resolving comment analyst");
        self.0
            .find_one(Entity::User.collection(), &by_id(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seeded() -> MemoryStore {
        MemoryStore::from_seed(json!({
            "users": [
                {"_id": "u1", "name": "Alice", "api_key": "k1"},
                {"_id": "u2", "name": "Bob", "api_key": "k2"}
            ],
            "files": [{"_id": "f1", "comments": []}]
        }))
        .unwrap()
    }

    #[test]
    fn seed_and_query() {
        let s = seeded();
        assert_eq!(s.count("users"), 2);
        let bob = s.find_one("users", &Document::new().with("api_key", "k2")).unwrap();
        assert_eq!(bob.get("name"), Some(&json!("Bob")));
        assert_eq!(s.find("users", &Document::new()).len(), 2);
        assert!(s.find("nope", &Document::new()).is_empty());
    }

    #[test]
    fn bad_seed_rejected() {
        assert!(MemoryStore::from_seed(json!([1])).is_err());
        assert!(MemoryStore::from_seed(json!({"users": {"_id": "u1"}})).is_err());
        assert!(MemoryStore::from_seed(json!({"users": [3]})).is_err());
    }

    #[test]
    fn get_or_404_reports_missing() {
        let s = seeded();
        assert!(get_or_404(&s, "files", "f1").is_ok());
        let err = get_or_404(&s, "files", "zz").unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn update_one_mutates_first_match() {
        let s = seeded();
        let hit = s.update_one("files", &by_id("f1"), &mut |d: &mut Document| {
            d.insert("seen", json!(true));
        });
        assert!(hit);
        assert_eq!(get_or_404(&s, "files", "f1").unwrap().get("seen"), Some(&json!(true)));
        assert!(!s.update_one("files", &by_id("zz"), &mut |_: &mut Document| {}));
    }

    #[test]
    fn user_lookup_uses_users_collection() {
        let s = seeded();
        let lookup = StoreUserLookup(&s);
        assert!(lookup.find_user(&json!("u1")).is_some());
        assert!(lookup.find_user(&json!("f1")).is_none());
    }
}
