//! Comment enrichment: swap analyst references for redacted user documents.
//!
//! Each qualifying comment costs one lookup. Callers that need bulk loading
//! should batch inside their [`UserLookup`] impl; the per-comment contract
//! stays the same.

use serde_json::Value;

use crate::actor::Actor;
use crate::document::Document;
use crate::redaction::clean_users;

/// Field holding the comment list.
pub const COMMENTS_FIELD: &str = "comments";
/// Field inside a comment referencing its author.
pub const ANALYST_FIELD: &str = "analyst";

/// Resolves a user identifier to its stored document.
pub trait UserLookup {
    fn find_user(&self, id: &Value) -> Option<Document>;
}

impl<F> UserLookup for F
where
    F: Fn(&Value) -> Option<Document>,
{
    fn find_user(&self, id: &Value) -> Option<Document> {
        self(id)
    }
}

/// Replaces every resolvable `comments[*].analyst` reference in `obj` with the
/// user document, redacted by the user policy for `actor`.
///
/// A missing or non-array `comments` field, comments without an analyst and
/// references the lookup cannot resolve are left as they are.
pub fn enrich_comments<A, L>(mut obj: Document, actor: &A, lookup: &L) -> Document
where
    A: Actor + ?Sized,
    L: UserLookup + ?Sized,
{
    let Some(Value::Array(comments)) = obj.get_mut(COMMENTS_FIELD) else {
        return obj;
    };

    for comment in comments.iter_mut() {
        let Value::Object(fields) = comment else {
            continue;
        };
        let Some(reference) = fields.get(ANALYST_FIELD) else {
            continue;
        };
        match lookup.find_user(reference) {
            Some(user) => {
                let user = clean_users(user, actor);
                fields.insert(ANALYST_FIELD.to_string(), user.into_value());
            }
            None => {
                tracing::debug!(analyst = %reference, "comment analyst not found; left as-is");
            }
        }
    }

    obj
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Anonymous, UserActor};
    use serde_json::json;
    use std::cell::Cell;

    fn alice() -> Document {
        Document::new()
            .with("_id", "u1")
            .with("name", "Alice")
            .with("pwd_hash", "hash")
            .with("auth_token", "tok")
            .with("api_key", "key")
            .with("groups", json!(["cert"]))
    }

    fn lookup(id: &Value) -> Option<Document> {
        (id == &json!("u1")).then(alice)
    }

    fn obj(comments: Value) -> Document {
        Document::new().with("_id", "f1").with("comments", comments)
    }

    #[test]
    fn analyst_replaced_with_redacted_user() {
        let out = enrich_comments(obj(json!([{"analyst": "u1", "comment": "hi"}])), &Anonymous, &lookup);
        let analyst = &out.get("comments").unwrap()[0]["analyst"];
        assert_eq!(analyst, &json!({"_id": "u1", "name": "Alice"}));
        assert_eq!(out.get("comments").unwrap()[0]["comment"], json!("hi"));
    }

    #[test]
    fn manage_users_actor_sees_account_fields() {
        let admin = UserActor::new(Document::new().with("permissions", json!(["manage_users"])));
        let out = enrich_comments(obj(json!([{"analyst": "u1"}])), &admin, &lookup);
        let analyst = &out.get("comments").unwrap()[0]["analyst"];
        assert_eq!(analyst["api_key"], json!("key"));
        assert!(analyst.get("pwd_hash").is_none());
    }

    #[test]
    fn unresolved_and_missing_analysts_untouched() {
        let input = obj(json!([{"analyst": "ghost"}, {"comment": "anon"}, "not-an-object"]));
        let out = enrich_comments(input.clone(), &Anonymous, &lookup);
        assert_eq!(out, input);
    }

    #[test]
    fn no_comments_field_is_noop() {
        let input = Document::new().with("_id", "f1");
        assert_eq!(enrich_comments(input.clone(), &Anonymous, &lookup), input);

        let odd = Document::new().with("comments", "oops");
        assert_eq!(enrich_comments(odd.clone(), &Anonymous, &lookup), odd);
    }

    #[test]
    fn one_lookup_per_qualifying_comment() {
        let calls = Cell::new(0);
        let counting = |id: &Value| {
            calls.set(calls.get() + 1);
            lookup(id)
        };
        let input = obj(json!([{"analyst": "u1"}, {"comment": "x"}, {"analyst": "u1"}]));
        enrich_comments(input, &Anonymous, &counting);
        assert_eq!(calls.get(), 2);
    }
}
