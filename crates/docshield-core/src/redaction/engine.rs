//! Applies a [`PolicyMap`] to documents.
//!
//! Two ways in:
//! - borrowing: [`redact_one`] / [`redact_many`] leave the input untouched and
//!   return redacted copies (safe when documents are shared, e.g. cached).
//! - owning: the [`Redact`] trait strips fields from values the caller owns.
//!
//! Removal of an absent field is a no-op. Nothing here can fail.

use serde::Serialize;

use crate::actor::Actor;
use crate::document::Document;

use super::policy::PolicyMap;

/// One document or a sequence of documents, redacted as a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Target {
    Single(Document),
    Many(Vec<Document>),
}

impl Target {
    pub fn len(&self) -> usize {
        match self {
            Target::Single(_) => 1,
            Target::Many(docs) => docs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_single(self) -> Option<Document> {
        match self {
            Target::Single(d) => Some(d),
            Target::Many(_) => None,
        }
    }
}

impl From<Document> for Target {
    fn from(d: Document) -> Self {
        Target::Single(d)
    }
}

impl From<Vec<Document>> for Target {
    fn from(docs: Vec<Document>) -> Self {
        Target::Many(docs)
    }
}

/// Values a policy can be applied to. The container shape is preserved.
pub trait Redact: Sized {
    fn redact<A: Actor + ?Sized>(self, policy: &PolicyMap, actor: &A) -> Self;
}

impl Redact for Document {
    fn redact<A: Actor + ?Sized>(mut self, policy: &PolicyMap, actor: &A) -> Self {
        strip(&mut self, &policy.fields_to_remove(actor));
        self
    }
}

impl Redact for Vec<Document> {
    fn redact<A: Actor + ?Sized>(mut self, policy: &PolicyMap, actor: &A) -> Self {
        let fields = policy.fields_to_remove(actor);
        for doc in &mut self {
            strip(doc, &fields);
        }
        self
    }
}

impl Redact for Option<Document> {
    fn redact<A: Actor + ?Sized>(self, policy: &PolicyMap, actor: &A) -> Self {
        self.map(|d| d.redact(policy, actor))
    }
}

impl Redact for Target {
    fn redact<A: Actor + ?Sized>(self, policy: &PolicyMap, actor: &A) -> Self {
        match self {
            Target::Single(d) => Target::Single(d.redact(policy, actor)),
            Target::Many(docs) => Target::Many(docs.redact(policy, actor)),
        }
    }
}

/// Applies `policy` to an owned target.
pub fn apply<T: Redact, A: Actor + ?Sized>(target: T, policy: &PolicyMap, actor: &A) -> T {
    target.redact(policy, actor)
}

/// Redacted copy of a single document.
pub fn redact_one<A: Actor + ?Sized>(doc: &Document, policy: &PolicyMap, actor: &A) -> Document {
    doc.clone().redact(policy, actor)
}

/// Redacted copies of a sequence; same length and order as the input.
pub fn redact_many<A: Actor + ?Sized>(
    docs: &[Document],
    policy: &PolicyMap,
    actor: &A,
) -> Vec<Document> {
    docs.to_vec().redact(policy, actor)
}

fn strip(doc: &mut Document, fields: &[&str]) {
    let mut removed = 0usize;
    for f in fields {
        if doc.remove(f).is_some() {
            removed += 1;
        }
    }
    if removed > 0 {
        tracing::trace!(removed, "redacted document fields");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Anonymous;
    use serde_json::json;

    struct Holds(&'static [&'static str]);

    impl Actor for Holds {
        fn has_capability(&self, name: &str) -> bool {
            self.0.contains(&name)
        }
    }

    fn doc() -> Document {
        Document::new()
            .with("_id", "d1")
            .with("name", "sample")
            .with("secret", "s3cr3t")
            .with("logs", json!(["line"]))
    }

    #[test]
    fn absent_field_is_noop() {
        let policy = PolicyMap::new().always(["nope"]);
        let out = redact_one(&doc(), &policy, &Anonymous);
        assert_eq!(out, doc());
    }

    #[test]
    fn always_entry_ignores_capabilities() {
        let policy = PolicyMap::new().always(["secret"]);
        let everything = Holds(&["secret", "*"]);
        assert!(!redact_one(&doc(), &policy, &everything).contains("secret"));
        assert!(!redact_one(&doc(), &policy, &Anonymous).contains("secret"));
    }

    #[test]
    fn capability_entry_keeps_field_iff_held() {
        let policy = PolicyMap::new().unless("see_logs", ["logs"]);
        assert!(redact_one(&doc(), &policy, &Holds(&["see_logs"])).contains("logs"));
        assert!(!redact_one(&doc(), &policy, &Holds(&["other"])).contains("logs"));
    }

    #[test]
    fn borrowing_api_leaves_input_untouched() {
        let original = doc();
        let policy = PolicyMap::new().always(["secret", "logs"]);
        let out = redact_one(&original, &policy, &Anonymous);
        assert!(original.contains("secret"));
        assert_eq!(out.keys().cloned().collect::<Vec<_>>(), vec!["_id", "name"]);
    }

    #[test]
    fn many_preserves_length_and_order() {
        let docs = vec![
            doc().with("_id", "a"),
            Document::new().with("_id", "b"),
            doc().with("_id", "c"),
        ];
        let policy = PolicyMap::new().always(["secret"]);
        let out = redact_many(&docs, &policy, &Anonymous);
        assert_eq!(out.len(), 3);
        let ids: Vec<_> = out.iter().map(|d| d.id().cloned()).collect();
        assert_eq!(ids, vec![Some(json!("a")), Some(json!("b")), Some(json!("c"))]);
        assert!(out.iter().all(|d| !d.contains("secret")));
        assert!(out[0].contains("name"));
    }

    #[test]
    fn redaction_is_idempotent() {
        let policy = PolicyMap::new().always(["secret"]).unless("see_logs", ["logs"]);
        let once = redact_one(&doc(), &policy, &Anonymous);
        let twice = redact_one(&once, &policy, &Anonymous);
        assert_eq!(once, twice);
    }

    #[test]
    fn target_keeps_shape() {
        let policy = PolicyMap::new().always(["secret"]);
        let single = apply(Target::from(doc()), &policy, &Anonymous);
        assert!(matches!(single, Target::Single(_)));

        let many = apply(Target::from(vec![doc(), doc()]), &policy, &Anonymous);
        assert_eq!(many.len(), 2);
        assert!(many.into_single().is_none());
    }

    #[test]
    fn option_none_stays_none() {
        let policy = PolicyMap::new().always(["secret"]);
        assert_eq!(apply(None::<Document>, &policy, &Anonymous), None);
    }
}
