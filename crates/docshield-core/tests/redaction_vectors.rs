//! Entity policy vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use docshield_core::redaction::{Entity, Target};
use docshield_core::{Actor, Document, Redact};

mod vector_loader;
use vector_loader::RedactionVector;

struct Holds(Vec<String>);

impl Actor for Holds {
    fn has_capability(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }
}

fn entity(name: &str) -> Entity {
    Entity::ALL
        .into_iter()
        .find(|e| e.as_str() == name)
        .unwrap_or_else(|| panic!("unknown entity in vector: {name}"))
}

fn target(v: serde_json::Value) -> Target {
    match v {
        serde_json::Value::Array(items) => Target::Many(
            items
                .into_iter()
                .map(|i| Document::try_from(i).unwrap())
                .collect(),
        ),
        other => Target::Single(Document::try_from(other).unwrap()),
    }
}

#[test]
fn redaction_vectors() {
    let vectors: Vec<RedactionVector> = vector_loader::load("redaction.json");
    assert!(!vectors.is_empty());

    for v in vectors {
        let actor = Holds(v.capabilities.clone());
        let policy = entity(&v.entity).policy();

        let out = target(v.input.clone()).redact(policy, &actor);
        let got = serde_json::to_value(&out).unwrap();
        assert_eq!(got, v.expect, "vector={}", v.description);

        // second pass changes nothing
        let again = serde_json::to_value(out.redact(policy, &actor)).unwrap();
        assert_eq!(again, v.expect, "idempotence vector={}", v.description);
    }
}
