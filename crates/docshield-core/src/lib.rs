//! docshield core: document redaction and request guards.
//!
//! This crate holds the transport-agnostic primitives: schemaless documents,
//! capability-bearing actors, policy-driven field redaction, comment
//! enrichment, and the CSRF/capability guards. It carries no HTTP or runtime
//! dependencies so the gateway and other embedders can share it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Redaction is total; guard failures surface as `DocShieldError::Forbidden`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod actor;
pub mod capabilities;
pub mod context;
pub mod document;
pub mod enrich;
pub mod error;
pub mod guard;
pub mod redaction;

pub use actor::{Actor, Anonymous, UserActor};
pub use context::{ActorRef, RequestContext};
pub use document::Document;
pub use enrich::{enrich_comments, UserLookup};
/// Shared result type.
pub use error::{DocShieldError, Result};
pub use guard::{check_csrf, csrf_guard, gate};
pub use redaction::{
    clean_analyses, clean_files, clean_modules, clean_repositories, clean_users, PolicyMap,
    Redact, Target,
};
