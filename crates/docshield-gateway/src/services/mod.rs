//! HTTP handlers for stored documents.
//!
//! Every handler follows the same shape: run the guard chain, fetch from the
//! store, pass the result through the entity's redaction table, and only then
//! return it.

pub mod analyses;
pub mod catalog;
pub mod files;
pub mod users;
