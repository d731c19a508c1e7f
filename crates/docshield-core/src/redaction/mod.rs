//! Field redaction.
//!
//! - **`policy`**: what to strip, per capability (`PolicyMap`, `Requirement`)
//! - **`engine`**: how a table is applied to one or many documents (`Redact`)
//! - **`entities`**: the fixed tables for each stored entity type

pub mod engine;
pub mod entities;
pub mod policy;

pub use engine::{apply, redact_many, redact_one, Redact, Target};
pub use entities::{
    clean_analyses, clean_files, clean_modules, clean_repositories, clean_users, Entity,
};
pub use policy::{PolicyEntry, PolicyMap, Requirement, ALWAYS};
