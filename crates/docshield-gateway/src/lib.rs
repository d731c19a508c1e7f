//! docshield gateway library entry.
//!
//! This crate wires config, the in-memory store, caller resolution, the CSRF
//! layer and the redacting document handlers into an axum service. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod error;
pub mod ops;
pub mod router;
pub mod services;
pub mod store;
pub mod transport;
