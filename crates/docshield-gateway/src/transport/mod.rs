//! Transport-level guards applied before routing reaches handlers.
//!
//! Exposes the router-wide CSRF layer; handlers then see requests in the
//! `Checked` state and do not repeat the origin comparison.

pub mod csrf;
