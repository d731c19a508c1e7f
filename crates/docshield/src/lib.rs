//! Top-level facade crate for docshield.
//!
//! Re-exports the redaction/guard primitives and the gateway library so users can depend on a single crate.

pub mod core {
    pub use docshield_core::*;
}

pub mod gateway {
    pub use docshield_gateway::*;
}
