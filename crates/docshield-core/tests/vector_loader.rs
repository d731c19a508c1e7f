//! JSON test vector loader shared by redaction/CSRF tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Reads `tests/vectors/{name}` into any vector shape.
pub fn load<T: DeserializeOwned>(name: &str) -> T {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap_or_else(|e| panic!("bad vector file {name}: {e}"))
}

/// One redaction case: apply `entity`'s policy as an actor holding `capabilities`.
#[derive(Debug, Deserialize)]
pub struct RedactionVector {
    pub description: String,
    pub entity: String,
    #[serde(default)]
    pub capabilities: Vec<String>,
    pub input: Value,
    pub expect: Value,
}

/// One CSRF case.
#[derive(Debug, Deserialize)]
pub struct CsrfVector {
    pub description: String,
    pub method: String,
    #[serde(default)]
    pub referer: Option<String>,
    pub base_url: String,
    #[serde(default)]
    pub expect_error: Option<ExpectError>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectError {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
}
