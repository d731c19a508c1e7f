//! CSRF origin check vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use docshield_core::check_csrf;

mod vector_loader;
use vector_loader::CsrfVector;

#[test]
fn csrf_vectors() {
    let vectors: Vec<CsrfVector> = vector_loader::load("csrf.json");
    assert!(!vectors.is_empty());

    for v in vectors {
        let res = check_csrf(&v.method, v.referer.as_deref(), &v.base_url);

        match v.expect_error {
            Some(ex) => {
                let e = res.expect_err("expected error");
                assert_eq!(e.client_code().as_str(), ex.code, "vector={}", v.description);
                assert_eq!(e.status_code(), 403, "vector={}", v.description);
                if let Some(msg) = ex.message {
                    assert_eq!(e.to_string(), msg, "vector={}", v.description);
                }
            }
            None => assert!(res.is_ok(), "vector={} got {res:?}", v.description),
        }
    }
}
