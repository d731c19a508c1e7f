//! Pre-handler guards (CSRF origin check, capability gate).
//!
//! Guards run synchronously before a handler and short-circuit on failure.
//! Both rejections surface as `DocShieldError::Forbidden` (HTTP 403).

pub mod chain;
pub mod csrf;

pub use chain::{csrf_guard, gate, protected, CsrfCheck, Interceptor, InterceptorChain, RequireCapability};
pub use csrf::{check_csrf, different_origin, is_safe_method, CsrfState, Origin, CSRF_FAILURE, SAFE_METHODS};
