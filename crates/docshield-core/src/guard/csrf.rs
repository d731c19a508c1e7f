//! Referer-based CSRF check.
//!
//! Unsafe methods (anything but GET/HEAD/OPTIONS/TRACE) must carry a Referer
//! whose origin `(scheme, host, port)` equals the origin of the URL the
//! request was sent to. Safe methods are never checked.
//!
//! Scheme and host are compared after `url` normalisation (lowercased). The
//! port is the one written in the URL, if any: an omitted port and an explicit
//! default port are different, so `https://a.com:443/` and `https://a.com/`
//! do not share an origin.

use url::Url;

use crate::error::{DocShieldError, Result};

/// Fixed description for every CSRF rejection.
pub const CSRF_FAILURE: &str = "Referer check failed.";

/// Methods exempt from the check.
pub const SAFE_METHODS: [&str; 4] = ["GET", "HEAD", "OPTIONS", "TRACE"];

pub fn is_safe_method(method: &str) -> bool {
    SAFE_METHODS.contains(&method)
}

/// The `(scheme, host, port)` triple of a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: String,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Origin {
    /// Parses an absolute URL. Relative or malformed input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let url = Url::parse(raw).ok()?;
        Some(Self {
            scheme: url.scheme().to_string(),
            host: url.host_str().map(str::to_string),
            port: explicit_port(raw, &url),
        })
    }
}

/// Port as written in the authority. `Url::port` drops a port equal to the
/// scheme default, so an explicit `:443` is recovered from the raw input.
fn explicit_port(raw: &str, url: &Url) -> Option<u16> {
    if let Some(port) = url.port() {
        return Some(port);
    }
    let (_, rest) = raw.trim().split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    let (_, port) = host_port.rsplit_once(':')?;
    port.parse().ok()
}

/// Where a request stands with respect to the CSRF check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CsrfState {
    #[default]
    Pending,
    Checked,
}

impl CsrfState {
    /// Runs the check unless it already passed. `Checked` on success.
    pub fn advance(self, method: &str, referer: Option<&str>, base_url: &str) -> Result<Self> {
        match self {
            CsrfState::Checked => Ok(CsrfState::Checked),
            CsrfState::Pending => {
                check_csrf(method, referer, base_url)?;
                Ok(CsrfState::Checked)
            }
        }
    }
}

/// Standalone check: `Ok(())` or `Forbidden("Referer check failed.")`.
pub fn check_csrf(method: &str, referer: Option<&str>, base_url: &str) -> Result<()> {
    if is_safe_method(method) {
        return Ok(());
    }

    let Some(referer) = referer else {
        tracing::warn!(%method, "csrf: missing referer");
        return Err(violation());
    };

    if different_origin(referer, base_url) {
        tracing::warn!(%method, %referer, %base_url, "csrf: origin mismatch");
        return Err(violation());
    }

    Ok(())
}

/// True unless both URLs parse to the same origin.
pub fn different_origin(referer: &str, target: &str) -> bool {
    match (Origin::parse(referer), Origin::parse(target)) {
        (Some(a), Some(b)) => a != b,
        _ => true,
    }
}

fn violation() -> DocShieldError {
    DocShieldError::Forbidden(CSRF_FAILURE.to_string())
}
