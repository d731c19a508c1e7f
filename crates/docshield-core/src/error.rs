//! Shared error type across docshield crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request or config.
    BadRequest,
    /// Credentials missing or not recognised.
    AuthFailed,
    /// Capability missing or CSRF check failed.
    Forbidden,
    /// Requested document does not exist.
    NotFound,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::AuthFailed => "AUTH_FAILED",
            ClientCode::Forbidden => "FORBIDDEN",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status the code surfaces as.
    pub fn status_code(self) -> u16 {
        match self {
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => 400,
            ClientCode::AuthFailed => 401,
            ClientCode::Forbidden => 403,
            ClientCode::NotFound => 404,
            ClientCode::Internal => 500,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DocShieldError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum DocShieldError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("auth failed")]
    AuthFailed,
    /// Carries the exact description surfaced to the client.
    #[error("{0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl DocShieldError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            DocShieldError::BadRequest(_) => ClientCode::BadRequest,
            DocShieldError::AuthFailed => ClientCode::AuthFailed,
            DocShieldError::Forbidden(_) => ClientCode::Forbidden,
            DocShieldError::NotFound(_) => ClientCode::NotFound,
            DocShieldError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            DocShieldError::Internal(_) => ClientCode::Internal,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.client_code().status_code()
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, DocShieldError::Forbidden(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_displays_bare_description() {
        let e = DocShieldError::Forbidden("Referer check failed.".into());
        assert_eq!(e.to_string(), "Referer check failed.");
        assert_eq!(e.status_code(), 403);
        assert_eq!(e.client_code().as_str(), "FORBIDDEN");
    }

    #[test]
    fn not_found_maps_to_404() {
        let e = DocShieldError::NotFound("files".into());
        assert_eq!(e.status_code(), 404);
    }
}
