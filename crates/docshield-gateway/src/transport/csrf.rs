//! CSRF layer (pre-handler origin guard).
//!
//! Purpose:
//! - Reject unsafe-method requests whose Referer origin differs from the
//!   origin the request targeted, before any handler runs.
//! - Returns HTTP 403 with the fixed description `Referer check failed.`.
//! - Marks passing requests `CsrfState::Checked` so per-handler guards skip
//!   the repeat check.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use docshield_core::guard::CsrfState;

use crate::app_state::AppState;
use crate::context::{header_str, target_base_url};
use crate::error::ApiError;

pub async fn csrf_protect(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.csrf_enabled() {
        return Ok(next.run(req).await);
    }

    let checked = {
        let base_url = target_base_url(&state, req.headers(), req.uri());
        CsrfState::Pending.advance(
            req.method().as_str(),
            header_str(req.headers(), header::REFERER.as_str()),
            &base_url,
        )?
    };

    req.extensions_mut().insert(checked);
    Ok(next.run(req).await)
}
