//! Per-request caller context.
//!
//! `Caller` is the axum extractor handlers use to get a `RequestContext`:
//! the acting user (resolved from the API key header), the method, the
//! Referer and the base URL the request targeted.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap, Uri};
use serde_json::Value;

use docshield_core::actor::Anonymous;
use docshield_core::context::{ActorRef, RequestContext};
use docshield_core::guard::CsrfState;

use crate::app_state::AppState;
use crate::error::ApiError;

/// Extracted request context plus the caller's user id, if authenticated.
#[derive(Debug, Clone)]
pub struct Caller {
    pub ctx: RequestContext,
    pub user_id: Option<Value>,
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let api_key = header_str(&parts.headers, &state.cfg().gateway.api_key_header);
        let (actor, user_id): (ActorRef, Option<Value>) = match api_key {
            Some(key) => {
                let user = state.resolve_api_key(key)?;
                let id = user.id().cloned();
                (Arc::new(user), id)
            }
            None => (Arc::new(Anonymous), None),
        };

        let base_url = target_base_url(state, &parts.headers, &parts.uri);
        let referer = header_str(&parts.headers, header::REFERER.as_str()).map(str::to_string);
        let csrf = parts.extensions.get::<CsrfState>().copied().unwrap_or_default();

        let ctx = RequestContext::new(parts.method.as_str(), base_url, actor)
            .with_referer(referer)
            .with_csrf_state(csrf);

        Ok(Caller { ctx, user_id })
    }
}

/// Base URL a request targeted, from config or the `Host` header / URI authority.
pub fn target_base_url(state: &AppState, headers: &HeaderMap, uri: &Uri) -> String {
    let host = header_str(headers, header::HOST.as_str())
        .or_else(|| uri.authority().map(|a| a.as_str()));
    state.base_url(host)
}

pub fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
