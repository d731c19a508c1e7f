//! Module and repository listings.

use axum::{extract::State, Json};

use docshield_core::capabilities::MANAGE_MODULES;
use docshield_core::document::Document;
use docshield_core::redaction::{clean_modules, clean_repositories, Entity};

use crate::app_state::AppState;
use crate::context::Caller;
use crate::error::ApiResult;

/// `GET /v1/modules` (requires `manage_modules`).
pub async fn modules(State(state): State<AppState>, caller: Caller) -> ApiResult<Json<Vec<Document>>> {
    let modules = state.guards(Some(MANAGE_MODULES)).run(&caller.ctx, |ctx| {
        let all = state.store().find(Entity::Module.collection(), &Document::new());
        Ok(clean_modules(all, ctx.actor()))
    })?;
    Ok(Json(modules))
}

/// `GET /v1/repositories` (requires `manage_modules`).
pub async fn repositories(
    State(state): State<AppState>,
    caller: Caller,
) -> ApiResult<Json<Vec<Document>>> {
    let repos = state.guards(Some(MANAGE_MODULES)).run(&caller.ctx, |ctx| {
        let all = state.store().find(Entity::Repository.collection(), &Document::new());
        Ok(clean_repositories(all, ctx.actor()))
    })?;
    Ok(Json(repos))
}
