use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use docshield_core::actor::has_groups_and_sharing;
use docshield_core::capabilities::MANAGE_USERS;
use docshield_core::document::Document;
use docshield_core::error::DocShieldError;
use docshield_core::redaction::{clean_users, Entity};

use crate::app_state::AppState;
use crate::context::Caller;
use crate::error::ApiResult;
use crate::store::{by_id, get_or_404};

/// The caller's own account, as the user policy lets them see it.
#[derive(Debug, Serialize)]
pub struct Profile {
    pub user: Document,
    /// Whether the user has groups and default sharing targets to submit with.
    pub sharing_configured: bool,
}

/// `GET /v1/users` (requires `manage_users`).
pub async fn list(State(state): State<AppState>, caller: Caller) -> ApiResult<Json<Vec<Document>>> {
    let users = state.guards(Some(MANAGE_USERS)).run(&caller.ctx, |ctx| {
        let all = state.store().find(Entity::User.collection(), &Document::new());
        Ok(clean_users(all, ctx.actor()))
    })?;
    Ok(Json(users))
}

/// `GET /v1/users/:id`
pub async fn get_one(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<Document>> {
    let user = state.guards(None).run(&caller.ctx, |ctx| {
        let user = get_or_404(state.store(), Entity::User.collection(), &id)?;
        Ok(clean_users(user, ctx.actor()))
    })?;
    Ok(Json(user))
}

/// `GET /v1/me` (authenticated callers only).
pub async fn me(State(state): State<AppState>, caller: Caller) -> ApiResult<Json<Profile>> {
    let profile = state.guards(None).run(&caller.ctx, |ctx| {
        let id = caller.user_id.clone().ok_or(DocShieldError::AuthFailed)?;
        let user = state
            .store()
            .find_one(Entity::User.collection(), &by_id(id))
            .ok_or(DocShieldError::AuthFailed)?;
        Ok(Profile {
            sharing_configured: has_groups_and_sharing(&user),
            user: clean_users(user, ctx.actor()),
        })
    })?;
    Ok(Json(profile))
}
