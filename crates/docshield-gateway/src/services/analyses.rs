use axum::{
    extract::{Path, State},
    Json,
};

use docshield_core::document::Document;
use docshield_core::redaction::{clean_analyses, Entity};

use crate::app_state::AppState;
use crate::context::Caller;
use crate::error::ApiResult;
use crate::store::get_or_404;

/// `GET /v1/analyses/:id` (logs only with `see_logs`).
pub async fn get_one(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<Document>> {
    let analysis = state.guards(None).run(&caller.ctx, |ctx| {
        let analysis = get_or_404(state.store(), Entity::Analysis.collection(), &id)?;
        Ok(clean_analyses(analysis, ctx.actor()))
    })?;
    Ok(Json(analysis))
}
