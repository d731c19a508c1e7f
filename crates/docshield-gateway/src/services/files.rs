//! File documents and their comments.

use std::io;
use std::path::PathBuf;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use docshield_core::capabilities::ADD_COMMENTS;
use docshield_core::context::RequestContext;
use docshield_core::document::Document;
use docshield_core::enrich::{enrich_comments, ANALYST_FIELD, COMMENTS_FIELD};
use docshield_core::error::{DocShieldError, Result};
use docshield_core::redaction::{clean_files, Entity};

use crate::app_state::AppState;
use crate::context::Caller;
use crate::error::ApiResult;
use crate::store::{by_id, get_or_404, StoreUserLookup};

/// Server-side location of the stored file. Never exposed through the API.
pub const FILEPATH_FIELD: &str = "filepath";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewComment {
    pub comment: String,
}

/// `GET /v1/files`
pub async fn list(State(state): State<AppState>, caller: Caller) -> ApiResult<Json<Vec<Document>>> {
    let files = state.guards(None).run(&caller.ctx, |ctx| {
        let all = state.store().find(Entity::File.collection(), &Document::new());
        Ok(clean_files(all, ctx.actor()))
    })?;
    Ok(Json(files))
}

/// `GET /v1/files/:id` (comments enriched when the feature is on).
pub async fn get_one(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Json<Document>> {
    let file = state
        .guards(None)
        .run(&caller.ctx, |ctx| present(&state, ctx, &id))?;
    Ok(Json(file))
}

/// `POST /v1/files/:id/comments` (requires `add_comments`).
///
/// The body is only parsed once the guards passed.
pub async fn add_comment(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Document>> {
    let file = state
        .guards(Some(ADD_COMMENTS))
        .run(&caller.ctx, |ctx| {
            if !state.comments_enabled() {
                return Err(DocShieldError::NotFound("comments are disabled".into()));
            }
            let body: NewComment = serde_json::from_slice(&body)
                .map_err(|e| DocShieldError::BadRequest(format!("comment body: {e}")))?;
            let analyst = caller.user_id.clone().ok_or(DocShieldError::AuthFailed)?;
            let comment = Document::new()
                .with(ANALYST_FIELD, analyst)
                .with("comment", body.comment)
                .into_value();

            let found = state.store().update_one(
                Entity::File.collection(),
                &by_id(id.as_str()),
                &mut |doc: &mut Document| push_comment(doc, comment.clone()),
            );
            if !found {
                return Err(DocShieldError::NotFound(format!("files/{id}")));
            }
            tracing::info!(file = %id, "comment added");
            present(&state, ctx, &id)
        })?;
    Ok(Json(file))
}

/// `GET /v1/files/:id/download` (authenticated callers only).
pub async fn download(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let filepath = state.guards(None).run(&caller.ctx, |_| {
        if caller.user_id.is_none() {
            return Err(DocShieldError::AuthFailed);
        }
        let file = get_or_404(state.store(), Entity::File.collection(), &id)?;
        file.get(FILEPATH_FIELD)
            .and_then(Value::as_str)
            .map(PathBuf::from)
            .ok_or_else(|| DocShieldError::NotFound(format!("files/{id}: no stored file")))
    })?;

    let bytes = match tokio::fs::read(&filepath).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(file = %id, path = %filepath.display(), "stored file missing");
            return Err(DocShieldError::NotFound(format!("files/{id}: no stored file")).into());
        }
        Err(e) => {
            return Err(DocShieldError::Internal(format!("read {}: {e}", filepath.display())).into())
        }
    };

    tracing::info!(file = %id, size = bytes.len(), "file downloaded");
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static("application/octet-stream")),
        (header::CONTENT_DISPOSITION, attachment(&filepath)?),
    ];
    Ok((headers, bytes).into_response())
}

/// `attachment; filename=<basename>`, the name reduced to latin-1.
fn attachment(path: &std::path::Path) -> Result<HeaderValue> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let mut value = b"attachment; filename=".to_vec();
    value.extend(
        name.chars()
            .filter(|c| !c.is_control())
            .filter_map(|c| u8::try_from(u32::from(c)).ok()),
    );
    HeaderValue::from_bytes(&value)
        .map_err(|e| DocShieldError::Internal(format!("content-disposition: {e}")))
}

/// Fetch, redact, and enrich one file for `ctx`'s actor.
fn present(state: &AppState, ctx: &RequestContext, id: &str) -> Result<Document> {
    let file = get_or_404(state.store(), Entity::File.collection(), id)?;
    let file = clean_files(file, ctx.actor());
    if !state.comments_enabled() {
        return Ok(file);
    }
    Ok(enrich_comments(file, ctx.actor(), &StoreUserLookup(state.store())))
}

fn push_comment(doc: &mut Document, comment: Value) {
    match doc.get_mut(COMMENTS_FIELD) {
        Some(Value::Array(comments)) => comments.push(comment),
        _ => {
            doc.insert(COMMENTS_FIELD, Value::Array(vec![comment]));
        }
    }
}
