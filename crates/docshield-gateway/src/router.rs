//! Axum router wiring.
//!
//! `/healthz` sits outside the CSRF layer; every `/v1` route runs behind it.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, services, transport};

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/v1/me", get(services::users::me))
        .route("/v1/users", get(services::users::list))
        .route("/v1/users/:id", get(services::users::get_one))
        .route("/v1/files", get(services::files::list))
        .route("/v1/files/:id", get(services::files::get_one))
        .route("/v1/files/:id/download", get(services::files::download))
        .route("/v1/files/:id/comments", post(services::files::add_comment))
        .route("/v1/modules", get(services::catalog::modules))
        .route("/v1/repositories", get(services::catalog::repositories))
        .route("/v1/analyses/:id", get(services::analyses::get_one))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            transport::csrf::csrf_protect,
        ));

    Router::new()
        .route("/healthz", get(ops::healthz))
        .merge(api)
        .with_state(state)
}
