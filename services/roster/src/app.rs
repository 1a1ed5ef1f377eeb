//! Roster HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
//!
//! # Notes
//! `build_state` performs the startup seeding; a failure there aborts startup.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::config::RosterConfig;
use crate::seed;
use crate::store::memory::InMemoryStore;
use crate::store::secured::SecuredStore;
use anyhow::Context;
use axum::{Json, Router};
use bastion_authz::{IdentityProvider, Policy};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub store: SecuredStore,
    pub identity: Arc<IdentityProvider>,
    /// Realm named in `WWW-Authenticate` challenges.
    pub realm: String,
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            )
        });

    Router::new()
        .route("/", axum::routing::get(api::root::root))
        .route("/health", axum::routing::get(api::system::health))
        .route(
            "/openapi.json",
            axum::routing::get(|| async { Json(ApiDoc::openapi()) }),
        )
        .route(
            "/employees",
            axum::routing::get(api::employees::list_employees)
                .post(api::employees::create_employee),
        )
        .route(
            "/employees/:id",
            axum::routing::get(api::employees::get_employee)
                .put(api::employees::update_employee)
                .delete(api::employees::delete_employee),
        )
        .route(
            "/items",
            axum::routing::get(api::items::list_items).post(api::items::create_item),
        )
        .route(
            "/items/:id",
            axum::routing::get(api::items::get_item)
                .put(api::items::update_item)
                .delete(api::items::delete_item),
        )
        .layer(trace_layer)
        .with_state(state)
}

/// Wire the in-memory store behind the standard policy and load the fixtures.
///
/// # Errors
/// - Seeding failures, which must abort startup.
pub async fn build_state(config: &RosterConfig) -> anyhow::Result<AppState> {
    let store = SecuredStore::new(Arc::new(InMemoryStore::new()), Policy::standard());
    seed::seed(&store).await.context("seed roster")?;
    Ok(AppState {
        store,
        identity: Arc::new(config.identity_provider()),
        realm: config.realm.clone(),
    })
}
