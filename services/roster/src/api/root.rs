//! Root listing handler.
use crate::api::error::{ApiError, api_store_error};
use crate::api::hal::Hal;
use crate::api::resolve_principal;
use crate::api::types::RootResource;
use crate::app::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use bastion_authz::{Operation, ResourceType};

#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses(
        (status = 200, description = "Links to the exported collections", body = RootResource)
    )
)]
/// Return links to the employee and item collections.
///
/// Open to anonymous callers under the standard policy.
pub(crate) async fn root(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Hal<RootResource>, ApiError> {
    let principal = resolve_principal(&state, &headers)?;
    state
        .store
        .check(principal.as_ref(), ResourceType::Root, Operation::Read)
        .map_err(|err| api_store_error(&state.realm, "failed to list root", err))?;
    Ok(Hal(RootResource::default()))
}
