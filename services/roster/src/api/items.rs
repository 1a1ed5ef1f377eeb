//! Item API handlers.
//!
//! # Purpose
//! Implements item CRUD. Every item operation, reads included, needs
//! `ROLE_ADMIN`; the secured store enforces it on each call.
use crate::api::error::{ApiError, api_store_error};
use crate::api::hal::Hal;
use crate::api::types::{ItemCollection, ItemResource, item_href};
use crate::api::{decode_body, parse_id, resolve_principal};
use crate::app::AppState;
use crate::model::ItemDraft;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use bastion_authz::{Operation, ResourceType};

#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    responses(
        (status = 200, description = "List items", body = ItemCollection),
        (status = 401, description = "Authentication required", body = crate::api::types::ErrorResponse),
        (status = 403, description = "ROLE_ADMIN required", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_items(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Hal<ItemCollection>, ApiError> {
    let principal = resolve_principal(&state, &headers)?;
    let items = state
        .store
        .list_items(principal.as_ref())
        .await
        .map_err(|err| api_store_error(&state.realm, "failed to list items", err))?;
    Ok(Hal(ItemCollection::new(items)))
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = u64, Path, description = "Item identifier")
    ),
    responses(
        (status = 200, description = "Item", body = ItemResource),
        (status = 404, description = "Item not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_item(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Hal<ItemResource>, ApiError> {
    let principal = resolve_principal(&state, &headers)?;
    state
        .store
        .check(principal.as_ref(), ResourceType::Item, Operation::Read)
        .map_err(|err| api_store_error(&state.realm, "failed to load item", err))?;
    let id = parse_id(&id, "item")?;
    let item = state
        .store
        .get_item(principal.as_ref(), id)
        .await
        .map_err(|err| api_store_error(&state.realm, "failed to load item", err))?;
    Ok(Hal(item.into()))
}

#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = ItemDraft,
    responses(
        (status = 201, description = "Item created", body = ItemResource),
        (status = 400, description = "Malformed body", body = crate::api::types::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::api::types::ErrorResponse),
        (status = 403, description = "ROLE_ADMIN required", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let principal = resolve_principal(&state, &headers)?;
    state
        .store
        .check(principal.as_ref(), ResourceType::Item, Operation::Write)
        .map_err(|err| api_store_error(&state.realm, "failed to create item", err))?;
    let draft: ItemDraft = decode_body(&body)?;
    let item = state
        .store
        .create_item(principal.as_ref(), draft)
        .await
        .map_err(|err| api_store_error(&state.realm, "failed to create item", err))?;
    Ok((
        StatusCode::CREATED,
        [(LOCATION, item_href(item.id))],
        Hal(ItemResource::from(item)),
    ))
}

#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = u64, Path, description = "Item identifier")
    ),
    request_body = ItemDraft,
    responses(
        (status = 200, description = "Item replaced", body = ItemResource),
        (status = 403, description = "ROLE_ADMIN required", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_item(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Hal<ItemResource>, ApiError> {
    let principal = resolve_principal(&state, &headers)?;
    state
        .store
        .check(principal.as_ref(), ResourceType::Item, Operation::Write)
        .map_err(|err| api_store_error(&state.realm, "failed to update item", err))?;
    let id = parse_id(&id, "item")?;
    let draft: ItemDraft = decode_body(&body)?;
    let item = state
        .store
        .update_item(principal.as_ref(), id, draft)
        .await
        .map_err(|err| api_store_error(&state.realm, "failed to update item", err))?;
    Ok(Hal(item.into()))
}

#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = u64, Path, description = "Item identifier")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 403, description = "ROLE_ADMIN required", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_item(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let principal = resolve_principal(&state, &headers)?;
    state
        .store
        .check(principal.as_ref(), ResourceType::Item, Operation::Delete)
        .map_err(|err| api_store_error(&state.realm, "failed to delete item", err))?;
    let id = parse_id(&id, "item")?;
    state
        .store
        .delete_item(principal.as_ref(), id)
        .await
        .map_err(|err| api_store_error(&state.realm, "failed to delete item", err))?;
    Ok(StatusCode::NO_CONTENT)
}
