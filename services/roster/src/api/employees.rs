//! Employee API handlers.
//!
//! # Purpose
//! Implements employee CRUD. Reads are open to anonymous callers; writes and
//! deletes need `ROLE_ADMIN`. Each handler checks access before decoding the
//! body, then calls the secured store, which checks again.
use crate::api::error::{ApiError, api_store_error};
use crate::api::hal::Hal;
use crate::api::types::{EmployeeCollection, EmployeeResource, employee_href};
use crate::api::{decode_body, parse_id, resolve_principal};
use crate::app::AppState;
use crate::model::EmployeeDraft;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use bastion_authz::{Operation, ResourceType};

#[utoipa::path(
    get,
    path = "/employees",
    tag = "employees",
    responses(
        (status = 200, description = "List employees", body = EmployeeCollection),
        (status = 401, description = "Bad credentials", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_employees(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Hal<EmployeeCollection>, ApiError> {
    let principal = resolve_principal(&state, &headers)?;
    let employees = state
        .store
        .list_employees(principal.as_ref())
        .await
        .map_err(|err| api_store_error(&state.realm, "failed to list employees", err))?;
    Ok(Hal(EmployeeCollection::new(employees)))
}

#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "employees",
    params(
        ("id" = u64, Path, description = "Employee identifier")
    ),
    responses(
        (status = 200, description = "Employee", body = EmployeeResource),
        (status = 404, description = "Employee not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn get_employee(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Hal<EmployeeResource>, ApiError> {
    let principal = resolve_principal(&state, &headers)?;
    state
        .store
        .check(principal.as_ref(), ResourceType::Employee, Operation::Read)
        .map_err(|err| api_store_error(&state.realm, "failed to load employee", err))?;
    let id = parse_id(&id, "employee")?;
    let employee = state
        .store
        .get_employee(principal.as_ref(), id)
        .await
        .map_err(|err| api_store_error(&state.realm, "failed to load employee", err))?;
    Ok(Hal(employee.into()))
}

#[utoipa::path(
    post,
    path = "/employees",
    tag = "employees",
    request_body = EmployeeDraft,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResource),
        (status = 400, description = "Malformed body", body = crate::api::types::ErrorResponse),
        (status = 401, description = "Authentication required", body = crate::api::types::ErrorResponse),
        (status = 403, description = "ROLE_ADMIN required", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn create_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let principal = resolve_principal(&state, &headers)?;
    state
        .store
        .check(principal.as_ref(), ResourceType::Employee, Operation::Write)
        .map_err(|err| api_store_error(&state.realm, "failed to create employee", err))?;
    let draft: EmployeeDraft = decode_body(&body)?;
    let employee = state
        .store
        .create_employee(principal.as_ref(), draft)
        .await
        .map_err(|err| api_store_error(&state.realm, "failed to create employee", err))?;
    Ok((
        StatusCode::CREATED,
        [(LOCATION, employee_href(employee.id))],
        Hal(EmployeeResource::from(employee)),
    ))
}

#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "employees",
    params(
        ("id" = u64, Path, description = "Employee identifier")
    ),
    request_body = EmployeeDraft,
    responses(
        (status = 200, description = "Employee replaced", body = EmployeeResource),
        (status = 403, description = "ROLE_ADMIN required", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Employee not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn update_employee(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Hal<EmployeeResource>, ApiError> {
    let principal = resolve_principal(&state, &headers)?;
    state
        .store
        .check(principal.as_ref(), ResourceType::Employee, Operation::Write)
        .map_err(|err| api_store_error(&state.realm, "failed to update employee", err))?;
    let id = parse_id(&id, "employee")?;
    let draft: EmployeeDraft = decode_body(&body)?;
    let employee = state
        .store
        .update_employee(principal.as_ref(), id, draft)
        .await
        .map_err(|err| api_store_error(&state.realm, "failed to update employee", err))?;
    Ok(Hal(employee.into()))
}

#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "employees",
    params(
        ("id" = u64, Path, description = "Employee identifier")
    ),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 403, description = "ROLE_ADMIN required", body = crate::api::types::ErrorResponse),
        (status = 404, description = "Employee not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn delete_employee(
    Path(id): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let principal = resolve_principal(&state, &headers)?;
    state
        .store
        .check(principal.as_ref(), ResourceType::Employee, Operation::Delete)
        .map_err(|err| api_store_error(&state.realm, "failed to delete employee", err))?;
    let id = parse_id(&id, "employee")?;
    state
        .store
        .delete_employee(principal.as_ref(), id)
        .await
        .map_err(|err| api_store_error(&state.realm, "failed to delete employee", err))?;
    Ok(StatusCode::NO_CONTENT)
}
