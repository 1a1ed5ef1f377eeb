//! OpenAPI schema aggregation for the roster API.
use crate::api::{
    employees, items, root, system,
    types::{
        EmbeddedEmployees, EmbeddedItems, EmployeeCollection, EmployeeResource, ErrorResponse,
        HealthStatus, ItemCollection, ItemResource, Link, RootResource,
    },
};
use crate::model::{Employee, EmployeeDraft, Item, ItemDraft};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "bastion-roster",
        version = "v1",
        description = "Role-guarded employee and item roster"
    ),
    paths(
        root::root,
        system::health,
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        items::list_items,
        items::get_item,
        items::create_item,
        items::update_item,
        items::delete_item
    ),
    components(schemas(
        Link,
        RootResource,
        HealthStatus,
        ErrorResponse,
        Employee,
        EmployeeDraft,
        EmployeeResource,
        EmbeddedEmployees,
        EmployeeCollection,
        Item,
        ItemDraft,
        ItemResource,
        EmbeddedItems,
        ItemCollection
    )),
    tags(
        (name = "root", description = "Hypermedia entry point"),
        (name = "system", description = "Health endpoints"),
        (name = "employees", description = "Employee records"),
        (name = "items", description = "Item records")
    )
)]
pub struct ApiDoc;
