use axum::{extract::{Path, State}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::property::{self, validate_price, PropertyRecord};

use crate::{errors::JsonApiError, routes::ServerState};

/// Wire representation of a property. `id` is ignored on create and update.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PropertyDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub address: String,
    #[serde(default)]
    pub price: Option<f64>,
    pub size: f64,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<property::Model> for PropertyDto {
    fn from(m: property::Model) -> Self {
        Self {
            id: Some(m.id),
            address: m.address,
            price: Some(m.price),
            size: m.size,
            description: m.description,
        }
    }
}

#[utoipa::path(
    get, path = "/api/properties", tag = "properties",
    responses(
        (status = 200, description = "List OK", body = [PropertyDto]),
        (status = 500, description = "List Failed", body = crate::errors::ErrorBody)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<PropertyDto>>, JsonApiError> {
    let list = state.properties.get_all_properties().await?;
    info!(count = list.len(), "list properties");
    Ok(Json(list.into_iter().map(PropertyDto::from).collect()))
}

#[utoipa::path(
    get, path = "/api/properties/{id}", tag = "properties",
    params(("id" = i64, Path, description = "Property ID")),
    responses(
        (status = 200, description = "OK", body = PropertyDto),
        (status = 404, description = "Not Found", body = crate::errors::ErrorBody)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<Json<PropertyDto>, JsonApiError> {
    let found = state
        .properties
        .get_property_by_id(id)
        .await?
        .ok_or_else(JsonApiError::property_not_found)?;
    Ok(Json(found.into()))
}

#[utoipa::path(
    post, path = "/api/properties", tag = "properties",
    request_body = PropertyDto,
    responses(
        (status = 200, description = "Created", body = PropertyDto),
        (status = 400, description = "Price missing or not greater than 0", body = crate::errors::ErrorBody),
        (status = 500, description = "Create Failed", body = crate::errors::ErrorBody)
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<PropertyDto>) -> Result<Json<PropertyDto>, JsonApiError> {
    let price = validate_price(input.price)?;
    let record = PropertyRecord {
        id: None,
        address: input.address,
        price,
        size: input.size,
        description: input.description,
    };
    let saved = state.properties.save_property(record).await?;
    info!(id = saved.id, address = %saved.address, "created property");
    Ok(Json(saved.into()))
}

#[utoipa::path(
    put, path = "/api/properties/{id}", tag = "properties",
    params(("id" = i64, Path, description = "Property ID")),
    request_body = PropertyDto,
    responses(
        (status = 200, description = "Updated", body = PropertyDto),
        (status = 400, description = "Price missing or not greater than 0", body = crate::errors::ErrorBody),
        (status = 404, description = "Not Found", body = crate::errors::ErrorBody),
        (status = 500, description = "Update Failed", body = crate::errors::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(input): Json<PropertyDto>,
) -> Result<Json<PropertyDto>, JsonApiError> {
    let existing = state
        .properties
        .get_property_by_id(id)
        .await?
        .ok_or_else(JsonApiError::property_not_found)?;
    let price = validate_price(input.price)?;

    // full replace; the stored id wins over any id in the body
    let mut record = PropertyRecord::from(existing);
    record.address = input.address;
    record.price = price;
    record.size = input.size;
    record.description = input.description;

    let saved = state.properties.save_property(record).await?;
    info!(id = saved.id, "updated property");
    Ok(Json(saved.into()))
}

#[utoipa::path(
    delete, path = "/api/properties/{id}", tag = "properties",
    params(("id" = i64, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::errors::ErrorBody),
        (status = 500, description = "Delete Failed", body = crate::errors::ErrorBody)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> Result<StatusCode, JsonApiError> {
    if state.properties.get_property_by_id(id).await?.is_none() {
        return Err(JsonApiError::property_not_found());
    }
    state.properties.delete_property(Some(id)).await?;
    info!(id, "deleted property");
    Ok(StatusCode::OK)
}
