use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::ApiError;
use crate::model::{strip_reserved, Item};
use crate::store::ItemStore;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: ItemStore,
}

impl AppState {
    pub fn new(store: ItemStore) -> Self {
        Self { store }
    }
}

/// Create the item API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

/// Request body for create and update. `name` is kept as a raw JSON value so
/// type validation happens here with the exact client-facing messages rather
/// than as a deserialization rejection; every other field passes through.
#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    name: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl ItemPayload {
    /// Validate `name` for create: required and a non-empty string.
    fn required_name(&self) -> Result<String, ApiError> {
        match &self.name {
            Some(Value::String(name)) if !name.is_empty() => Ok(name.clone()),
            _ => Err(ApiError::validation(
                r#"Field "name" is required and must be a string"#,
            )),
        }
    }

    /// Validate `name` for update: optional, but a non-empty string when
    /// supplied.
    fn optional_name(&self) -> Result<Option<String>, ApiError> {
        match &self.name {
            None => Ok(None),
            Some(Value::String(name)) if !name.is_empty() => Ok(Some(name.clone())),
            Some(_) => Err(ApiError::validation(r#"Field "name" must be a string"#)),
        }
    }
}

/// Response body for DELETE /items/:id.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: Item,
}

/// Handler for GET / (health check).
pub async fn health() -> &'static str {
    "CRUD API running"
}

/// Handler for GET /items.
pub async fn list_items(State(state): State<AppState>) -> Json<Vec<Item>> {
    info!("GET /items");
    Json(state.store.list())
}

/// Handler for GET /items/:id.
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    info!("GET /items/{}", id);
    let item = state.store.get(&id).ok_or(ApiError::NotFound)?;
    Ok(Json(item))
}

/// Handler for POST /items.
#[axum::debug_handler]
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<ItemPayload>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    info!("POST /items - payload: {:?}", payload);

    let name = payload.required_name()?;

    let item = Item {
        id: Item::generate_id(),
        name,
        created_at: Item::now_timestamp(),
        updated_at: None,
        extra: strip_reserved(payload.extra),
    };
    state.store.append(item.clone());

    info!("Created item with ID: {}", item.id);

    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for PUT /items/:id. Shallow merge: supplied top-level fields
/// overwrite existing ones, unsupplied fields persist, and system-managed
/// fields are stamped last.
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ItemPayload>,
) -> Result<Json<Item>, ApiError> {
    info!("PUT /items/{} - payload: {:?}", id, payload);

    let mut item = state.store.get(&id).ok_or(ApiError::NotFound)?;

    if let Some(name) = payload.optional_name()? {
        item.name = name;
    }
    for (key, value) in strip_reserved(payload.extra) {
        item.extra.insert(key, value);
    }
    item.updated_at = Some(Item::now_timestamp());

    state.store.replace(&id, item.clone()).ok_or(ApiError::NotFound)?;

    info!("Updated item with ID: {}", id);

    Ok(Json(item))
}

/// Handler for DELETE /items/:id.
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    info!("DELETE /items/{}", id);

    let deleted = state.store.remove(&id).ok_or(ApiError::NotFound)?;

    info!("Successfully deleted item with ID: {}", id);

    Ok(Json(DeletedResponse { deleted }))
}
