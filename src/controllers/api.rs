use axum::extract::Path;
use axum::http::Method;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::JsonOrForm;
use crate::response::ApiResponse;
use crate::routing::{get, Routes};

#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub name: String,
}

/// Build the general API route group, mounted under `/api`.
pub fn routes() -> Routes {
    Routes::new("/api")
        .route(
            "/items",
            &[Method::GET, Method::POST],
            get(list_items).post(create_item),
        )
        .get("/items/{id}", get_item)
}

// Demo collection, served until a real backing store replaces it.
fn demo_items() -> Vec<Item> {
    vec![
        Item {
            id: "1".to_string(),
            name: "Notebook".to_string(),
        },
        Item {
            id: "2".to_string(),
            name: "Pen".to_string(),
        },
        Item {
            id: "3".to_string(),
            name: "Lamp".to_string(),
        },
    ]
}

/// `GET /api/items` — list the demo collection.
async fn list_items() -> Json<ApiResponse<Vec<Item>>> {
    Json(ApiResponse::success(demo_items()))
}

/// `POST /api/items` — echo-create an item with a fresh id.
async fn create_item(
    JsonOrForm(payload): JsonOrForm<CreateItemRequest>,
) -> Result<Json<ApiResponse<Item>>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }

    Ok(Json(ApiResponse::success(Item {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
    })))
}

/// `GET /api/items/{id}` — fetch one demo item.
async fn get_item(Path(id): Path<String>) -> Result<Json<ApiResponse<Item>>, AppError> {
    demo_items()
        .into_iter()
        .find(|item| item.id == id)
        .map(|item| Json(ApiResponse::success(item)))
        .ok_or_else(|| AppError::NotFound(format!("No item with id {id}")))
}
