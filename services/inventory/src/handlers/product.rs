use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use stockroom_auth_types::identity::SessionIdentity;
use stockroom_domain::location::Location;
use stockroom_domain::stock::QuantityPatch;

use crate::domain::types::Product;
use crate::error::InventoryServiceError;
use crate::state::AppState;
use crate::usecase::product::{
    CreateProductInput, CreateProductUseCase, DeleteProductUseCase, GetProductUseCase,
    ListCategoriesUseCase, ListProductsUseCase, UpdateProductInput, UpdateProductUseCase,
};

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub location: Location,
    pub quantity_total: i32,
    pub quantity_new: i32,
    pub quantity_used: i32,
    pub quantity_damaged: i32,
    #[serde(serialize_with = "stockroom_core::datetime::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "stockroom_core::datetime::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            code: product.code,
            name: product.name,
            description: product.description,
            category: product.category,
            brand: product.brand,
            model: product.model,
            location: product.location,
            quantity_total: product.stock.total(),
            quantity_new: product.stock.new_count(),
            quantity_used: product.stock.used_count(),
            quantity_damaged: product.stock.damaged_count(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

// ── GET /products ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ProductQuery {
    pub code: Option<String>,
}

pub async fn list_products(
    _identity: SessionIdentity,
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductResponse>>, InventoryServiceError> {
    let usecase = ListProductsUseCase {
        repo: state.product_repo(),
    };
    let products = usecase.execute(query.code.as_deref()).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

// ── GET /products/{id} ───────────────────────────────────────────────────────

pub async fn get_product(
    _identity: SessionIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>, InventoryServiceError> {
    let usecase = GetProductUseCase {
        repo: state.product_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /products ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub location: String,
    #[serde(default)]
    pub quantity_total: i32,
    #[serde(default)]
    pub quantity_new: i32,
    #[serde(default)]
    pub quantity_used: i32,
    #[serde(default)]
    pub quantity_damaged: i32,
}

pub async fn create_product(
    _identity: SessionIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), InventoryServiceError> {
    let usecase = CreateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase
        .execute(CreateProductInput {
            code: body.code,
            name: body.name,
            description: body.description,
            category: body.category,
            brand: body.brand,
            model: body.model,
            location: body.location,
            quantity_total: body.quantity_total,
            quantity_new: body.quantity_new,
            quantity_used: body.quantity_used,
            quantity_damaged: body.quantity_damaged,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

// ── PUT /products/{id} ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub location: Option<String>,
    pub quantity_total: Option<i32>,
    pub quantity_new: Option<i32>,
    pub quantity_used: Option<i32>,
    pub quantity_damaged: Option<i32>,
}

pub async fn update_product(
    _identity: SessionIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, InventoryServiceError> {
    let usecase = UpdateProductUseCase {
        repo: state.product_repo(),
    };
    let product = usecase
        .execute(
            id,
            UpdateProductInput {
                code: body.code,
                name: body.name,
                description: body.description,
                category: body.category,
                brand: body.brand,
                model: body.model,
                location: body.location,
                quantities: QuantityPatch {
                    total: body.quantity_total,
                    new: body.quantity_new,
                    used: body.quantity_used,
                    damaged: body.quantity_damaged,
                },
            },
        )
        .await?;
    Ok(Json(product.into()))
}

// ── DELETE /products/{id} ────────────────────────────────────────────────────

pub async fn delete_product(
    _identity: SessionIdentity,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, InventoryServiceError> {
    let usecase = DeleteProductUseCase {
        repo: state.product_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /products/categories ─────────────────────────────────────────────────

pub async fn list_categories(
    _identity: SessionIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, InventoryServiceError> {
    let usecase = ListCategoriesUseCase {
        repo: state.product_repo(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── GET /locations ───────────────────────────────────────────────────────────

pub async fn list_locations() -> Json<[Location; 3]> {
    Json(Location::ALL)
}
