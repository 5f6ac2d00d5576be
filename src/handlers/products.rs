// src/handlers/products.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        extract::AppJson,
    },
    config::AppState,
    handlers::validation::{check_optional_price, field_error, finish, parse_path_id, validate_price},
    middleware::i18n::Locale,
    models::{
        dashboard::LowStockItem,
        product::{NewProduct, Product, ProductFilter, ProductPatch, StatusFilter},
    },
};

// ---
// Payload: CreateProduct
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, max = 200, code = "name_length"))]
    #[schema(example = "Biltong Dry Wors")]
    pub name: String,

    #[validate(length(min = 1, max = 50, code = "sku_length"))]
    #[schema(example = "BLT-001")]
    pub sku: String,

    #[validate(length(max = 2000, code = "description_length"))]
    pub description: Option<String>,

    #[validate(length(min = 1, code = "category_required"))]
    #[schema(example = "Food & Beverages")]
    pub category: String,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "185.50")]
    pub price: Decimal,

    // Se o JSON não tiver esse campo, assume 0
    #[validate(range(min = 0, code = "stock_min"))]
    pub stock: Option<i32>,

    // Default 10
    #[validate(range(min = 0, code = "threshold_min"))]
    pub low_stock_threshold: Option<i32>,
}

impl From<CreateProductPayload> for NewProduct {
    fn from(payload: CreateProductPayload) -> Self {
        NewProduct {
            name: payload.name,
            sku: payload.sku,
            description: payload.description,
            category: payload.category,
            price: payload.price,
            stock: payload.stock,
            low_stock_threshold: payload.low_stock_threshold,
        }
    }
}

// ---
// Payload: UpdateProduct (todos os campos opcionais)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, max = 200, code = "name_length"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, code = "sku_length"))]
    pub sku: Option<String>,

    // String vazia limpa a descrição
    #[validate(length(max = 2000, code = "description_length"))]
    pub description: Option<String>,

    #[validate(length(min = 1, code = "category_required"))]
    pub category: Option<String>,

    #[schema(value_type = Option<String>, example = "179.95")]
    pub price: Option<Decimal>,

    // Novo saldo desejado; a diferença vira uma movimentação de ajuste
    #[validate(range(min = 0, code = "stock_min"))]
    pub stock: Option<i32>,

    #[validate(range(min = 0, code = "threshold_min"))]
    pub low_stock_threshold: Option<i32>,
}

impl UpdateProductPayload {
    fn validate_all(&self) -> Result<(), AppError> {
        finish(self.validate(), |errors| {
            check_optional_price(errors, "price", self.price.as_ref());
        })
    }

    fn into_patch(self) -> (ProductPatch, Option<i32>) {
        let patch = ProductPatch {
            name: self.name,
            sku: self.sku,
            description: self.description,
            category: self.category,
            price: self.price,
            low_stock_threshold: self.low_stock_threshold,
        };
        (patch, self.stock)
    }
}

// ---
// Query: filtros da listagem
// ---
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Busca em nome, SKU e descrição (sem diferenciar maiúsculas)
    pub search: Option<String>,
    /// Categoria exata
    pub category: Option<String>,
    /// in_stock | low_stock | out_of_stock | critical
    pub status: Option<String>,
}

impl ProductQuery {
    fn into_filter(self) -> Result<ProductFilter, AppError> {
        let status = match self.status.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<StatusFilter>()
                    .map_err(|_| field_error("status", "invalid_status"))?,
            ),
        };
        Ok(ProductFilter {
            search: self.search.filter(|s| !s.trim().is_empty()),
            category: self.category.filter(|c| !c.is_empty()),
            status,
        })
    }
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Produtos, mais recentes primeiro", body = Vec<Product>),
        (status = 400, description = "Filtro inválido")
    )
)]
pub async fn get_all_products(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ProductQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query
        .into_filter()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let products = app_state.product_service.list_products(&filter);

    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto", body = Product),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product = parse_path_id(&id, AppError::ProductNotFound)
        .and_then(|id| app_state.product_service.get_product(id))
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(product)))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 400, description = "Dados inválidos ou SKU já existe")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    AppJson(payload): AppJson<CreateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .product_service
        .create_product(payload.into())
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    request_body = UpdateProductPayload,
    params(("id" = String, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 400, description = "Dados inválidos ou SKU já existe"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_path_id(&id, AppError::ProductNotFound)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    payload
        .validate_all()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let (patch, stock) = payload.into_patch();
    let product = app_state
        .product_service
        .update_product(id, patch, stock)
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = parse_path_id(&id, AppError::ProductNotFound)
        .map(|id| app_state.product_service.delete_product(id))
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if !deleted {
        return Err(AppError::ProductNotFound.to_api_error(&locale, &app_state.i18n_store));
    }

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/products/low-stock
#[utoipa::path(
    get,
    path = "/api/products/low-stock",
    tag = "Products",
    responses(
        (status = 200, description = "Produtos com estoque baixo, mais esgotados primeiro", body = Vec<LowStockItem>)
    )
)]
pub async fn get_low_stock_products(State(app_state): State<AppState>) -> impl IntoResponse {
    let items = app_state.dashboard_service.get_low_stock_items();
    (StatusCode::OK, Json(items))
}
