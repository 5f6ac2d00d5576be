// src/handlers/stock_movements.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        extract::AppJson,
    },
    config::AppState,
    handlers::validation::field_error,
    middleware::i18n::Locale,
    models::inventory::{MovementType, NewStockMovement, StockMovement},
};

// --- DTO: Entrada / Saída de estoque ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockMovementPayload {
    pub product_id: Uuid,

    #[serde(rename = "type")]
    pub movement_type: MovementType,

    #[validate(range(min = 1, code = "quantity_min"))]
    #[schema(example = 50)]
    pub quantity: i32,

    // Ex: "restock", "return", "damage", "theft", "adjustment"
    #[validate(length(max = 200, code = "reason_length"))]
    pub reason: Option<String>,
}

impl From<CreateStockMovementPayload> for NewStockMovement {
    fn from(payload: CreateStockMovementPayload) -> Self {
        NewStockMovement {
            product_id: payload.product_id,
            movement_type: payload.movement_type,
            quantity: payload.quantity,
            reason: payload.reason.filter(|r| !r.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StockMovementQuery {
    /// Filtra por produto
    pub product_id: Option<String>,
}

impl StockMovementQuery {
    fn product_id(&self) -> Result<Option<Uuid>, AppError> {
        match self.product_id.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => Uuid::parse_str(raw)
                .map(Some)
                .map_err(|_| field_error("productId", "invalid_id")),
        }
    }
}

// GET /api/stock-movements
#[utoipa::path(
    get,
    path = "/api/stock-movements",
    tag = "Stock Movements",
    params(StockMovementQuery),
    responses(
        (status = 200, description = "Movimentações, mais recentes primeiro", body = Vec<StockMovement>),
        (status = 400, description = "productId inválido")
    )
)]
pub async fn get_stock_movements(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<StockMovementQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let product_id = query
        .product_id()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let movements = app_state.stock_service.list_stock_movements(product_id);

    Ok((StatusCode::OK, Json(movements)))
}

// POST /api/stock-movements
#[utoipa::path(
    post,
    path = "/api/stock-movements",
    tag = "Stock Movements",
    request_body = CreateStockMovementPayload,
    responses(
        (status = 201, description = "Movimentação registrada; saldo atualizado", body = StockMovement),
        (status = 400, description = "Dados inválidos ou estoque insuficiente para saída"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn create_stock_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    AppJson(payload): AppJson<CreateStockMovementPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let movement = app_state
        .stock_service
        .record_stock_movement(payload.into())
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(movement)))
}
