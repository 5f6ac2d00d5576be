// src/handlers/sales.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
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
    handlers::validation::{check_optional_price, field_error, finish, parse_path_id},
    middleware::i18n::Locale,
    models::sales::{NewSale, Sale, SaleWithProduct},
};

// ---
// Payload: CreateSale
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    pub product_id: Uuid,

    #[validate(range(min = 1, code = "quantity_min"))]
    #[schema(example = 2)]
    pub quantity: i32,

    // Opcional: sem ele vale o preço atual do produto
    #[schema(value_type = Option<String>, example = "89.95")]
    pub unit_price: Option<Decimal>,

    // Opcional: só é conferido contra unit_price * quantity
    #[schema(value_type = Option<String>, example = "179.90")]
    pub total_price: Option<Decimal>,
}

impl CreateSalePayload {
    fn validate_all(&self) -> Result<(), AppError> {
        finish(self.validate(), |errors| {
            check_optional_price(errors, "unitPrice", self.unit_price.as_ref());
            check_optional_price(errors, "totalPrice", self.total_price.as_ref());
        })
    }
}

impl From<CreateSalePayload> for NewSale {
    fn from(payload: CreateSalePayload) -> Self {
        NewSale {
            product_id: payload.product_id,
            quantity: payload.quantity,
            unit_price: payload.unit_price,
            total_price: payload.total_price,
        }
    }
}

// ---
// Query: intervalo de datas (RFC 3339, limites inclusivos)
// ---
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SalesQuery {
    /// Início do intervalo, ex: 2024-05-01T00:00:00Z
    pub from: Option<String>,
    /// Fim do intervalo
    pub to: Option<String>,
}

fn parse_timestamp(field: &'static str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| field_error(field, "invalid_timestamp")),
    }
}

// GET /api/sales
#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    params(SalesQuery),
    responses(
        (status = 200, description = "Vendas com o produto (null se removido), mais recentes primeiro", body = Vec<SaleWithProduct>),
        (status = 400, description = "Intervalo de datas inválido")
    )
)]
pub async fn get_all_sales(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<SalesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let from = parse_timestamp("from", query.from.as_deref()).map_err(to_api)?;
    let to = parse_timestamp("to", query.to.as_deref()).map_err(to_api)?;

    let sales = match (from, to) {
        (None, None) => app_state.sales_service.list_sales(),
        (from, to) => app_state
            .sales_service
            .sales_by_date_range(from, to)
            .map_err(to_api)?,
    };

    Ok((StatusCode::OK, Json(sales)))
}

// GET /api/sales/{id}
#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Sales",
    params(("id" = String, Path, description = "ID da venda")),
    responses(
        (status = 200, description = "Venda com o produto", body = SaleWithProduct),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let sale = parse_path_id(&id, AppError::SaleNotFound)
        .and_then(|id| app_state.sales_service.get_sale(id))
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(sale)))
}

// POST /api/sales
#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda registrada; estoque baixado", body = Sale),
        (status = 400, description = "Dados inválidos, estoque insuficiente ou total divergente"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    locale: Locale,
    AppJson(payload): AppJson<CreateSalePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate_all()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let sale = app_state
        .stock_service
        .record_sale(payload.into())
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(sale)))
}
