// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erros tipados do núcleo (store + regras de estoque + métricas).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Corpo da requisição inválido: {0}")]
    InvalidBody(String),

    #[error("SKU já existe: {0}")]
    SkuAlreadyExists(String),

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Venda não encontrada")]
    SaleNotFound,

    #[error("Estoque insuficiente (disponível: {available}, solicitado: {requested})")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Total informado ({received}) difere do calculado ({expected})")]
    PriceMismatch { expected: Decimal, received: Decimal },

    #[error("Intervalo de datas inválido")]
    InvalidDateRange,

    #[error("Valor fora do intervalo suportado: {0}")]
    AmountOutOfRange(&'static str),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// O erro que sai pela borda HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Value>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidBody(_)
            | AppError::SkuAlreadyExists(_)
            | AppError::InsufficientStock { .. }
            | AppError::PriceMismatch { .. }
            | AppError::InvalidDateRange
            | AppError::AmountOutOfRange(_) => StatusCode::BAD_REQUEST,
            AppError::ProductNotFound | AppError::SaleNotFound => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Traduz o erro para a resposta HTTP no idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.lang();
        let status = self.status();

        let (message, details) = match &self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            let key = format!("validation.{}", e.code);
                            i18n.lookup(lang, &key)
                                .map(str::to_string)
                                .or_else(|| e.message.as_ref().map(|m| m.to_string()))
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                (i18n.translate(lang, "error.validation"), Some(json!(details)))
            }
            AppError::InvalidBody(reason) => (
                i18n.translate(lang, "error.invalid_body"),
                Some(json!({ "body": [reason] })),
            ),
            AppError::SkuAlreadyExists(sku) => (
                i18n.translate_with(lang, "error.sku_exists", &[("sku", sku.as_str())]),
                None,
            ),
            AppError::ProductNotFound => (i18n.translate(lang, "error.product_not_found"), None),
            AppError::SaleNotFound => (i18n.translate(lang, "error.sale_not_found"), None),
            AppError::InsufficientStock { available, requested } => {
                let (available, requested) = (available.to_string(), requested.to_string());
                let message = i18n.translate_with(
                    lang,
                    "error.insufficient_stock",
                    &[("available", available.as_str()), ("requested", requested.as_str())],
                );
                (message, None)
            }
            AppError::PriceMismatch { expected, received } => {
                let (expected, received) = (expected.to_string(), received.to_string());
                let message = i18n.translate_with(
                    lang,
                    "error.price_mismatch",
                    &[("expected", expected.as_str()), ("received", received.as_str())],
                );
                (message, None)
            }
            AppError::InvalidDateRange => (i18n.translate(lang, "error.invalid_date_range"), None),
            AppError::AmountOutOfRange(field) => {
                let mut details = serde_json::Map::new();
                details.insert(field.to_string(), json!([i18n.translate(lang, "validation.price_max")]));
                (i18n.translate(lang, "error.amount_out_of_range"), Some(Value::Object(details)))
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (i18n.translate(lang, "error.internal"), None)
            }
        };

        ApiError { status, message, details }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "message": self.message, "details": details }),
            None => json!({ "message": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Locale {
        Locale::default()
    }

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(AppError::ProductNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::InsufficientStock { available: 4, requested: 5 }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::SkuAlreadyExists("X-1".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn insufficient_stock_message_carries_quantities() {
        let i18n = I18nStore::new();
        let api = AppError::InsufficientStock { available: 4, requested: 5 }.to_api_error(&en(), &i18n);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert!(api.message.contains('4'));
        assert!(api.message.contains('5'));
    }

    #[test]
    fn out_of_range_amount_is_a_bad_request_on_its_field() {
        let i18n = I18nStore::new();
        let api = AppError::AmountOutOfRange("totalPrice").to_api_error(&en(), &i18n);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("details");
        assert!(details["totalPrice"].is_array());
    }

    #[test]
    fn portuguese_locale_translates_messages() {
        let i18n = I18nStore::new();
        let api = AppError::ProductNotFound.to_api_error(&Locale::new("pt"), &i18n);
        assert_eq!(api.message, "Produto não encontrado.");
    }

    #[test]
    fn validation_errors_are_listed_per_field() {
        let i18n = I18nStore::new();
        let mut errors = validator::ValidationErrors::new();
        errors.add("quantity", validator::ValidationError::new("quantity_min"));

        let api = AppError::ValidationError(errors).to_api_error(&en(), &i18n);
        let details = api.details.expect("details");
        assert_eq!(details["quantity"][0], "Quantity must be at least 1.");
    }
}
