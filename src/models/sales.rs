// src/models/sales.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::product::Product;

// --- Venda (snapshot de preço no momento da venda) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub product_id: Uuid,
    #[schema(example = 3)]
    pub quantity: i32,
    #[schema(value_type = String, example = "185.50")]
    pub unit_price: Decimal,
    #[schema(value_type = String, example = "556.50")]
    pub total_price: Decimal,
    pub sale_date: DateTime<Utc>,
}

// Entrada da regra de venda. Sem `unit_price` usa o preço atual do produto;
// `total_price`, se vier, só é conferido.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
}

// Venda + produto resolvido na leitura.
// `product` é `null` quando o produto já foi removido.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithProduct {
    #[serde(flatten)]
    pub sale: Sale,
    pub product: Option<Product>,
}

impl SaleWithProduct {
    pub fn product_available(&self) -> bool {
        self.product.is_some()
    }
}
