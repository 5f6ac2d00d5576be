// src/models/inventory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// Motivos conhecidos. O campo `reason` continua texto livre.
pub mod reasons {
    pub const SALE: &str = "sale";
    pub const RESTOCK: &str = "restock";
    pub const RETURN: &str = "return";
    pub const DAMAGE: &str = "damage";
    pub const THEFT: &str = "theft";
    pub const ADJUSTMENT: &str = "adjustment";
    pub const INITIAL_STOCK: &str = "initial_stock";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    In,
    Out,
}

impl MovementType {
    /// Variação com sinal aplicada ao saldo.
    pub fn signed(self, quantity: i32) -> i32 {
        match self {
            MovementType::In => quantity,
            MovementType::Out => -quantity,
        }
    }
}

// --- STOCK MOVEMENT (Histórico, só inserção) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    #[schema(example = 50)]
    pub quantity: i32,
    #[schema(example = "restock")]
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewStockMovement {
    pub product_id: Uuid,
    pub movement_type: MovementType,
    pub quantity: i32,
    pub reason: Option<String>,
}
