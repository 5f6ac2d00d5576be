// src/db/stock_repo.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    db::store::{newest_first, Tables},
    models::inventory::{MovementType, StockMovement},
};

// Livro-razão de movimentações. Só inserção: nada é alterado ou apagado.
#[derive(Debug, Clone, Default)]
pub struct StockMovementRepository;

impl StockMovementRepository {
    pub fn new() -> Self {
        Self
    }

    /// Movimentações mais recentes primeiro, opcionalmente de um só produto.
    pub fn get_all(&self, tables: &Tables, product_id: Option<Uuid>) -> Vec<StockMovement> {
        let rows = tables
            .stock_movements
            .values()
            .filter(|m| product_id.is_none_or(|id| m.product_id == id));
        newest_first(rows, |m| m.created_at)
    }

    pub fn record(
        &self,
        tables: &mut Tables,
        product_id: Uuid,
        movement_type: MovementType,
        quantity: i32,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> StockMovement {
        let movement = StockMovement {
            id: Uuid::new_v4(),
            product_id,
            movement_type,
            quantity,
            reason,
            created_at: now,
        };
        tables.stock_movements.insert(movement.id, movement.clone());
        movement
    }
}
