// src/db/product_repo.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::{newest_first, Tables},
    models::product::{NewProduct, Product, ProductPatch, DEFAULT_LOW_STOCK_THRESHOLD},
};

// Repositório de produtos. Não guarda estado: recebe as tabelas já travadas
// pelo service, como um executor dentro de uma transação.
#[derive(Debug, Clone, Default)]
pub struct ProductRepository;

impl ProductRepository {
    pub fn new() -> Self {
        Self
    }

    // ---
    // Leitura
    // ---

    /// Todos os produtos, do mais novo para o mais antigo (`created_at`).
    pub fn get_all(&self, tables: &Tables) -> Vec<Product> {
        newest_first(tables.products.values(), |p| p.created_at)
    }

    pub fn find_by_id(&self, tables: &Tables, id: Uuid) -> Option<Product> {
        tables.products.get(&id).cloned()
    }

    pub fn find_by_sku(&self, tables: &Tables, sku: &str) -> Option<Product> {
        tables.products.values().find(|p| p.sku == sku).cloned()
    }

    // ---
    // Escrita
    // ---

    /// Insere um produto novo. Unicidade de SKU é responsabilidade de quem chama.
    pub fn create(&self, tables: &mut Tables, new: NewProduct, now: DateTime<Utc>) -> Product {
        let product = Product {
            id: Uuid::new_v4(),
            name: new.name,
            sku: new.sku,
            description: new.description.filter(|d| !d.is_empty()),
            category: new.category,
            price: new.price,
            stock: new.stock.unwrap_or(0),
            low_stock_threshold: new.low_stock_threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD),
            created_at: now,
            updated_at: now,
        };
        tables.products.insert(product.id, product.clone());
        product
    }

    /// Aplica o patch numa cópia e substitui o registro.
    pub fn update(
        &self,
        tables: &mut Tables,
        id: Uuid,
        patch: &ProductPatch,
        now: DateTime<Utc>,
    ) -> Result<Product, AppError> {
        let existing = tables.products.get(&id).ok_or(AppError::ProductNotFound)?;
        let updated = existing.with_patch(patch, now);
        tables.products.insert(id, updated.clone());
        Ok(updated)
    }

    /// Remove o produto; `false` se ele não existia. Vendas e movimentações ficam órfãs.
    pub fn delete(&self, tables: &mut Tables, id: Uuid) -> bool {
        tables.products.shift_remove(&id).is_some()
    }

    /// Soma `delta` ao saldo. Só as regras de estoque chamam isto.
    pub(crate) fn apply_stock_delta(
        &self,
        tables: &mut Tables,
        id: Uuid,
        delta: i32,
        now: DateTime<Utc>,
    ) -> Result<Product, AppError> {
        let product = tables.products.get_mut(&id).ok_or(AppError::ProductNotFound)?;
        product.stock = product
            .stock
            .checked_add(delta)
            .ok_or_else(|| anyhow::anyhow!("stock overflow on product {id}"))?;
        product.updated_at = now;
        Ok(product.clone())
    }
}
