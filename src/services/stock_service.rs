// src/services/stock_service.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProductRepository, SalesRepository, StockMovementRepository, Store, Tables},
    models::{
        inventory::{reasons, MovementType, NewStockMovement, StockMovement},
        product::Product,
        sales::{NewSale, Sale},
    },
};

// Regras de estoque: o único caminho que altera `Product::stock`.
// Toda alteração deixa uma movimentação, e saídas nunca deixam o saldo negativo.
#[derive(Debug, Clone)]
pub struct StockService {
    store: Store,
    products: ProductRepository,
    sales: SalesRepository,
    movements: StockMovementRepository,
}

impl StockService {
    pub fn new(
        store: Store,
        products: ProductRepository,
        sales: SalesRepository,
        movements: StockMovementRepository,
    ) -> Self {
        Self { store, products, sales, movements }
    }

    // --- LISTAGEM ---
    pub fn list_stock_movements(&self, product_id: Option<Uuid>) -> Vec<StockMovement> {
        let tables = self.store.read();
        self.movements.get_all(&tables, product_id)
    }

    // --- SELL (VENDA) ---
    pub fn record_sale(&self, new: NewSale) -> Result<Sale, AppError> {
        let mut tx = self.store.begin();
        let now = Utc::now();

        // 1. Produto existe?
        let product = self
            .products
            .find_by_id(&tx, new.product_id)
            .ok_or(AppError::ProductNotFound)?;

        // 2. Saldo suficiente?
        ensure_available(&product, new.quantity)?;

        // 3. Preço: unitário informado (desconto) ou o atual; total sempre calculado
        let unit_price = new.unit_price.unwrap_or(product.price);
        let total_price = unit_price
            .checked_mul(Decimal::from(new.quantity))
            .ok_or(AppError::AmountOutOfRange("totalPrice"))?;
        if let Some(received) = new.total_price {
            if received != total_price {
                return Err(AppError::PriceMismatch { expected: total_price, received });
            }
        }

        // 4. Baixa + histórico; só depois grava a venda, que não falha
        self.apply_movement(
            &mut tx,
            NewStockMovement {
                product_id: product.id,
                movement_type: MovementType::Out,
                quantity: new.quantity,
                reason: Some(reasons::SALE.to_string()),
            },
            now,
        )?;

        let sale = self
            .sales
            .create(&mut tx, product.id, new.quantity, unit_price, total_price, now);

        tracing::info!(
            sale_id = %sale.id,
            product_id = %product.id,
            quantity = sale.quantity,
            total = %sale.total_price,
            "Venda registrada"
        );
        Ok(sale)
    }

    // --- ENTRADA / SAÍDA MANUAL ---
    pub fn record_stock_movement(&self, new: NewStockMovement) -> Result<StockMovement, AppError> {
        let mut tx = self.store.begin();
        let (product, movement) = self.apply_movement(&mut tx, new, Utc::now())?;

        tracing::info!(
            movement_id = %movement.id,
            product_id = %product.id,
            movement_type = ?movement.movement_type,
            quantity = movement.quantity,
            stock = product.stock,
            "Movimentação de estoque registrada"
        );
        Ok(movement)
    }

    /// Aplica uma movimentação com as tabelas já travadas pelo chamador.
    /// Checa antes de mutar: em caso de erro nada foi alterado.
    pub(crate) fn apply_movement(
        &self,
        tx: &mut Tables,
        new: NewStockMovement,
        now: DateTime<Utc>,
    ) -> Result<(Product, StockMovement), AppError> {
        let product = self
            .products
            .find_by_id(tx, new.product_id)
            .ok_or(AppError::ProductNotFound)?;

        if new.movement_type == MovementType::Out {
            ensure_available(&product, new.quantity)?;
        }

        let delta = new.movement_type.signed(new.quantity);
        let product = self.products.apply_stock_delta(tx, product.id, delta, now)?;
        let movement = self.movements.record(
            tx,
            product.id,
            new.movement_type,
            new.quantity,
            new.reason,
            now,
        );

        Ok((product, movement))
    }
}

fn ensure_available(product: &Product, requested: i32) -> Result<(), AppError> {
    if product.stock < requested {
        tracing::warn!(
            product_id = %product.id,
            available = product.stock,
            requested,
            "Saída recusada: estoque insuficiente"
        );
        return Err(AppError::InsufficientStock { available: product.stock, requested });
    }
    Ok(())
}
