// src/services/product_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProductRepository, Store},
    models::{
        inventory::{reasons, MovementType, NewStockMovement},
        product::{NewProduct, Product, ProductFilter, ProductPatch},
    },
    services::stock_service::StockService,
};

#[derive(Debug, Clone)]
pub struct ProductService {
    store: Store,
    repo: ProductRepository,
    stock: StockService,
}

impl ProductService {
    pub fn new(store: Store, repo: ProductRepository, stock: StockService) -> Self {
        Self { store, repo, stock }
    }

    // --- LEITURA ---
    pub fn list_products(&self, filter: &ProductFilter) -> Vec<Product> {
        let tables = self.store.read();
        let products = self.repo.get_all(&tables);
        if filter.is_empty() {
            return products;
        }
        products.into_iter().filter(|p| filter.matches(p)).collect()
    }

    pub fn get_product(&self, id: Uuid) -> Result<Product, AppError> {
        let tables = self.store.read();
        self.repo.find_by_id(&tables, id).ok_or(AppError::ProductNotFound)
    }

    pub fn get_product_by_sku(&self, sku: &str) -> Option<Product> {
        let tables = self.store.read();
        self.repo.find_by_sku(&tables, sku)
    }

    // --- CREATE PRODUCT ---
    pub fn create_product(&self, new: NewProduct) -> Result<Product, AppError> {
        let mut tx = self.store.begin();
        let now = Utc::now();

        if self.repo.find_by_sku(&tx, &new.sku).is_some() {
            return Err(AppError::SkuAlreadyExists(new.sku));
        }

        // O saldo inicial entra como movimentação, para ficar no histórico
        let initial_stock = new.stock.unwrap_or(0);
        let product = self.repo.create(&mut tx, NewProduct { stock: Some(0), ..new }, now);

        let product = if initial_stock > 0 {
            let (product, _) = self.stock.apply_movement(
                &mut tx,
                NewStockMovement {
                    product_id: product.id,
                    movement_type: MovementType::In,
                    quantity: initial_stock,
                    reason: Some(reasons::INITIAL_STOCK.to_string()),
                },
                now,
            )?;
            product
        } else {
            product
        };

        tracing::info!(product_id = %product.id, sku = %product.sku, "Produto criado");
        Ok(product)
    }

    // --- UPDATE PRODUCT ---
    /// Atualização parcial. Um `stock` diferente do atual vira movimentação de ajuste.
    pub fn update_product(
        &self,
        id: Uuid,
        patch: ProductPatch,
        stock: Option<i32>,
    ) -> Result<Product, AppError> {
        let mut tx = self.store.begin();
        let now = Utc::now();

        // 1. Checagens (nada é alterado antes delas)
        let current = self.repo.find_by_id(&tx, id).ok_or(AppError::ProductNotFound)?;

        if let Some(sku) = &patch.sku {
            if let Some(other) = self.repo.find_by_sku(&tx, sku) {
                if other.id != id {
                    return Err(AppError::SkuAlreadyExists(sku.clone()));
                }
            }
        }

        // 2. Ajuste de saldo pelas regras de estoque
        if let Some(target) = stock {
            let delta = target - current.stock;
            if delta != 0 {
                let movement_type = if delta > 0 { MovementType::In } else { MovementType::Out };
                self.stock.apply_movement(
                    &mut tx,
                    NewStockMovement {
                        product_id: id,
                        movement_type,
                        quantity: delta.abs(),
                        reason: Some(reasons::ADJUSTMENT.to_string()),
                    },
                    now,
                )?;
            }
        }

        // 3. Demais campos
        let updated = self.repo.update(&mut tx, id, &patch, now)?;

        tracing::info!(product_id = %id, "Produto atualizado");
        Ok(updated)
    }

    // --- DELETE PRODUCT ---
    pub fn delete_product(&self, id: Uuid) -> bool {
        let mut tx = self.store.begin();
        let deleted = self.repo.delete(&mut tx, id);
        if deleted {
            tracing::info!(product_id = %id, "Produto removido");
        }
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{SalesRepository, StockMovementRepository};
    use crate::models::product::StatusFilter;
    use rust_decimal_macros::dec;

    fn services() -> (ProductService, StockService) {
        let store = Store::new();
        let stock = StockService::new(
            store.clone(),
            ProductRepository::new(),
            SalesRepository::new(),
            StockMovementRepository::new(),
        );
        (ProductService::new(store, ProductRepository::new(), stock.clone()), stock)
    }

    fn new_product(sku: &str, stock: Option<i32>) -> NewProduct {
        NewProduct {
            name: "Boerewors Spice Mix".into(),
            sku: sku.into(),
            description: Some("Traditional sausage spice mix - 100g".into()),
            category: "Food & Beverages".into(),
            price: dec!(35.75),
            stock,
            low_stock_threshold: Some(25),
        }
    }

    #[test]
    fn sku_lookup_after_create() {
        let (products, _) = services();
        let created = products.create_product(new_product("BSM-008", None)).unwrap();

        let found = products.get_product_by_sku("BSM-008").unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.sku, "BSM-008");
    }

    #[test]
    fn duplicate_sku_is_rejected() {
        let (products, _) = services();
        products.create_product(new_product("BSM-008", None)).unwrap();

        let result = products.create_product(new_product("BSM-008", None));
        assert!(matches!(result, Err(AppError::SkuAlreadyExists(sku)) if sku == "BSM-008"));
        assert_eq!(products.list_products(&ProductFilter::default()).len(), 1);
    }

    #[test]
    fn initial_stock_is_recorded_as_movement() {
        let (products, stock) = services();
        let created = products.create_product(new_product("BSM-008", Some(89))).unwrap();

        assert_eq!(created.stock, 89);
        let movements = stock.list_stock_movements(Some(created.id));
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].movement_type, MovementType::In);
        assert_eq!(movements[0].quantity, 89);
        assert_eq!(movements[0].reason.as_deref(), Some(reasons::INITIAL_STOCK));
    }

    #[test]
    fn update_to_taken_sku_is_rejected_but_own_sku_is_fine() {
        let (products, _) = services();
        let first = products.create_product(new_product("A-1", None)).unwrap();
        products.create_product(new_product("B-2", None)).unwrap();

        let taken = ProductPatch { sku: Some("B-2".into()), ..Default::default() };
        assert!(matches!(
            products.update_product(first.id, taken, None),
            Err(AppError::SkuAlreadyExists(_))
        ));

        let same = ProductPatch { sku: Some("A-1".into()), name: Some("Renamed".into()), ..Default::default() };
        let updated = products.update_product(first.id, same, None).unwrap();
        assert_eq!(updated.name, "Renamed");
    }

    #[test]
    fn stock_edit_through_update_is_audited() {
        let (products, stock) = services();
        let created = products.create_product(new_product("X-1", Some(10))).unwrap();

        let updated = products
            .update_product(created.id, ProductPatch::default(), Some(4))
            .unwrap();

        assert_eq!(updated.stock, 4);
        let movements = stock.list_stock_movements(Some(created.id));
        assert_eq!(movements.len(), 2);
        assert_eq!(movements[0].movement_type, MovementType::Out);
        assert_eq!(movements[0].quantity, 6);
        assert_eq!(movements[0].reason.as_deref(), Some(reasons::ADJUSTMENT));
    }

    #[test]
    fn update_missing_product_is_not_found() {
        let (products, _) = services();
        let result = products.update_product(Uuid::new_v4(), ProductPatch::default(), Some(3));
        assert!(matches!(result, Err(AppError::ProductNotFound)));
    }

    #[test]
    fn delete_is_idempotent() {
        let (products, _) = services();
        let created = products.create_product(new_product("X-1", None)).unwrap();

        assert!(products.delete_product(created.id));
        assert!(!products.delete_product(created.id));
        assert!(matches!(products.get_product(created.id), Err(AppError::ProductNotFound)));
    }

    #[test]
    fn list_applies_status_filter() {
        let (products, _) = services();
        products.create_product(new_product("LOW", Some(5))).unwrap();
        products.create_product(new_product("OK", Some(100))).unwrap();
        products.create_product(new_product("ZERO", None)).unwrap();

        let filter = ProductFilter { status: Some(StatusFilter::OutOfStock), ..Default::default() };
        let skus: Vec<String> = products.list_products(&filter).into_iter().map(|p| p.sku).collect();
        assert_eq!(skus, vec!["ZERO"]);

        let filter = ProductFilter { status: Some(StatusFilter::LowStock), ..Default::default() };
        assert_eq!(products.list_products(&filter).len(), 2);
    }
}
