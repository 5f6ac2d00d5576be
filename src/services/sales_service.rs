// src/services/sales_service.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{SalesRepository, Store},
    models::sales::SaleWithProduct,
};

// Leituras de vendas. O registro de vendas mora nas regras de estoque (StockService).
#[derive(Debug, Clone)]
pub struct SalesService {
    store: Store,
    repo: SalesRepository,
}

impl SalesService {
    pub fn new(store: Store, repo: SalesRepository) -> Self {
        Self { store, repo }
    }

    pub fn list_sales(&self) -> Vec<SaleWithProduct> {
        let tables = self.store.read();
        self.repo.get_all_with_product(&tables)
    }

    pub fn get_sale(&self, id: Uuid) -> Result<SaleWithProduct, AppError> {
        let tables = self.store.read();
        let sale = self.repo.find_by_id(&tables, id).ok_or(AppError::SaleNotFound)?;
        Ok(self.repo.join_product(&tables, sale))
    }

    pub fn sales_by_date_range(
        &self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<SaleWithProduct>, AppError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(AppError::InvalidDateRange);
            }
        }
        let tables = self.store.read();
        Ok(self.repo.get_by_date_range(&tables, from, to))
    }
}
