// src/db/sales_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    db::store::{newest_first, Tables},
    models::sales::{Sale, SaleWithProduct},
};

#[derive(Debug, Clone, Default)]
pub struct SalesRepository;

impl SalesRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn find_by_id(&self, tables: &Tables, id: Uuid) -> Option<Sale> {
        tables.sales.get(&id).cloned()
    }

    /// Junta a venda com o produto atual. Produto removido vira `None`.
    pub fn join_product(&self, tables: &Tables, sale: Sale) -> SaleWithProduct {
        let product = tables.products.get(&sale.product_id).cloned();
        SaleWithProduct { sale, product }
    }

    /// Todas as vendas, mais recentes primeiro, já com o produto.
    pub fn get_all_with_product(&self, tables: &Tables) -> Vec<SaleWithProduct> {
        self.get_by_date_range(tables, None, None)
    }

    /// Vendas com `sale_date` em `[from, to]` (limites opcionais e inclusivos).
    pub fn get_by_date_range(
        &self,
        tables: &Tables,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Vec<SaleWithProduct> {
        let in_range = tables.sales.values().filter(|s| {
            from.is_none_or(|from| s.sale_date >= from) && to.is_none_or(|to| s.sale_date <= to)
        });

        newest_first(in_range, |s| s.sale_date)
            .into_iter()
            .map(|sale| self.join_product(tables, sale))
            .collect()
    }

    pub fn create(
        &self,
        tables: &mut Tables,
        product_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
        total_price: Decimal,
        now: DateTime<Utc>,
    ) -> Sale {
        let sale = Sale {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            unit_price,
            total_price,
            sale_date: now,
        };
        tables.sales.insert(sale.id, sale.clone());
        sale
    }

    /// Grava uma venda já datada, sem tocar no estoque (carga de dados históricos).
    pub(crate) fn insert_historical(&self, tables: &mut Tables, sale: Sale) {
        tables.sales.insert(sale.id, sale);
    }
}
