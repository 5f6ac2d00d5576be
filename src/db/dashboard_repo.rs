// src/db/dashboard_repo.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::Tables,
    models::dashboard::{
        CategorySalesEntry, DashboardMetrics, LowStockItem, MonthlySalesEntry, SalesReport,
        TopProductEntry,
    },
};

pub const WEEK_WINDOW_DAYS: i64 = 7;
pub const MONTH_WINDOW_DAYS: i64 = 30;
pub const YEAR_WINDOW_DAYS: i64 = 365;
pub const TOP_PRODUCTS_LIMIT: usize = 10;

// Agregações de leitura. Varreduras lineares sobre um snapshot das tabelas.
#[derive(Debug, Clone, Default)]
pub struct DashboardRepository;

impl DashboardRepository {
    pub fn new() -> Self {
        Self
    }

    /// Produtos com `stock <= low_stock_threshold`, do mais esgotado para o menos.
    pub fn get_low_stock_items(&self, tables: &Tables) -> Vec<LowStockItem> {
        let mut items: Vec<LowStockItem> = tables
            .products
            .values()
            .filter(|p| p.is_low_stock())
            .map(|p| LowStockItem {
                id: p.id,
                name: p.name.clone(),
                sku: p.sku.clone(),
                stock: p.stock,
                low_stock_threshold: p.low_stock_threshold,
            })
            .collect();
        items.sort_by_key(|item| item.stock);
        items
    }

    // Somas em Decimal; o arredondamento acontece uma vez, no final.
    pub fn get_metrics(&self, tables: &Tables, now: DateTime<Utc>) -> Result<DashboardMetrics, AppError> {
        let week_ago = now - Duration::days(WEEK_WINDOW_DAYS);
        let month_ago = now - Duration::days(MONTH_WINDOW_DAYS);
        let today = now.date_naive();

        let total_products = tables.products.len();
        let low_stock_items = tables.products.values().filter(|p| p.is_low_stock()).count();
        let out_of_stock_items = tables.products.values().filter(|p| p.stock == 0).count();

        let mut inventory_value = Decimal::ZERO;
        for product in tables.products.values() {
            let value = product
                .stock_value()
                .ok_or_else(|| overflow("inventory value"))?;
            add_amount(&mut inventory_value, value, "inventory value")?;
        }

        let mut total_sales = Decimal::ZERO;
        let mut today_sales = Decimal::ZERO;
        let mut week_sales = Decimal::ZERO;
        let mut month_sales = Decimal::ZERO;
        for sale in tables.sales.values() {
            add_amount(&mut total_sales, sale.total_price, "total sales")?;
            if sale.sale_date.date_naive() == today {
                add_amount(&mut today_sales, sale.total_price, "today sales")?;
            }
            if sale.sale_date >= week_ago {
                add_amount(&mut week_sales, sale.total_price, "week sales")?;
            }
            if sale.sale_date >= month_ago {
                add_amount(&mut month_sales, sale.total_price, "month sales")?;
            }
        }

        Ok(DashboardMetrics {
            total_products,
            low_stock_items,
            out_of_stock_items,
            total_sales: round_to_units(total_sales)?,
            today_sales: round_to_units(today_sales)?,
            inventory_value: round_to_units(inventory_value)?,
            week_sales: round_to_units(week_sales)?,
            month_sales: round_to_units(month_sales)?,
        })
    }

    /// Vendas agrupadas pela categoria atual do produto, maior total primeiro.
    pub fn get_sales_by_category(&self, tables: &Tables) -> Result<Vec<CategorySalesEntry>, AppError> {
        let mut groups: IndexMap<Option<String>, (Decimal, i64)> = IndexMap::new();
        for sale in tables.sales.values() {
            let category = tables.products.get(&sale.product_id).map(|p| p.category.clone());
            let (total, quantity) = groups.entry(category).or_insert((Decimal::ZERO, 0));
            add_amount(total, sale.total_price, "category sales")?;
            *quantity += i64::from(sale.quantity);
        }

        let mut entries: Vec<CategorySalesEntry> = groups
            .into_iter()
            .map(|(category, (total_sales, total_quantity))| CategorySalesEntry {
                category,
                total_sales,
                total_quantity,
            })
            .collect();
        // Estável: empates ficam na ordem da primeira venda
        entries.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
        Ok(entries)
    }

    /// Os produtos que mais venderam em valor (no máximo `TOP_PRODUCTS_LIMIT`).
    pub fn get_top_products(&self, tables: &Tables) -> Result<Vec<TopProductEntry>, AppError> {
        let mut groups: IndexMap<Uuid, (Decimal, i64)> = IndexMap::new();
        for sale in tables.sales.values() {
            let (total, quantity) = groups.entry(sale.product_id).or_insert((Decimal::ZERO, 0));
            add_amount(total, sale.total_price, "product sales")?;
            *quantity += i64::from(sale.quantity);
        }

        let mut ranked: Vec<(Uuid, Decimal, i64)> = groups
            .into_iter()
            .map(|(id, (total, quantity))| (id, total, quantity))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(TOP_PRODUCTS_LIMIT);

        Ok(ranked
            .into_iter()
            .map(|(product_id, total_sales, total_quantity)| {
                let product = tables.products.get(&product_id);
                TopProductEntry {
                    product_id,
                    name: product.map(|p| p.name.clone()),
                    sku: product.map(|p| p.sku.clone()),
                    total_sales,
                    total_quantity,
                }
            })
            .collect())
    }

    /// Total por mês ("YYYY-MM", UTC) das vendas dos últimos 365 dias, em ordem cronológica.
    pub fn get_monthly_sales(
        &self,
        tables: &Tables,
        now: DateTime<Utc>,
    ) -> Result<Vec<MonthlySalesEntry>, AppError> {
        let year_ago = now - Duration::days(YEAR_WINDOW_DAYS);

        let mut months: BTreeMap<String, Decimal> = BTreeMap::new();
        for sale in tables.sales.values().filter(|s| s.sale_date >= year_ago) {
            let total = months
                .entry(sale.sale_date.format("%Y-%m").to_string())
                .or_insert(Decimal::ZERO);
            add_amount(total, sale.total_price, "monthly sales")?;
        }

        Ok(months
            .into_iter()
            .map(|(month, total)| MonthlySalesEntry { month, total })
            .collect())
    }

    pub fn get_sales_report(&self, tables: &Tables, now: DateTime<Utc>) -> Result<SalesReport, AppError> {
        Ok(SalesReport {
            sales_by_category: self.get_sales_by_category(tables)?,
            top_products: self.get_top_products(tables)?,
            monthly_sales: self.get_monthly_sales(tables, now)?,
        })
    }
}

fn add_amount(total: &mut Decimal, value: Decimal, what: &str) -> Result<(), AppError> {
    *total = total.checked_add(value).ok_or_else(|| overflow(what))?;
    Ok(())
}

fn overflow(what: &str) -> AppError {
    anyhow::anyhow!("{what} out of range").into()
}

/// Arredonda para a unidade inteira mais próxima (meio para longe do zero).
pub fn round_to_units(value: Decimal) -> Result<i64, AppError> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| anyhow::anyhow!("metric out of range: {value}").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{product::Product, sales::Sale};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn insert_product(tables: &mut Tables, sku: &str, price: Decimal, stock: i32, threshold: i32) -> Product {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: sku.to_string(),
            sku: sku.to_string(),
            description: None,
            category: "Food & Beverages".into(),
            price,
            stock,
            low_stock_threshold: threshold,
            created_at: now,
            updated_at: now,
        };
        tables.products.insert(product.id, product.clone());
        product
    }

    fn insert_sale(tables: &mut Tables, total: Decimal, sale_date: DateTime<Utc>) {
        insert_sale_of(tables, Uuid::new_v4(), 1, total, sale_date);
    }

    fn insert_sale_of(
        tables: &mut Tables,
        product_id: Uuid,
        quantity: i32,
        total: Decimal,
        sale_date: DateTime<Utc>,
    ) {
        let sale = Sale {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            unit_price: total / Decimal::from(quantity),
            total_price: total,
            sale_date,
        };
        tables.sales.insert(sale.id, sale);
    }

    fn in_category(tables: &mut Tables, product: &Product, category: &str) {
        if let Some(p) = tables.products.get_mut(&product.id) {
            p.category = category.to_string();
        }
    }

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn low_stock_is_inclusive_and_sorted_by_stock() {
        let repo = DashboardRepository::new();
        let mut tables = Tables::default();
        insert_product(&mut tables, "AML-004", dec!(249.99), 8, 30);
        insert_product(&mut tables, "BLT-001", dec!(185.50), 145, 20);
        insert_product(&mut tables, "NDB-005", dec!(125.00), 20, 20);
        insert_product(&mut tables, "CTM-007", dec!(195.00), 3, 10);

        let skus: Vec<String> = repo.get_low_stock_items(&tables).into_iter().map(|i| i.sku).collect();
        assert_eq!(skus, vec!["CTM-007", "AML-004", "NDB-005"]);
    }

    #[test]
    fn ten_thousand_dimes_do_not_drift() {
        let repo = DashboardRepository::new();
        let mut tables = Tables::default();
        let now = Utc::now();
        for _ in 0..10_000 {
            insert_sale(&mut tables, dec!(0.10), now);
        }

        let metrics = repo.get_metrics(&tables, now).unwrap();
        assert_eq!(metrics.total_sales, 1000);
        assert_eq!(metrics.week_sales, 1000);
        assert_eq!(metrics.month_sales, 1000);
    }

    #[test]
    fn windows_are_trailing_from_now() {
        let repo = DashboardRepository::new();
        let mut tables = Tables::default();
        let now = Utc::now();
        insert_sale(&mut tables, dec!(556.50), now - Duration::days(1));
        insert_sale(&mut tables, dec!(100.00), now - Duration::days(7));
        insert_sale(&mut tables, dec!(179.90), now - Duration::days(8));
        insert_sale(&mut tables, dec!(1299.00), now - Duration::days(31));

        let metrics = repo.get_metrics(&tables, now).unwrap();
        // 556.50 + 100.00
        assert_eq!(metrics.week_sales, 657);
        // + 179.90 = 836.40
        assert_eq!(metrics.month_sales, 836);
        // + 1299.00 = 2135.40
        assert_eq!(metrics.total_sales, 2135);
    }

    #[test]
    fn inventory_value_and_counts() {
        let repo = DashboardRepository::new();
        let mut tables = Tables::default();
        insert_product(&mut tables, "RBT-002", dec!(89.95), 18, 25);
        insert_product(&mut tables, "PFS-006", dec!(45.50), 156, 50);

        let metrics = repo.get_metrics(&tables, Utc::now()).unwrap();
        assert_eq!(metrics.total_products, 2);
        assert_eq!(metrics.low_stock_items, 1);
        // 1619.10 + 7098.00 = 8717.10
        assert_eq!(metrics.inventory_value, 8717);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to_units(dec!(2.5)).unwrap(), 3);
        assert_eq!(round_to_units(dec!(2.49)).unwrap(), 2);
        assert_eq!(round_to_units(Decimal::ZERO).unwrap(), 0);
    }

    #[test]
    fn restocked_product_leaves_the_low_stock_set() {
        let repo = DashboardRepository::new();
        let mut tables = Tables::default();
        let jersey = insert_product(&mut tables, "X-1", dec!(10.00), 4, 5);

        assert_eq!(repo.get_low_stock_items(&tables).len(), 1);
        assert_eq!(repo.get_metrics(&tables, Utc::now()).unwrap().low_stock_items, 1);

        if let Some(p) = tables.products.get_mut(&jersey.id) {
            p.stock = 6;
        }

        assert!(repo.get_low_stock_items(&tables).is_empty());
        assert_eq!(repo.get_metrics(&tables, Utc::now()).unwrap().low_stock_items, 0);
    }

    #[test]
    fn today_and_out_of_stock_counts() {
        let repo = DashboardRepository::new();
        let mut tables = Tables::default();
        insert_product(&mut tables, "EMPTY", dec!(10.00), 0, 5);
        insert_product(&mut tables, "FULL", dec!(10.00), 50, 5);
        let now = noon(2024, 5, 15);
        insert_sale(&mut tables, dec!(100.40), Utc.with_ymd_and_hms(2024, 5, 15, 0, 30, 0).unwrap());
        insert_sale(&mut tables, dec!(50.00), Utc.with_ymd_and_hms(2024, 5, 14, 23, 30, 0).unwrap());

        let metrics = repo.get_metrics(&tables, now).unwrap();
        assert_eq!(metrics.out_of_stock_items, 1);
        assert_eq!(metrics.low_stock_items, 1);
        assert_eq!(metrics.today_sales, 100);
        assert_eq!(metrics.week_sales, 150);
    }

    #[test]
    fn oversized_inventory_value_is_an_error_not_a_panic() {
        let repo = DashboardRepository::new();
        let mut tables = Tables::default();
        insert_product(&mut tables, "BIG-1", Decimal::MAX, 2, 5);

        let result = repo.get_metrics(&tables, Utc::now());
        assert!(matches!(result, Err(AppError::InternalServerError(_))));
    }

    #[test]
    fn oversized_sales_sum_is_an_error_not_a_panic() {
        let repo = DashboardRepository::new();
        let mut tables = Tables::default();
        let now = Utc::now();
        insert_sale(&mut tables, Decimal::MAX, now);
        insert_sale(&mut tables, Decimal::MAX, now);

        assert!(matches!(repo.get_metrics(&tables, now), Err(AppError::InternalServerError(_))));
        assert!(matches!(repo.get_sales_report(&tables, now), Err(AppError::InternalServerError(_))));
    }

    #[test]
    fn sales_by_category_sums_totals_and_quantities() {
        let repo = DashboardRepository::new();
        let mut tables = Tables::default();
        let now = Utc::now();
        let biltong = insert_product(&mut tables, "BLT-001", dec!(185.50), 145, 20);
        let tea = insert_product(&mut tables, "RBT-002", dec!(89.95), 18, 25);
        let jersey = insert_product(&mut tables, "SBJ-003", dec!(1299.00), 67, 15);
        in_category(&mut tables, &jersey, "Clothing & Sports");

        insert_sale_of(&mut tables, biltong.id, 3, dec!(556.50), now);
        insert_sale_of(&mut tables, tea.id, 2, dec!(179.90), now);
        insert_sale_of(&mut tables, jersey.id, 1, dec!(1299.00), now);
        // produto removido
        insert_sale_of(&mut tables, Uuid::new_v4(), 1, dec!(5.00), now);

        let entries = repo.get_sales_by_category(&tables).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].category.as_deref(), Some("Clothing & Sports"));
        assert_eq!(entries[0].total_sales, dec!(1299.00));
        assert_eq!(entries[1].category.as_deref(), Some("Food & Beverages"));
        assert_eq!(entries[1].total_sales, dec!(736.40));
        assert_eq!(entries[1].total_quantity, 5);
        assert_eq!(entries[2].category, None);
    }

    #[test]
    fn top_products_are_ranked_and_capped() {
        let repo = DashboardRepository::new();
        let mut tables = Tables::default();
        let now = Utc::now();
        let products: Vec<Product> = (1..=12)
            .map(|n| insert_product(&mut tables, &format!("P-{n:02}"), dec!(1.00), 100, 5))
            .collect();
        for (n, product) in products.iter().enumerate() {
            let n = n as i32 + 1;
            insert_sale_of(&mut tables, product.id, n, Decimal::from(n), now);
        }
        // segunda venda do P-01 o coloca no topo
        insert_sale_of(&mut tables, products[0].id, 20, dec!(20.00), now);

        let top = repo.get_top_products(&tables).unwrap();
        assert_eq!(top.len(), TOP_PRODUCTS_LIMIT);
        assert_eq!(top[0].sku.as_deref(), Some("P-01"));
        assert_eq!(top[0].total_sales, dec!(21.00));
        assert_eq!(top[0].total_quantity, 21);
        assert_eq!(top[1].sku.as_deref(), Some("P-12"));
        assert!(top.iter().all(|entry| entry.sku.as_deref() != Some("P-02")));
    }

    #[test]
    fn monthly_sales_cover_the_last_year_in_order() {
        let repo = DashboardRepository::new();
        let mut tables = Tables::default();
        let now = noon(2024, 5, 15);
        insert_sale(&mut tables, dec!(10.00), noon(2024, 5, 1));
        insert_sale(&mut tables, dec!(20.10), noon(2024, 4, 10));
        insert_sale(&mut tables, dec!(0.90), noon(2024, 4, 11));
        insert_sale(&mut tables, dec!(7.00), noon(2023, 5, 20));
        // fora da janela de 365 dias
        insert_sale(&mut tables, dec!(99.00), noon(2023, 5, 1));

        let months = repo.get_monthly_sales(&tables, now).unwrap();
        let flat: Vec<(&str, Decimal)> = months.iter().map(|m| (m.month.as_str(), m.total)).collect();
        assert_eq!(
            flat,
            vec![("2023-05", dec!(7.00)), ("2024-04", dec!(21.00)), ("2024-05", dec!(10.00))]
        );
    }
}
