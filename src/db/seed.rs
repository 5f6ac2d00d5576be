// src/db/seed.rs

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    db::{ProductRepository, SalesRepository, Store},
    models::{product::NewProduct, sales::Sale},
};

// (nome, sku, descrição, categoria, preço em centavos, estoque, limite)
const DEMO_PRODUCTS: &[(&str, &str, &str, &str, i64, i32, i32)] = &[
    ("Biltong Dry Wors", "BLT-001", "Traditional South African beef jerky - 500g pack", "Food & Beverages", 18550, 145, 20),
    ("Rooibos Tea Premium", "RBT-002", "Premium organic Rooibos tea from the Western Cape - 100 bags", "Food & Beverages", 8995, 18, 25),
    ("Springbok Rugby Jersey", "SBJ-003", "Official Springboks rugby jersey - 2023 World Cup edition", "Clothing & Sports", 129900, 67, 15),
    ("Amarula Cream Liqueur", "AML-004", "Premium South African cream liqueur - 750ml", "Food & Beverages", 24999, 8, 30),
    ("Ndebele Beadwork Bracelet", "NDB-005", "Handcrafted traditional Ndebele beadwork bracelet", "Arts & Crafts", 12500, 24, 20),
    ("Protea Flower Seeds", "PFS-006", "King Protea flower seeds - South Africa's national flower", "Garden & Plants", 4550, 156, 50),
    ("Cape Town Table Mountain Print", "CTM-007", "Framed photographic print of Table Mountain - A3 size", "Arts & Crafts", 19500, 3, 10),
    ("Boerewors Spice Mix", "BSM-008", "Traditional South African sausage spice mix - 100g", "Food & Beverages", 3575, 89, 25),
];

// (índice do produto, quantidade, dias atrás)
const DEMO_SALES: &[(usize, i32, i64)] = &[(0, 3, 1), (1, 2, 2), (2, 1, 3)];

/// Carrega o catálogo de demonstração e algumas vendas históricas.
/// O saldo dos produtos já reflete essas vendas, então elas não movimentam estoque.
pub fn seed_demo_data(store: &Store) {
    let products_repo = ProductRepository::new();
    let sales_repo = SalesRepository::new();
    let now = Utc::now();

    let mut tx = store.begin();

    let products: Vec<_> = DEMO_PRODUCTS
        .iter()
        .map(|&(name, sku, description, category, cents, stock, threshold)| {
            products_repo.create(
                &mut tx,
                NewProduct {
                    name: name.to_string(),
                    sku: sku.to_string(),
                    description: Some(description.to_string()),
                    category: category.to_string(),
                    price: Decimal::new(cents, 2),
                    stock: Some(stock),
                    low_stock_threshold: Some(threshold),
                },
                now,
            )
        })
        .collect();

    for &(index, quantity, days_ago) in DEMO_SALES {
        let product = &products[index];
        sales_repo.insert_historical(
            &mut tx,
            Sale {
                id: Uuid::new_v4(),
                product_id: product.id,
                quantity,
                unit_price: product.price,
                total_price: product.price * Decimal::from(quantity),
                sale_date: now - Duration::days(days_ago),
            },
        );
    }

    tracing::info!(
        products = products.len(),
        sales = DEMO_SALES.len(),
        "Dados de demonstração carregados"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DashboardRepository;

    #[test]
    fn seeds_catalogue_and_history() {
        let store = Store::new();
        seed_demo_data(&store);

        let tables = store.read();
        assert_eq!(tables.products.len(), 8);
        assert_eq!(tables.sales.len(), 3);
        assert!(tables.stock_movements.is_empty());

        // 556.50 + 179.90 + 1299.00
        let metrics = DashboardRepository::new().get_metrics(&tables, Utc::now()).unwrap();
        assert_eq!(metrics.total_sales, 2035);
        assert_eq!(metrics.week_sales, 2035);
        // AML-004, CTM-007, RBT-002
        assert_eq!(metrics.low_stock_items, 3);
    }
}
