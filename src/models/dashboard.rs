// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// 1. Cards do topo. Valores monetários já arredondados para unidades inteiras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_products: usize,
    pub low_stock_items: usize,
    pub out_of_stock_items: usize,
    pub total_sales: i64,
    pub today_sales: i64,
    pub inventory_value: i64,
    pub week_sales: i64,
    pub month_sales: i64,
}

// 2. Alerta de estoque baixo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub stock: i32,
    pub low_stock_threshold: i32,
}

// 3. Vendas por categoria. `category` é null para vendas de produtos removidos.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySalesEntry {
    pub category: Option<String>,
    #[schema(value_type = String, example = "736.40")]
    pub total_sales: Decimal,
    pub total_quantity: i64,
}

// 4. Top produtos (em valor vendido)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProductEntry {
    pub product_id: Uuid,
    pub name: Option<String>,
    pub sku: Option<String>,
    #[schema(value_type = String, example = "1299.00")]
    pub total_sales: Decimal,
    pub total_quantity: i64,
}

// 5. Gráfico mensal (últimos 12 meses)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySalesEntry {
    #[schema(example = "2024-05")]
    pub month: String,
    #[schema(value_type = String, example = "2035.40")]
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub sales_by_category: Vec<CategorySalesEntry>,
    pub top_products: Vec<TopProductEntry>,
    pub monthly_sales: Vec<MonthlySalesEntry>,
}
