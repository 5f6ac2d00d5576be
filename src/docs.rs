// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "Stock Tracker API", description = "Produtos, estoque, vendas e indicadores"),
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_metrics,
        handlers::dashboard::get_sales_report,

        // --- Products ---
        handlers::products::get_all_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::products::get_low_stock_products,

        // --- Sales ---
        handlers::sales::get_all_sales,
        handlers::sales::get_sale,
        handlers::sales::create_sale,

        // --- Stock Movements ---
        handlers::stock_movements::get_stock_movements,
        handlers::stock_movements::create_stock_movement,
    ),
    components(
        schemas(
            // --- DASHBOARD ---
            models::dashboard::DashboardMetrics,
            models::dashboard::LowStockItem,
            models::dashboard::CategorySalesEntry,
            models::dashboard::TopProductEntry,
            models::dashboard::MonthlySalesEntry,
            models::dashboard::SalesReport,

            // --- Products ---
            models::product::Product,
            models::product::StockStatus,
            models::product::StatusFilter,

            // --- Sales ---
            models::sales::Sale,
            models::sales::SaleWithProduct,

            // --- Inventory ---
            models::inventory::MovementType,
            models::inventory::StockMovement,

            // --- Payloads ---
            handlers::products::CreateProductPayload,
            handlers::products::UpdateProductPayload,
            handlers::sales::CreateSalePayload,
            handlers::stock_movements::CreateStockMovementPayload,
        )
    ),
    tags(
        (name = "Dashboard", description = "Indicadores do painel"),
        (name = "Reports", description = "Relatórios de vendas"),
        (name = "Products", description = "Catálogo de produtos e alertas de estoque baixo"),
        (name = "Sales", description = "Registro e consulta de vendas"),
        (name = "Stock Movements", description = "Entradas e saídas de estoque")
    )
)]
pub struct ApiDoc;
