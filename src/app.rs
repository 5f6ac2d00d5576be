// src/app.rs

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

/// O router completo, usado pelo binário e pelos testes.
pub fn router(app_state: AppState) -> Router {
    let product_routes = Router::new()
        .route("/"
               ,get(handlers::products::get_all_products)
               .post(handlers::products::create_product)
        )
        .route("/low-stock"
               ,get(handlers::products::get_low_stock_products)
        )
        .route("/{id}"
               ,get(handlers::products::get_product)
               .put(handlers::products::update_product)
               .delete(handlers::products::delete_product)
        );

    let sales_routes = Router::new()
        .route("/"
               ,get(handlers::sales::get_all_sales)
               .post(handlers::sales::create_sale)
        )
        .route("/{id}"
               ,get(handlers::sales::get_sale)
        );

    let stock_routes = Router::new()
        .route("/"
               ,get(handlers::stock_movements::get_stock_movements)
               .post(handlers::stock_movements::create_stock_movement)
        );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/dashboard/metrics", get(handlers::dashboard::get_metrics))
        .route("/api/reports", get(handlers::dashboard::get_sales_report))
        .nest("/api/products", product_routes)
        .nest("/api/sales", sales_routes)
        .nest("/api/stock-movements", stock_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
