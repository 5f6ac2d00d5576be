pub mod store;
pub use store::{Store, Tables};
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod sales_repo;
pub use sales_repo::SalesRepository;
pub mod stock_repo;
pub use stock_repo::StockMovementRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod seed;
