pub mod dashboard;
pub mod products;
pub mod sales;
pub mod stock_movements;
pub mod validation;
