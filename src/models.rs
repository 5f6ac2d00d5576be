pub mod dashboard;
pub mod inventory;
pub mod product;
pub mod sales;
