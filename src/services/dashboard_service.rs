// src/services/dashboard_service.rs

use chrono::{DateTime, Utc};

use crate::{
    common::error::AppError,
    db::{DashboardRepository, Store},
    models::dashboard::{DashboardMetrics, LowStockItem, SalesReport},
};

#[derive(Debug, Clone)]
pub struct DashboardService {
    store: Store,
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(store: Store, repo: DashboardRepository) -> Self {
        Self { store, repo }
    }

    pub fn get_metrics(&self) -> Result<DashboardMetrics, AppError> {
        self.get_metrics_at(Utc::now())
    }

    /// Métricas com as janelas de 7 e 30 dias contadas a partir de `now`.
    pub fn get_metrics_at(&self, now: DateTime<Utc>) -> Result<DashboardMetrics, AppError> {
        let tables = self.store.read();
        self.repo.get_metrics(&tables, now)
    }

    pub fn get_sales_report(&self) -> Result<SalesReport, AppError> {
        self.get_sales_report_at(Utc::now())
    }

    pub fn get_sales_report_at(&self, now: DateTime<Utc>) -> Result<SalesReport, AppError> {
        let tables = self.store.read();
        self.repo.get_sales_report(&tables, now)
    }

    pub fn get_low_stock_items(&self) -> Vec<LowStockItem> {
        let tables = self.store.read();
        self.repo.get_low_stock_items(&tables)
    }
}
