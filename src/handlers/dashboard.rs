// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::dashboard::{DashboardMetrics, SalesReport},
};

// GET /api/dashboard/metrics
#[utoipa::path(
    get,
    path = "/api/dashboard/metrics",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Totais do painel (valores arredondados para unidades inteiras)", body = DashboardMetrics),
        (status = 500, description = "Erro interno")
    )
)]
pub async fn get_metrics(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let metrics = app_state
        .dashboard_service
        .get_metrics()
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(metrics)))
}

// GET /api/reports
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Reports",
    responses(
        (status = 200, description = "Vendas por categoria, top 10 produtos e totais mensais dos últimos 12 meses", body = SalesReport),
        (status = 500, description = "Erro interno")
    )
)]
pub async fn get_sales_report(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state
        .dashboard_service
        .get_sales_report()
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(report)))
}
