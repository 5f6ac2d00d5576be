// src/config.rs

use std::env;

use anyhow::Context;

use crate::{
    common::i18n::I18nStore,
    db::{seed, DashboardRepository, ProductRepository, SalesRepository, StockMovementRepository, Store},
    services::{
        dashboard_service::DashboardService, product_service::ProductService,
        sales_service::SalesService, stock_service::StockService,
    },
};

// Configuração lida do ambiente (e do .env, se existir).
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub seed_demo_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            seed_demo_data: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Settings::default();

        let host = env::var("APP_HOST").unwrap_or(defaults.host);

        let port = match env::var("APP_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("APP_PORT inválida: {raw}"))?,
            Err(_) => defaults.port,
        };

        let seed_demo_data = match env::var("SEED_DEMO_DATA") {
            Ok(raw) => parse_bool(&raw).with_context(|| format!("SEED_DEMO_DATA inválida: {raw}"))?,
            Err(_) => defaults.seed_demo_data,
        };

        Ok(Self { host, port, seed_demo_data })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("esperado true/false, recebido '{other}'"),
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub product_service: ProductService,
    pub sales_service: SalesService,
    pub stock_service: StockService,
    pub dashboard_service: DashboardService,
    pub i18n_store: I18nStore,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        let store = Store::new();
        if settings.seed_demo_data {
            seed::seed_demo_data(&store);
        }

        // --- Monta o gráfico de dependências ---
        let stock_service = StockService::new(
            store.clone(),
            ProductRepository::new(),
            SalesRepository::new(),
            StockMovementRepository::new(),
        );
        let product_service =
            ProductService::new(store.clone(), ProductRepository::new(), stock_service.clone());
        let sales_service = SalesService::new(store.clone(), SalesRepository::new());
        let dashboard_service = DashboardService::new(store.clone(), DashboardRepository::new());

        Self {
            store,
            product_service,
            sales_service,
            stock_service,
            dashboard_service,
            i18n_store: I18nStore::new(),
        }
    }
}
