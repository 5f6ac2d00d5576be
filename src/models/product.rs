// src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

// --- Produto (catálogo + saldo em mãos) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    #[schema(example = "Biltong Dry Wors")]
    pub name: String,
    #[schema(example = "BLT-001")]
    pub sku: String,
    pub description: Option<String>,
    #[schema(example = "Food & Beverages")]
    pub category: String,
    #[schema(value_type = String, example = "185.50")]
    pub price: Decimal,
    #[schema(example = 145)]
    pub stock: i32,
    #[schema(example = 20)]
    pub low_stock_threshold: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }

    pub fn status(&self) -> StockStatus {
        StockStatus::of(self.stock, self.low_stock_threshold)
    }

    /// Valor do estoque em mãos (`price * stock`), sem arredondamento.
    /// `None` se estourar o `Decimal`.
    pub fn stock_value(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.stock))
    }

    /// Cópia do produto com os campos do patch aplicados.
    /// O `stock` nunca vem do patch: só muda via movimentação.
    pub fn with_patch(&self, patch: &ProductPatch, now: DateTime<Utc>) -> Product {
        Product {
            id: self.id,
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            sku: patch.sku.clone().unwrap_or_else(|| self.sku.clone()),
            description: match &patch.description {
                Some(text) if text.is_empty() => None,
                Some(text) => Some(text.clone()),
                None => self.description.clone(),
            },
            category: patch.category.clone().unwrap_or_else(|| self.category.clone()),
            price: patch.price.unwrap_or(self.price),
            stock: self.stock,
            low_stock_threshold: patch.low_stock_threshold.unwrap_or(self.low_stock_threshold),
            created_at: self.created_at,
            updated_at: now,
        }
    }
}

// Dados de criação. `stock` e `low_stock_threshold` têm default no repositório.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub stock: Option<i32>,
    pub low_stock_threshold: Option<i32>,
}

// Atualização parcial: só os campos presentes são aplicados.
// Uma descrição vazia limpa o campo.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
    pub low_stock_threshold: Option<i32>,
}

// --- Classificação de saldo (derivada, nunca armazenada) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    pub fn of(stock: i32, low_stock_threshold: i32) -> Self {
        if stock == 0 {
            StockStatus::OutOfStock
        } else if stock <= low_stock_threshold {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// Estoque crítico: `stock <= threshold * 0.5`, em aritmética inteira.
pub fn is_critical(stock: i32, low_stock_threshold: i32) -> bool {
    i64::from(stock) * 2 <= i64::from(low_stock_threshold)
}

// Filtro da listagem de produtos (`?status=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    InStock,
    LowStock,
    OutOfStock,
    Critical,
}

impl std::str::FromStr for StatusFilter {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "in_stock" => Ok(StatusFilter::InStock),
            "low_stock" => Ok(StatusFilter::LowStock),
            "out_of_stock" => Ok(StatusFilter::OutOfStock),
            "critical" => Ok(StatusFilter::Critical),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<StatusFilter>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.category.is_none() && self.status.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let in_description = product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term));
            if !product.name.to_lowercase().contains(&term)
                && !product.sku.to_lowercase().contains(&term)
                && !in_description
            {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }

        match self.status {
            None => true,
            Some(StatusFilter::Critical) => is_critical(product.stock, product.low_stock_threshold),
            Some(StatusFilter::InStock) => product.status() == StockStatus::InStock,
            // "low_stock" segue o predicado de estoque baixo (inclui zerados)
            Some(StatusFilter::LowStock) => product.is_low_stock(),
            Some(StatusFilter::OutOfStock) => product.status() == StockStatus::OutOfStock,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(stock: i32, threshold: i32) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name: "Rooibos Tea Premium".into(),
            sku: "RBT-002".into(),
            description: Some("Organic rooibos from the Western Cape".into()),
            category: "Food & Beverages".into(),
            price: dec!(89.95),
            stock,
            low_stock_threshold: threshold,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn classifies_stock_levels() {
        assert_eq!(StockStatus::of(0, 10), StockStatus::OutOfStock);
        assert_eq!(StockStatus::of(10, 10), StockStatus::LowStock);
        assert_eq!(StockStatus::of(11, 10), StockStatus::InStock);
    }

    #[test]
    fn stock_value_reports_overflow() {
        assert_eq!(product(18, 25).stock_value(), Some(dec!(1619.10)));

        let huge = Product { price: Decimal::MAX, ..product(2, 25) };
        assert_eq!(huge.stock_value(), None);
    }

    #[test]
    fn critical_is_half_the_threshold() {
        assert!(is_critical(5, 10));
        assert!(!is_critical(6, 10));
        assert!(is_critical(2, 5));
        assert!(!is_critical(3, 5));
        assert!(is_critical(0, 0));
    }

    #[test]
    fn patch_keeps_stock_and_identity() {
        let original = product(18, 25);
        let later = original.updated_at + chrono::Duration::seconds(5);
        let patch = ProductPatch {
            name: Some("Rooibos Tea".into()),
            price: Some(dec!(79.95)),
            description: Some(String::new()),
            ..Default::default()
        };

        let updated = original.with_patch(&patch, later);

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.name, "Rooibos Tea");
        assert_eq!(updated.price, dec!(79.95));
        assert_eq!(updated.description, None);
        assert_eq!(updated.stock, 18);
        assert_eq!(updated.sku, "RBT-002");
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.updated_at, later);
        // o original não é tocado
        assert_eq!(original.name, "Rooibos Tea Premium");
    }

    #[test]
    fn filter_matches_search_category_and_status() {
        let p = product(3, 10);

        let by_search = ProductFilter { search: Some("western".into()), ..Default::default() };
        assert!(by_search.matches(&p));

        let by_sku = ProductFilter { search: Some("rbt".into()), ..Default::default() };
        assert!(by_sku.matches(&p));

        let wrong_category = ProductFilter { category: Some("Arts & Crafts".into()), ..Default::default() };
        assert!(!wrong_category.matches(&p));

        let critical = ProductFilter { status: Some(StatusFilter::Critical), ..Default::default() };
        assert!(critical.matches(&p));

        let in_stock = ProductFilter { status: Some(StatusFilter::InStock), ..Default::default() };
        assert!(!in_stock.matches(&p));
    }
}
