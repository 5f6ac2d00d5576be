// src/common/i18n.rs

use std::collections::HashMap;

pub const DEFAULT_LANG: &str = "en";
pub const SUPPORTED_LANGS: &[&str] = &["en", "pt"];

const EN: &[(&str, &str)] = &[
    ("error.validation", "One or more fields are invalid."),
    ("error.invalid_body", "Invalid request body."),
    ("error.sku_exists", "SKU already exists: {sku}."),
    ("error.product_not_found", "Product not found."),
    ("error.sale_not_found", "Sale not found."),
    (
        "error.insufficient_stock",
        "Insufficient stock: {available} available, {requested} requested.",
    ),
    (
        "error.price_mismatch",
        "Total price {received} does not match unit price times quantity ({expected}).",
    ),
    ("error.invalid_date_range", "The start of the date range must not be after its end."),
    ("error.amount_out_of_range", "The resulting amount is too large."),
    ("error.internal", "An unexpected error occurred."),
    ("validation.name_length", "Name must have between 1 and 200 characters."),
    ("validation.sku_length", "SKU must have between 1 and 50 characters."),
    ("validation.category_required", "Category is required."),
    ("validation.description_length", "Description must have at most 2000 characters."),
    ("validation.price_negative", "The value cannot be negative."),
    ("validation.price_scale", "The value must have at most 2 decimal places."),
    ("validation.price_max", "The value must be at most 1000000000000."),
    ("validation.stock_min", "Stock cannot be negative."),
    ("validation.threshold_min", "Low stock threshold cannot be negative."),
    ("validation.quantity_min", "Quantity must be at least 1."),
    ("validation.reason_length", "Reason must have at most 200 characters."),
    ("validation.invalid_id", "Not a valid identifier."),
    ("validation.invalid_status", "Use in_stock, low_stock, out_of_stock or critical."),
    ("validation.invalid_timestamp", "Expected an RFC 3339 timestamp."),
];

const PT: &[(&str, &str)] = &[
    ("error.validation", "Um ou mais campos são inválidos."),
    ("error.invalid_body", "Corpo da requisição inválido."),
    ("error.sku_exists", "O SKU {sku} já está em uso."),
    ("error.product_not_found", "Produto não encontrado."),
    ("error.sale_not_found", "Venda não encontrada."),
    (
        "error.insufficient_stock",
        "Estoque insuficiente: {available} disponível, {requested} solicitado.",
    ),
    (
        "error.price_mismatch",
        "O total {received} não confere com preço unitário vezes quantidade ({expected}).",
    ),
    ("error.invalid_date_range", "O início do intervalo não pode ser depois do fim."),
    ("error.amount_out_of_range", "O valor resultante é grande demais."),
    ("error.internal", "Ocorreu um erro inesperado."),
    ("validation.name_length", "O nome deve ter entre 1 e 200 caracteres."),
    ("validation.sku_length", "O SKU deve ter entre 1 e 50 caracteres."),
    ("validation.category_required", "A categoria é obrigatória."),
    ("validation.description_length", "A descrição deve ter no máximo 2000 caracteres."),
    ("validation.price_negative", "O valor não pode ser negativo."),
    ("validation.price_scale", "O valor deve ter no máximo 2 casas decimais."),
    ("validation.price_max", "O valor deve ser no máximo 1000000000000."),
    ("validation.stock_min", "O estoque não pode ser negativo."),
    ("validation.threshold_min", "O limite de estoque baixo não pode ser negativo."),
    ("validation.quantity_min", "A quantidade deve ser no mínimo 1."),
    ("validation.reason_length", "O motivo deve ter no máximo 200 caracteres."),
    ("validation.invalid_id", "Identificador inválido."),
    ("validation.invalid_status", "Use in_stock, low_stock, out_of_stock ou critical."),
    ("validation.invalid_timestamp", "Esperada uma data no formato RFC 3339."),
];

// Catálogo de mensagens por idioma. Chave ausente cai no inglês e depois na própria chave.
#[derive(Debug, Clone)]
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

impl I18nStore {
    pub fn new() -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert("en", EN.iter().copied().collect());
        catalogs.insert("pt", PT.iter().copied().collect());
        Self { catalogs }
    }

    pub fn lookup(&self, lang: &str, key: &str) -> Option<&'static str> {
        self.catalogs
            .get(lang)
            .and_then(|catalog| catalog.get(key))
            .or_else(|| self.catalogs.get(DEFAULT_LANG).and_then(|c| c.get(key)))
            .copied()
    }

    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.lookup(lang, key).unwrap_or(key).to_string()
    }

    /// Como `translate`, substituindo `{nome}` pelos valores dados.
    pub fn translate_with(&self, lang: &str, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.translate(lang, key), |message, (name, value)| {
            message.replace(&format!("{{{name}}}"), value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_have_the_same_keys() {
        let store = I18nStore::new();
        let en = &store.catalogs["en"];
        let pt = &store.catalogs["pt"];
        for key in en.keys() {
            assert!(pt.contains_key(key), "missing pt translation for {key}");
        }
        assert_eq!(en.len(), pt.len());
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let store = I18nStore::new();
        assert_eq!(store.translate("de", "error.product_not_found"), "Product not found.");
        assert_eq!(store.translate("en", "error.nope"), "error.nope");
    }

    #[test]
    fn substitutes_placeholders() {
        let store = I18nStore::new();
        let message = store.translate_with("en", "error.sku_exists", &[("sku", "X-1")]);
        assert_eq!(message, "SKU already exists: X-1.");
    }
}
