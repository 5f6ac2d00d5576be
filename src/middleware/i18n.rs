// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::common::i18n::{DEFAULT_LANG, SUPPORTED_LANGS};

// Idioma da resposta, negociado pelo Accept-Language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl Locale {
    pub fn new(lang: &str) -> Self {
        Locale(lang.to_string())
    }

    pub fn lang(&self) -> &str {
        &self.0
    }

    /// Primeiro idioma suportado do cabeçalho, pela ordem de preferência.
    /// "pt-BR" -> "pt"
    pub fn negotiate(header_value: &str) -> Self {
        accept_language::parse(header_value)
            .iter()
            .map(|tag| tag.split('-').next().unwrap_or(tag).to_lowercase())
            .find(|lang| SUPPORTED_LANGS.contains(&lang.as_str()))
            .map(Locale)
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Locale::negotiate)
            .unwrap_or_default();

        Ok(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_supported_language() {
        assert_eq!(Locale::negotiate("pt-BR,pt;q=0.9,en;q=0.8").lang(), "pt");
        assert_eq!(Locale::negotiate("de-DE,en;q=0.5").lang(), "en");
        assert_eq!(Locale::negotiate("fr").lang(), "en");
        assert_eq!(Locale::negotiate("").lang(), "en");
    }
}
