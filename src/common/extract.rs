// src/common/extract.rs

use axum::{
    extract::{FromRequest, FromRequestParts, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
};

// Igual ao `Json` do axum, mas corpo malformado vira 400 no nosso formato de erro
// (o axum responderia 422 para campos ausentes ou de tipo errado).
pub struct AppJson<T>(pub T);

impl<T> FromRequest<AppState> for AppJson<T>
where
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();
        let locale = Locale::from_request_parts(&mut parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        let req = Request::from_parts(parts, body);

        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(AppError::InvalidBody(rejection.body_text())
                .to_api_error(&locale, &state.i18n_store)),
        }
    }
}
