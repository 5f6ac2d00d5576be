// src/handlers/validation.rs

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::common::error::AppError;

pub const MAX_PRICE_SCALE: u32 = 2;
pub const MAX_PRICE_UNITS: i64 = 1_000_000_000_000;

// ---
// Validação Customizada de valores monetários
// ---
pub fn validate_price(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("price_negative");
        err.add_param("min".into(), &0.0);
        return Err(err);
    }
    if *val > Decimal::from(MAX_PRICE_UNITS) {
        let mut err = ValidationError::new("price_max");
        err.add_param("max".into(), &MAX_PRICE_UNITS);
        return Err(err);
    }
    // "185.50" e "185.5" são aceitos; "185.505" não
    if val.normalize().scale() > MAX_PRICE_SCALE {
        let mut err = ValidationError::new("price_scale");
        err.add_param("max_scale".into(), &MAX_PRICE_SCALE);
        return Err(err);
    }
    Ok(())
}

/// Valida um preço opcional, acumulando o erro no campo dado.
pub fn check_optional_price(errors: &mut ValidationErrors, field: &'static str, val: Option<&Decimal>) {
    if let Some(val) = val {
        if let Err(e) = validate_price(val) {
            errors.add(field, e);
        }
    }
}

/// Junta o resultado do `validate()` derivado com as checagens manuais.
pub fn finish<F>(derived: Result<(), ValidationErrors>, manual: F) -> Result<(), AppError>
where
    F: FnOnce(&mut ValidationErrors),
{
    let mut errors = derived.err().unwrap_or_else(ValidationErrors::new);
    manual(&mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationError(errors))
    }
}

/// Erro de validação de um único campo (query strings).
pub fn field_error(field: &'static str, code: &'static str) -> AppError {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(code));
    AppError::ValidationError(errors)
}

/// Id vindo da URL. Um id malformado não pode existir, então vira 404.
pub fn parse_path_id(raw: &str, not_found: AppError) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn prices_must_be_non_negative_with_two_decimals() {
        assert!(validate_price(&dec!(185.50)).is_ok());
        assert!(validate_price(&dec!(185.500)).is_ok());
        assert!(validate_price(&Decimal::ZERO).is_ok());
        assert_eq!(validate_price(&dec!(-1)).unwrap_err().code, "price_negative");
        assert_eq!(validate_price(&dec!(0.105)).unwrap_err().code, "price_scale");
    }

    #[test]
    fn prices_have_an_upper_bound() {
        assert!(validate_price(&Decimal::from(MAX_PRICE_UNITS)).is_ok());
        assert_eq!(validate_price(&dec!(1000000000000.01)).unwrap_err().code, "price_max");
        assert_eq!(validate_price(&Decimal::MAX).unwrap_err().code, "price_max");
    }

    #[test]
    fn finish_keeps_manual_errors() {
        let result = finish(Ok(()), |errors| {
            check_optional_price(errors, "unitPrice", Some(&dec!(-3)));
            check_optional_price(errors, "totalPrice", None);
        });
        match result {
            Err(AppError::ValidationError(errors)) => {
                let fields = errors.field_errors();
                assert_eq!(fields.len(), 1);
                assert!(fields.contains_key("unitPrice"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
