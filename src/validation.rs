//! Storage-independent input checks shared by the request types in `dto`.

use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub fn require_non_blank(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(())
}

pub fn require_digits(field: &str, value: &str, len: usize) -> AppResult<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    if value.len() != len || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(format!(
            "{field} must be exactly {len} digits"
        )));
    }
    Ok(())
}

pub fn require_positive_quantity(quantity: i32) -> AppResult<()> {
    if quantity <= 0 {
        return Err(AppError::validation("quantity must be greater than 0"));
    }
    Ok(())
}

/// Parses a path identifier, reporting a malformed one as a validation failure.
pub fn parse_id(what: &str, raw: &str) -> AppResult<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::validation(format!("{what} Id is required")));
    }
    Uuid::parse_str(raw).map_err(|_| AppError::validation(format!("Invalid {what} Id")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_are_rejected() {
        assert!(require_non_blank("name", "  ").is_err());
        assert!(require_non_blank("name", "Acme").is_ok());
    }

    #[test]
    fn digits_must_match_length_exactly() {
        assert!(require_digits("phone_number", "9876543210", 10).is_ok());
        assert!(require_digits("phone_number", "987654321", 10).is_err());
        assert!(require_digits("phone_number", "98765432a0", 10).is_err());
        assert!(require_digits("pincode", "560001", 6).is_ok());
        assert!(require_digits("pincode", "", 6).is_err());
    }

    #[test]
    fn quantity_must_be_positive() {
        assert!(require_positive_quantity(1).is_ok());
        assert!(require_positive_quantity(0).is_err());
        assert!(require_positive_quantity(-3).is_err());
    }

    #[test]
    fn malformed_ids_are_validation_errors() {
        let err = parse_id("Product", "not-a-uuid").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Invalid Product Id"));

        let err = parse_id("Order", "").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Order Id is required"));

        let id = Uuid::new_v4();
        assert_eq!(parse_id("Product", &id.to_string()).unwrap(), id);
    }
}
