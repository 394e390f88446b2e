//! # Validation Module
//!
//! Input validation for request payloads. Validation runs before business
//! logic, so a failure here never has side effects.
//!
//! ## Validation Layers
//! ```text
//! Layer 1: axum handlers       - type validation (deserialization)
//! Layer 2: THIS MODULE         - business rule validation
//! Layer 3: SQLite              - NOT NULL / UNIQUE / FK constraints
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a buyer name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 100 characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_buyer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("buyerName"));
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "buyerName".to_string(),
            max: 100,
        });
    }

    Ok(name.to_string())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("product_name"));
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "product_name".to_string(),
            max: 200,
        });
    }

    Ok(name.to_string())
}

/// Validates a line-item quantity: must be a positive integer.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::not_positive("quantity", quantity));
    }
    Ok(())
}

/// Validates the line items of a sale request. The list must be non-empty and
/// every item must pass name and quantity validation.
///
/// Called before the transaction opens, so a bad last item means zero rows
/// are written.
pub fn validate_line_items<'a, I>(items: I) -> ValidationResult<()>
where
    I: IntoIterator<Item = (&'a str, i64)>,
{
    let mut any = false;
    for (product_name, quantity) in items {
        any = true;
        validate_product_name(product_name)?;
        validate_quantity(quantity)?;
    }

    if !any {
        return Err(ValidationError::EmptyList {
            field: "itemsBought".to_string(),
        });
    }

    Ok(())
}

/// Validates a todo title.
pub fn validate_todo_title(title: &str) -> ValidationResult<String> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::required("title"));
    }

    Ok(title.to_string())
}

/// Validates a supplier company name.
pub fn validate_company_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("companyName"));
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_buyer_name() {
        assert_eq!(validate_buyer_name("  Ana Lopez ").unwrap(), "Ana Lopez");
        assert!(validate_buyer_name("").is_err());
        assert!(validate_buyer_name("   ").is_err());
        assert!(validate_buyer_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(250).is_ok());
        assert_eq!(
            validate_quantity(0),
            Err(ValidationError::not_positive("quantity", 0))
        );
        assert!(validate_quantity(-5).is_err());
    }

    #[test]
    fn test_validate_line_items() {
        assert!(validate_line_items([("Pen", 3), ("Notebook", 1)]).is_ok());
        assert_eq!(
            validate_line_items(std::iter::empty::<(&str, i64)>()),
            Err(ValidationError::EmptyList {
                field: "itemsBought".to_string()
            })
        );
        // A bad item anywhere in the list rejects the whole batch.
        assert!(validate_line_items([("Pen", 3), ("", 1)]).is_err());
        assert!(validate_line_items([("Pen", 3), ("Notebook", 0)]).is_err());
    }
}
