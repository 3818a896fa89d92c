use crate::model::{Product, ProductId};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Record fields that validation can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    ProductId,
    ProductName,
    StockQuantity,
    ReplacementIntervalDays,
    LastReplacementDate,
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProductField::ProductId => "product_id",
            ProductField::ProductName => "product_name",
            ProductField::StockQuantity => "stock_quantity",
            ProductField::ReplacementIntervalDays => "replacement_interval_days",
            ProductField::LastReplacementDate => "last_replacement_date",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: ProductField,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: ProductField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Checks every record invariant, reporting the first failing field.
pub fn validate(product: &Product, today: NaiveDate) -> Result<(), ValidationError> {
    check_id(&product.product_id)?;
    check_name(&product.product_name)?;
    check_interval(i64::from(product.replacement_interval_days))?;
    check_date(product.last_replacement_date, today)?;
    Ok(())
}

pub fn check_id(id: &ProductId) -> Result<(), ValidationError> {
    if id.as_str().trim().is_empty() {
        return Err(ValidationError::new(ProductField::ProductId, "must not be empty"));
    }
    Ok(())
}

pub fn check_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new(ProductField::ProductName, "must not be empty"));
    }
    Ok(())
}

pub fn check_stock(stock: i64) -> Result<u32, ValidationError> {
    if stock < 0 {
        return Err(ValidationError::new(
            ProductField::StockQuantity,
            format!("must not be negative, got {stock}"),
        ));
    }
    u32::try_from(stock).map_err(|_| {
        ValidationError::new(ProductField::StockQuantity, format!("{stock} is too large"))
    })
}

pub fn check_interval(days: i64) -> Result<u32, ValidationError> {
    if days < 1 {
        return Err(ValidationError::new(
            ProductField::ReplacementIntervalDays,
            format!("must be at least 1 day, got {days}"),
        ));
    }
    u32::try_from(days).map_err(|_| {
        ValidationError::new(
            ProductField::ReplacementIntervalDays,
            format!("{days} is too large"),
        )
    })
}

pub fn check_date(date: NaiveDate, today: NaiveDate) -> Result<(), ValidationError> {
    if date > today {
        return Err(ValidationError::new(
            ProductField::LastReplacementDate,
            format!("{date} is after today ({today})"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filter() -> Product {
        Product::new("filter", "Filter", 3, 90, day(2024, 1, 15))
    }

    #[test]
    fn test_valid_record() {
        assert_eq!(validate(&filter(), day(2024, 1, 15)), Ok(()));
    }

    #[test]
    fn test_each_invariant() {
        let today = day(2024, 2, 14);

        let mut p = filter();
        p.product_name = "  ".into();
        assert_eq!(validate(&p, today).unwrap_err().field, ProductField::ProductName);

        let mut p = filter();
        p.replacement_interval_days = 0;
        assert_eq!(
            validate(&p, today).unwrap_err().field,
            ProductField::ReplacementIntervalDays
        );

        let mut p = filter();
        p.last_replacement_date = day(2024, 2, 15);
        assert_eq!(
            validate(&p, today).unwrap_err().field,
            ProductField::LastReplacementDate
        );

        let mut p = filter();
        p.product_id = ProductId::new("");
        assert_eq!(validate(&p, today).unwrap_err().field, ProductField::ProductId);
    }

    #[test]
    fn test_first_offending_field_wins() {
        let mut p = filter();
        p.product_name = String::new();
        p.replacement_interval_days = 0;
        let err = validate(&p, day(2024, 2, 14)).unwrap_err();
        assert_eq!(err.field, ProductField::ProductName);
        assert_eq!(err.to_string(), "Invalid product_name: must not be empty");
    }

    #[test]
    fn test_numeric_bounds() {
        assert_eq!(check_stock(0), Ok(0));
        assert_eq!(check_stock(-1).unwrap_err().field, ProductField::StockQuantity);
        assert!(check_stock(i64::from(u32::MAX) + 1).is_err());
        assert_eq!(check_interval(1), Ok(1));
        assert!(check_interval(0).is_err());
    }
}
