use super::error::ProductError;
use super::validation::{
    check_date, check_interval, check_name, check_stock, validate, ProductField, ValidationError,
};
use crate::config::ProductDefaults;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use chrono::NaiveDate;

/// Builds a new record, filling omitted fields from `defaults` and `today`.
pub fn create_product(
    params: ProductCreate,
    defaults: ProductDefaults,
    today: NaiveDate,
) -> Result<Product, ProductError> {
    check_name(&params.product_name)?;
    let stock_quantity = match params.stock_quantity {
        Some(stock) => check_stock(stock)?,
        None => defaults.stock_quantity,
    };
    let replacement_interval_days = match params.replacement_interval_days {
        Some(days) => check_interval(days)?,
        None => defaults.replacement_interval_days,
    };
    let last_replacement_date = params.last_replacement_date.unwrap_or(today);

    let product_id = params
        .product_id
        .unwrap_or_else(|| ProductId::from_name(&params.product_name));
    let product = Product {
        product_id,
        product_name: params.product_name,
        stock_quantity,
        replacement_interval_days,
        last_replacement_date,
    };
    validate(&product, today)?;
    Ok(product)
}

/// Records a replacement made today and uses up one unit.
///
/// Out of stock is not an error: the date still moves to `today` and stock stays at
/// zero. The date never moves backwards, so a record already dated after `today` keeps
/// its date.
pub fn replace_item(product: &Product, today: NaiveDate) -> Product {
    Product {
        stock_quantity: product.stock_quantity.saturating_sub(1),
        last_replacement_date: product.last_replacement_date.max(today),
        ..product.clone()
    }
}

/// Adds stock. A total beyond what a record can hold is a validation error on
/// `stock_quantity`, not a bad quantity.
pub fn add_stock(product: &Product, quantity: i64) -> Result<Product, ProductError> {
    let quantity = positive_quantity(quantity)?;
    let total = u64::from(product.stock_quantity) + quantity;
    let stock_quantity = u32::try_from(total).map_err(|_| {
        ValidationError::new(
            ProductField::StockQuantity,
            format!("{} + {quantity} is too large", product.stock_quantity),
        )
    })?;
    Ok(Product {
        stock_quantity,
        ..product.clone()
    })
}

pub fn remove_stock(product: &Product, quantity: i64) -> Result<Product, ProductError> {
    let requested = positive_quantity(quantity)?;
    let available = product.stock_quantity;
    let stock_quantity = u64::from(available)
        .checked_sub(requested)
        .and_then(|left| u32::try_from(left).ok())
        .ok_or(ProductError::InsufficientStock {
            requested,
            available,
        })?;
    Ok(Product {
        stock_quantity,
        ..product.clone()
    })
}

/// Applies the supplied fields. Each one is checked in record order and the first
/// failure rejects the whole update.
pub fn update_product(
    product: &Product,
    update: &ProductUpdate,
    today: NaiveDate,
) -> Result<Product, ProductError> {
    let mut next = product.clone();
    if let Some(name) = &update.product_name {
        check_name(name)?;
        next.product_name = name.clone();
    }
    if let Some(stock) = update.stock_quantity {
        next.stock_quantity = check_stock(stock)?;
    }
    if let Some(days) = update.replacement_interval_days {
        next.replacement_interval_days = check_interval(days)?;
    }
    if let Some(date) = update.last_replacement_date {
        check_date(date, today)?;
        next.last_replacement_date = date;
    }
    validate(&next, today)?;
    Ok(next)
}

/// Only `quantity < 1` is a bad quantity; large values are judged against the stock.
fn positive_quantity(quantity: i64) -> Result<u64, ProductError> {
    match u64::try_from(quantity) {
        Ok(q) if q >= 1 => Ok(q),
        _ => Err(ProductError::InvalidQuantity(quantity)),
    }
}
