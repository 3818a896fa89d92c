use crate::model::{Product, ProductId};
use chrono::{Days, NaiveDate};
use serde::Serialize;

/// Days left until the product is due, negative once overdue.
pub fn compute_days_until_replacement(product: &Product, today: NaiveDate) -> i64 {
    let elapsed = (today - product.last_replacement_date).num_days();
    i64::from(product.replacement_interval_days) - elapsed
}

/// The date the next replacement is due. `None` only past the end of the calendar.
pub fn next_replacement_date(product: &Product) -> Option<NaiveDate> {
    product
        .last_replacement_date
        .checked_add_days(Days::new(u64::from(product.replacement_interval_days)))
}

/// Everything a presentation layer shows for one product, computed for a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductState {
    pub product_id: ProductId,
    pub product_name: String,
    pub stock_quantity: u32,
    pub replacement_interval_days: u32,
    pub last_replacement_date: NaiveDate,
    pub next_replacement_date: Option<NaiveDate>,
    pub days_until_replacement: i64,
    pub out_of_stock: bool,
}

impl ProductState {
    pub fn at(product: &Product, today: NaiveDate) -> Self {
        Self {
            product_id: product.product_id.clone(),
            product_name: product.product_name.clone(),
            stock_quantity: product.stock_quantity,
            replacement_interval_days: product.replacement_interval_days,
            last_replacement_date: product.last_replacement_date,
            next_replacement_date: next_replacement_date(product),
            days_until_replacement: compute_days_until_replacement(product, today),
            out_of_stock: product.stock_quantity == 0,
        }
    }
}
