use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a tracked product. Immutable once the record exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derives an identifier from a display name: lowercase, spaces become `_`, and
    /// anything other than alphanumerics and `_` is dropped. Surrounding spaces are kept
    /// as underscores, so `" Soap"` becomes `_soap`.
    ///
    /// ```
    /// use supply_manager::model::ProductId;
    ///
    /// assert_eq!(ProductId::from_name("Water Filter (Kitchen)").as_str(), "water_filter_kitchen");
    /// ```
    pub fn from_name(name: &str) -> Self {
        let id = name
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' { '_' } else { c })
            .filter(|c| c.is_alphanumeric() || *c == '_')
            .collect::<String>();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A tracked consumable item.
///
/// This is also the persisted layout: one record per product, with the date written
/// as an ISO calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub product_name: String,
    pub stock_quantity: u32,
    pub replacement_interval_days: u32,
    pub last_replacement_date: NaiveDate,
}

impl Product {
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        stock_quantity: u32,
        replacement_interval_days: u32,
        last_replacement_date: NaiveDate,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            stock_quantity,
            replacement_interval_days,
            last_replacement_date,
        }
    }
}

/// Parameters for registering a new product.
///
/// Quantities are signed so out-of-range input reaches validation instead of failing
/// to parse. Omitted fields fall back to the configured defaults; an omitted id is
/// derived from the name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub product_name: String,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub replacement_interval_days: Option<i64>,
    #[serde(default)]
    pub last_replacement_date: Option<NaiveDate>,
}

impl ProductCreate {
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<ProductId>) -> Self {
        self.product_id = Some(id.into());
        self
    }

    pub fn with_stock(mut self, stock_quantity: i64) -> Self {
        self.stock_quantity = Some(stock_quantity);
        self
    }

    pub fn with_interval(mut self, days: i64) -> Self {
        self.replacement_interval_days = Some(days);
        self
    }

    pub fn with_last_replacement(mut self, date: NaiveDate) -> Self {
        self.last_replacement_date = Some(date);
        self
    }
}

/// Partial update; only the supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_interval_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_replacement_date: Option<NaiveDate>,
}

impl ProductUpdate {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn with_stock(mut self, stock_quantity: i64) -> Self {
        self.stock_quantity = Some(stock_quantity);
        self
    }

    pub fn with_interval(mut self, days: i64) -> Self {
        self.replacement_interval_days = Some(days);
        self
    }

    pub fn with_last_replacement(mut self, date: NaiveDate) -> Self {
        self.last_replacement_date = Some(date);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.stock_quantity.is_none()
            && self.replacement_interval_days.is_none()
            && self.last_replacement_date.is_none()
    }
}
