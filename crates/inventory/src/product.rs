use core::str::FromStr;

use stockfile_core::{DomainError, DomainResult, Entity, ValueObject};

/// Product identifier, assigned by the caller and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::borrow::Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Unit price, always held at two-decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Round `value` to cents. Non-finite input is rejected.
    ///
    /// Rounding works on the exact decimal expansion of `value` with ties to
    /// even, so `2.675` (stored as 2.67499...) becomes `2.67` and `0.125`
    /// becomes `0.12`.
    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation(format!(
                "price must be a finite number, got {value}"
            )));
        }
        let rounded: f64 = format!("{value:.2}")
            .parse()
            .map_err(|_| DomainError::validation(format!("price {value} cannot be rounded")))?;
        // -0.0 would otherwise persist as "-0".
        Ok(Self(if rounded == 0.0 { 0.0 } else { rounded }))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl ValueObject for Price {}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| DomainError::validation(format!("'{s}' is not a decimal number")))?;
        Self::new(value)
    }
}

/// Shows the stored value in its shortest exact form (`12.5`, `3`).
impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A catalog record.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    quantity: i64,
    price: Price,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, quantity: i64, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
    }

    pub fn set_price(&mut self, price: Price) {
        self.price = price;
    }

    /// Apply the fields present in `update`, leaving the others untouched.
    pub fn apply(&mut self, update: &ProductUpdate) {
        if let Some(quantity) = update.quantity {
            self.set_quantity(quantity);
        }
        if let Some(price) = update.price {
            self.set_price(price);
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "ID: {} | Name: {} | Quantity: {} | Price: ${:.2}",
            self.id,
            self.name,
            self.quantity,
            self.price.value()
        )
    }
}

/// Partial update of a product: `None` fields are left as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProductUpdate {
    pub quantity: Option<i64>,
    pub price: Option<Price>,
}

impl ProductUpdate {
    pub fn quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            price: None,
        }
    }

    pub fn price(price: Price) -> Self {
        Self {
            quantity: None,
            price: Some(price),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.price.is_none()
    }
}
