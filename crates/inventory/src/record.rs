//! Line codec for the backing file: `id;name;quantity;price`, one record per line.
//!
//! There is no escaping, so a `;` inside a field cannot be represented.

use stockfile_core::Entity;
use thiserror::Error;

use crate::product::{Price, Product};

pub const FIELD_SEPARATOR: char = ';';

/// A line of the backing file that could not be turned into a product.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("line {line_no}: expected 4 fields, found {found}: '{line}'")]
    FieldCount {
        line_no: usize,
        line: String,
        found: usize,
    },

    #[error("line {line_no}: quantity '{value}' is not an integer: '{line}'")]
    Quantity {
        line_no: usize,
        line: String,
        value: String,
    },

    #[error("line {line_no}: price '{value}' is not a decimal number: '{line}'")]
    Price {
        line_no: usize,
        line: String,
        value: String,
    },
}

impl LineError {
    pub fn line_no(&self) -> usize {
        match self {
            Self::FieldCount { line_no, .. }
            | Self::Quantity { line_no, .. }
            | Self::Price { line_no, .. } => *line_no,
        }
    }

    /// True for the numeric-parse class (as opposed to a wrong field count).
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::FieldCount { .. })
    }
}

/// Render a product as a file line (no trailing newline).
pub fn encode(product: &Product) -> String {
    format!(
        "{}{sep}{}{sep}{}{sep}{}",
        product.id(),
        product.name(),
        product.quantity(),
        product.price(),
        sep = FIELD_SEPARATOR
    )
}

/// Parse one raw line (1-based `line_no`). Blank lines yield `Ok(None)`.
///
/// `NaN` and infinite prices are rejected as price errors even though they
/// parse as floats, since a stored price must be a finite amount.
pub fn decode(line_no: usize, raw: &str) -> Result<Option<Product>, LineError> {
    let line = raw.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let [id, name, quantity, price] = fields.as_slice() else {
        return Err(LineError::FieldCount {
            line_no,
            line: line.to_string(),
            found: fields.len(),
        });
    };

    let quantity: i64 = quantity.trim().parse().map_err(|_| LineError::Quantity {
        line_no,
        line: line.to_string(),
        value: quantity.to_string(),
    })?;
    let price: Price = price.parse().map_err(|_| LineError::Price {
        line_no,
        line: line.to_string(),
        value: price.to_string(),
    })?;

    Ok(Some(Product::new(*id, *name, quantity, price)))
}
