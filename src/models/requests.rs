//! Request DTOs for the orders API
//!
//! Defines the incoming request bodies and the field rules they must pass
//! before the order service is invoked.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{FieldErrors, OrderError, Result};

/// Maximum customer name length in characters
pub const MAX_CUSTOMER_NAME_LENGTH: usize = 100;

/// Maximum product name length in characters
pub const MAX_PRODUCT_LENGTH: usize = 200;

/// Largest accepted order amount, 999 999.99
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);

/// Amounts carry whole cents at most
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Request body for POST /api/orders
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub product: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl CreateOrderRequest {
    pub fn new(customer_name: impl Into<String>, product: impl Into<String>, amount: Decimal) -> Self {
        Self {
            customer_name: customer_name.into(),
            product: product.into(),
            amount,
        }
    }

    /// Checks every field, reporting all failures at once.
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.customer_name, &self.product, self.amount)
    }
}

/// Request body for PUT /api/orders/:id
///
/// Replaces every mutable field of an existing order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub product: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl UpdateOrderRequest {
    pub fn new(customer_name: impl Into<String>, product: impl Into<String>, amount: Decimal) -> Self {
        Self {
            customer_name: customer_name.into(),
            product: product.into(),
            amount,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.customer_name, &self.product, self.amount)
    }
}

fn validate_fields(customer_name: &str, product: &str, amount: Decimal) -> Result<()> {
    let mut errors = FieldErrors::new();
    let mut reject = |field: &str, message: String| {
        errors.entry(field.to_string()).or_default().push(message);
    };

    if customer_name.trim().is_empty() {
        reject("customerName", "Customer name is required".to_string());
    } else if customer_name.chars().count() > MAX_CUSTOMER_NAME_LENGTH {
        reject(
            "customerName",
            format!("Customer name must not exceed {} characters", MAX_CUSTOMER_NAME_LENGTH),
        );
    }

    if product.trim().is_empty() {
        reject("product", "Product is required".to_string());
    } else if product.chars().count() > MAX_PRODUCT_LENGTH {
        reject(
            "product",
            format!("Product must not exceed {} characters", MAX_PRODUCT_LENGTH),
        );
    }

    if amount <= Decimal::ZERO {
        reject("amount", "Amount must be greater than zero".to_string());
    } else if amount > MAX_AMOUNT {
        reject("amount", "Amount must not exceed 999,999.99".to_string());
    } else if amount.normalize().scale() > AMOUNT_DECIMAL_PLACES {
        reject(
            "amount",
            format!("Amount must have at most {} decimal places", AMOUNT_DECIMAL_PLACES),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(OrderError::validation(errors))
    }
}
