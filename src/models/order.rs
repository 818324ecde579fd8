//! Order entity and its external projection
//!
//! `Order` is the record persisted by the durable store. `OrderDto` is the
//! shape handed to callers and the shape stored (serialized) in the cache.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// == Order ==
/// Durable order record.
///
/// `id` and `created_at` are fixed at construction and never change; the
/// remaining fields change only through the update path. `amount` is
/// persisted as an exact decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub customer_name: String,
    pub product: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order with a fresh identifier stamped with the current time.
    pub fn new(customer_name: impl Into<String>, product: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_name: customer_name.into(),
            product: product.into(),
            amount,
            created_at: Utc::now(),
        }
    }

    /// Returns a copy with the mutable fields replaced, keeping id and timestamp.
    pub fn revised(&self, customer_name: impl Into<String>, product: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: self.id,
            customer_name: customer_name.into(),
            product: product.into(),
            amount,
            created_at: self.created_at,
        }
    }
}

// == Order DTO ==
/// Externally visible projection of an [`Order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub order_id: Uuid,
    pub customer_name: String,
    pub product: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderDto {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            customer_name: order.customer_name.clone(),
            product: order.product.clone(),
            amount: order.amount,
            created_at: order.created_at,
        }
    }
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.id,
            customer_name: order.customer_name,
            product: order.product,
            amount: order.amount,
            created_at: order.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_orders_get_distinct_ids() {
        let a = Order::new("Ada", "Widget", dec!(12.50));
        let b = Order::new("Ada", "Widget", dec!(12.50));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_translation_copies_every_field() {
        let order = Order::new("Ada", "Widget", dec!(12.50));
        let dto = OrderDto::from(&order);

        assert_eq!(dto.order_id, order.id);
        assert_eq!(dto.customer_name, "Ada");
        assert_eq!(dto.product, "Widget");
        assert_eq!(dto.amount, dec!(12.50));
        assert_eq!(dto.created_at, order.created_at);
        assert_eq!(OrderDto::from(order.clone()), dto);
    }

    #[test]
    fn test_revised_keeps_identity() {
        let order = Order::new("Ada", "Widget", dec!(12.50));
        let revised = order.revised("Grace", "Gadget", dec!(99));

        assert_eq!(revised.id, order.id);
        assert_eq!(revised.created_at, order.created_at);
        assert_eq!(revised.customer_name, "Grace");
        assert_eq!(revised.product, "Gadget");
        assert_eq!(revised.amount, dec!(99));
    }

    #[test]
    fn test_dto_uses_camel_case() {
        let dto = OrderDto::from(&Order::new("Ada", "Widget", dec!(12.50)));
        let json = serde_json::to_value(&dto).unwrap();

        assert!(json.get("orderId").is_some());
        assert!(json.get("customerName").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["amount"], 12.5);
    }

    #[test]
    fn test_record_keeps_exact_amount() {
        let order = Order::new("Ada", "Widget", dec!(0.10));
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();

        assert!(json.contains(r#""amount":"0.10""#));
        assert_eq!(back.amount, dec!(0.10));
    }

    #[test]
    fn test_dto_amount_survives_json() {
        for amount in [dec!(0.01), dec!(12.34), dec!(999999.99)] {
            let dto = OrderDto::from(Order::new("Ada", "Widget", amount));
            let back: OrderDto = serde_json::from_slice(&serde_json::to_vec(&dto).unwrap()).unwrap();
            assert_eq!(back.amount, amount);
        }
    }
}
