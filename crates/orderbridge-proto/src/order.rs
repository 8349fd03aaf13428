//! Modern and legacy order shapes.
//!
//! [`ModernOrder`] is the typed intermediate for a v2 document. All of its
//! fields are optional because upstream producers are not trusted to follow
//! their own schema. [`LegacyOrder`] is the flat, fixed-enum shape that v1
//! clients index into directly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce;
use crate::error::Error;
use crate::vocab::modern;

/// Monetary amount of a modern order.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    /// Object form `{value, currency}` introduced by v2.
    Money {
        /// Numeric value, if present and numeric.
        value: Option<f64>,
        /// ISO currency code.
        currency: Option<String>,
    },
    /// Bare number, as a future schema reverting the type change would send.
    Bare(f64),
}

impl Amount {
    /// Decode an `amount` field.
    ///
    /// Objects become [`Amount::Money`]; JSON numbers become [`Amount::Bare`].
    /// Anything else has no amount.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(_) => Some(Amount::Money {
                value: coerce::field(value, modern::AMOUNT_VALUE).and_then(coerce::number),
                currency: coerce::text_field(value, modern::AMOUNT_CURRENCY),
            }),
            Value::Number(n) => n.as_f64().map(Amount::Bare),
            _ => None,
        }
    }
}

/// Nested customer object of a modern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModernCustomer {
    /// Customer identifier.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Contact email. Legacy documents have no slot for it.
    pub email: Option<String>,
}

/// Line item of a modern order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModernLineItem {
    /// Product name.
    pub name: Option<String>,
    /// Ordered quantity.
    pub quantity: Option<i64>,
    /// Price per unit.
    pub unit_price: Option<f64>,
    /// Tax amount.
    pub tax: Option<f64>,
}

impl ModernLineItem {
    /// Decode a line item. Returns `None` when the element is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object()?;
        Some(Self {
            name: coerce::text_field(value, modern::ITEM_NAME),
            quantity: coerce::field(value, modern::ITEM_QUANTITY).and_then(coerce::integer),
            unit_price: coerce::field(value, modern::ITEM_UNIT_PRICE).and_then(coerce::number),
            tax: coerce::field(value, modern::ITEM_TAX).and_then(coerce::number),
        })
    }
}

/// A v2 order document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModernOrder {
    /// Order identifier.
    pub order_id: Option<String>,
    /// Open-ended state string.
    pub state: Option<String>,
    /// Order amount.
    pub amount: Option<Amount>,
    /// Nested customer.
    pub customer: Option<ModernCustomer>,
    /// ISO-8601 creation timestamp, unparsed.
    pub created_at: Option<String>,
    /// Line items in document order. Non-object elements are dropped.
    pub line_items: Vec<ModernLineItem>,
    /// Carrier tracking number.
    pub tracking_number: Option<String>,
}

impl ModernOrder {
    /// Decode a v2 document.
    ///
    /// Never fails. A non-object document decodes to an order with every field
    /// absent.
    pub fn from_document(doc: &Value) -> Self {
        let customer = coerce::field(doc, modern::CUSTOMER)
            .filter(|raw| raw.is_object())
            .map(|raw| ModernCustomer {
                id: coerce::text_field(raw, modern::CUSTOMER_ID),
                name: coerce::text_field(raw, modern::CUSTOMER_NAME),
                email: coerce::text_field(raw, modern::CUSTOMER_EMAIL),
            });

        let line_items = coerce::field(doc, modern::LINE_ITEMS)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(ModernLineItem::from_value).collect())
            .unwrap_or_default();

        Self {
            order_id: coerce::text_field(doc, modern::ORDER_ID),
            state: coerce::text_field(doc, modern::STATE),
            amount: coerce::field(doc, modern::AMOUNT).and_then(Amount::from_value),
            customer,
            created_at: coerce::text_field(doc, modern::CREATED_AT),
            line_items,
            tracking_number: coerce::text_field(doc, modern::TRACKING_NUMBER),
        }
    }
}

/// Status values legacy clients understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegacyStatus {
    /// Payment captured.
    Paid,
    /// Order cancelled.
    Cancelled,
    /// Handed to a carrier.
    Shipped,
}

impl LegacyStatus {
    /// Every legacy status, in declaration order.
    pub const ALL: [LegacyStatus; 3] = [
        LegacyStatus::Paid,
        LegacyStatus::Cancelled,
        LegacyStatus::Shipped,
    ];

    /// Status that unknown modern states collapse to.
    pub const FALLBACK: LegacyStatus = LegacyStatus::Paid;

    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            LegacyStatus::Paid => "PAID",
            LegacyStatus::Cancelled => "CANCELLED",
            LegacyStatus::Shipped => "SHIPPED",
        }
    }

    /// Recognize an exact legacy spelling. Matching is case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl std::fmt::Display for LegacyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LegacyStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::UnknownStatus(s.to_string()))
    }
}

/// Line item of a legacy order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyItem {
    /// Product name.
    pub product_name: String,
    /// Ordered quantity.
    pub qty: i64,
}

/// A v1 order document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyOrder {
    /// Order identifier.
    pub order_id: String,
    /// Status, always a member of the legacy enum.
    pub status: LegacyStatus,
    /// Order total.
    pub total_price: f64,
    /// Customer identifier.
    pub customer_id: String,
    /// Customer display name.
    pub customer_name: String,
    /// Creation date as `YYYY-MM-DD`.
    pub created_at: String,
    /// Items. Never empty.
    pub items: Vec<LegacyItem>,
    /// Carrier tracking number, present only for shipped orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
}

impl LegacyOrder {
    /// Render as a JSON document.
    pub fn to_document(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_full_document() {
        let doc = json!({
            "orderId": "ORD-789",
            "state": "SHIPPED",
            "amount": {"value": 59.5, "currency": "USD"},
            "customer": {"id": "C789", "name": "Bob", "email": "bob@example.com"},
            "createdAt": "2024-12-17T15:45:30Z",
            "trackingNumber": "TRACK-789-XYZ",
            "lineItems": [
                {"name": "Pen", "quantity": 3, "unitPrice": 5.5, "tax": 0.8}
            ]
        });

        let order = ModernOrder::from_document(&doc);

        assert_eq!(
            order,
            ModernOrder {
                order_id: Some("ORD-789".to_string()),
                state: Some("SHIPPED".to_string()),
                amount: Some(Amount::Money {
                    value: Some(59.5),
                    currency: Some("USD".to_string()),
                }),
                customer: Some(ModernCustomer {
                    id: Some("C789".to_string()),
                    name: Some("Bob".to_string()),
                    email: Some("bob@example.com".to_string()),
                }),
                created_at: Some("2024-12-17T15:45:30Z".to_string()),
                line_items: vec![ModernLineItem {
                    name: Some("Pen".to_string()),
                    quantity: Some(3),
                    unit_price: Some(5.5),
                    tax: Some(0.8),
                }],
                tracking_number: Some("TRACK-789-XYZ".to_string()),
            }
        );
    }

    #[test]
    fn test_decode_never_fails_on_odd_shapes() {
        let doc = json!({
            "customer": null,
            "amount": "lots",
            "createdAt": 20241217,
            "lineItems": ["Pen", {"name": "Ink", "quantity": "x"}]
        });

        let order = ModernOrder::from_document(&doc);

        assert!(order.customer.is_none());
        assert!(order.amount.is_none());
        assert_eq!(order.created_at.as_deref(), Some("20241217"));
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.line_items[0].name.as_deref(), Some("Ink"));
        assert_eq!(order.line_items[0].quantity, None);
    }

    #[test]
    fn test_decode_non_object_document() {
        assert_eq!(ModernOrder::from_document(&json!([1, 2, 3])), ModernOrder::default());
        assert_eq!(ModernOrder::from_document(&Value::Null), ModernOrder::default());
    }

    #[test]
    fn test_amount_forms() {
        assert_eq!(Amount::from_value(&json!(12.5)), Some(Amount::Bare(12.5)));
        assert_eq!(
            Amount::from_value(&json!({"currency": "EUR"})),
            Some(Amount::Money {
                value: None,
                currency: Some("EUR".to_string())
            })
        );
        assert_eq!(Amount::from_value(&json!(null)), None);
    }

    #[test]
    fn test_legacy_status_parse() {
        assert_eq!(LegacyStatus::parse("SHIPPED"), Some(LegacyStatus::Shipped));
        assert_eq!(LegacyStatus::parse("shipped"), None);
        assert_eq!(LegacyStatus::parse("FULFILLED"), None);
        assert!("REFUNDED".parse::<LegacyStatus>().is_err());
        assert_eq!(LegacyStatus::FALLBACK.to_string(), "PAID");
    }

    #[test]
    fn test_legacy_order_serialization() {
        let order = LegacyOrder {
            order_id: "ORD-555".to_string(),
            status: LegacyStatus::Paid,
            total_price: 120.0,
            customer_id: "C555".to_string(),
            customer_name: "Charlie".to_string(),
            created_at: "2024-12-16".to_string(),
            items: vec![LegacyItem {
                product_name: "UNKNOWN".to_string(),
                qty: 0,
            }],
            tracking_number: None,
        };

        assert_eq!(
            order.to_document(),
            json!({
                "orderId": "ORD-555",
                "status": "PAID",
                "totalPrice": 120.0,
                "customerId": "C555",
                "customerName": "Charlie",
                "createdAt": "2024-12-16",
                "items": [{"productName": "UNKNOWN", "qty": 0}]
            })
        );
    }
}
