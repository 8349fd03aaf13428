//! v2 to legacy order translation.
//!
//! Each legacy field is derived by an independent rule with its own fallback:
//!
//! | Legacy field | Source | Fallback |
//! |--------------|--------|----------|
//! | `status` | `state` if in the legacy enum | `PAID` |
//! | `totalPrice` | `amount.value`, or a bare `amount` | `0.0` |
//! | `customerId`, `customerName` | `customer.id`, `customer.name` | `""` |
//! | `createdAt` | date part of `createdAt` | text before `T`, then the raw value |
//! | `items` | `lineItems[].{name, quantity}` | one `UNKNOWN` item with `qty = 0` |
//! | `trackingNumber` | `trackingNumber` | omitted |
//!
//! Unknown states are downgraded on purpose. Legacy clients crash on enum
//! values they do not know, so `FULFILLED` or any future state is reported as
//! `PAID`. This loses information and is the intended behavior.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::debug;

use orderbridge_proto::vocab::{LEGACY_DATE_FORMAT, UNKNOWN_PRODUCT};
use orderbridge_proto::{
    Amount, LegacyItem, LegacyOrder, LegacyStatus, ModernCustomer, ModernLineItem, ModernOrder,
};

/// Naive timestamp layouts accepted when the offset is missing.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Extended and basic calendar date layouts.
const DATE_FORMATS: [&str; 2] = [LEGACY_DATE_FORMAT, "%Y%m%d"];

/// Translate a decoded v2 order into the legacy-safe shape.
pub fn translate(modern: &ModernOrder) -> LegacyOrder {
    let (customer_id, customer_name) = flatten_customer(modern.customer.as_ref());

    LegacyOrder {
        order_id: modern.order_id.clone().unwrap_or_default(),
        status: legacy_status(modern.state.as_deref()),
        total_price: total_price(modern.amount.as_ref()),
        customer_id,
        customer_name,
        created_at: modern
            .created_at
            .as_deref()
            .map(legacy_date)
            .unwrap_or_default(),
        items: legacy_items(&modern.line_items),
        tracking_number: modern.tracking_number.clone(),
    }
}

/// Decode a raw v2 document and translate it.
pub fn translate_document(doc: &Value) -> LegacyOrder {
    translate(&ModernOrder::from_document(doc))
}

/// Map a modern state onto the legacy enum, downgrading unknown values.
pub fn legacy_status(state: Option<&str>) -> LegacyStatus {
    match state.and_then(LegacyStatus::parse) {
        Some(status) => status,
        None => {
            debug!(
                state = state.unwrap_or("<absent>"),
                fallback = %LegacyStatus::FALLBACK,
                "downgrading unrecognized order state"
            );
            LegacyStatus::FALLBACK
        }
    }
}

fn total_price(amount: Option<&Amount>) -> f64 {
    match amount {
        Some(Amount::Money { value, .. }) => value.unwrap_or(0.0),
        Some(Amount::Bare(value)) => *value,
        None => 0.0,
    }
}

fn flatten_customer(customer: Option<&ModernCustomer>) -> (String, String) {
    match customer {
        Some(c) => (
            c.id.clone().unwrap_or_default(),
            c.name.clone().unwrap_or_default(),
        ),
        None => (String::new(), String::new()),
    }
}

/// Reduce an ISO-8601 timestamp to `YYYY-MM-DD`.
///
/// The date is taken as written; offsets are not converted to UTC. Both the
/// extended (`2024-12-17T15:45:30Z`) and basic (`20241217T154530Z`) forms are
/// accepted. When nothing parses, the text before the first `T` is used, and
/// failing that the raw value.
pub fn legacy_date(raw: &str) -> String {
    let trimmed = raw.trim();

    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|ts| ts.date_naive())
        .or_else(|| {
            NAIVE_TIMESTAMP_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|ts| ts.date())
        })
        .or_else(|| date_prefix(trimmed));

    match parsed {
        Some(date) => date.format(LEGACY_DATE_FORMAT).to_string(),
        None => match trimmed.split_once('T') {
            Some((date, _)) => date.to_string(),
            None => raw.to_string(),
        },
    }
}

/// Parse the calendar date in front of the time designator, if any.
fn date_prefix(text: &str) -> Option<NaiveDate> {
    let date = text.split(['T', 't', ' ']).next()?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
}

fn legacy_items(line_items: &[ModernLineItem]) -> Vec<LegacyItem> {
    let items: Vec<LegacyItem> = line_items
        .iter()
        .map(|item| LegacyItem {
            product_name: item.name.clone().unwrap_or_default(),
            qty: item.quantity.unwrap_or(0),
        })
        .collect();

    if items.is_empty() {
        // Legacy UI reads items[0] unconditionally.
        debug!("order has no line items, synthesizing placeholder");
        return vec![LegacyItem {
            product_name: UNKNOWN_PRODUCT.to_string(),
            qty: 0,
        }];
    }

    items
}
