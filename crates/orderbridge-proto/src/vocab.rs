//! Recognized field names, sentinels and fallback values.
//!
//! Both document generations are keyed by these names. Keeping them in one
//! place means the decoder, the translator and the verification checks agree
//! on spelling.

/// Error code a retired endpoint puts in its `error` field.
pub const DEPRECATION_SENTINEL: &str = "API_VERSION_DEPRECATED";

/// Error code used when an envelope carries no usable code.
pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

/// Product name of the placeholder item synthesized for empty orders.
pub const UNKNOWN_PRODUCT: &str = "UNKNOWN";

/// Path of the retired v1 orders endpoint.
pub const V1_ORDERS_PATH: &str = "/api/v1/orders";

/// Path of the current v2 orders endpoint.
pub const V2_ORDERS_PATH: &str = "/api/v2/orders";

/// Date layout legacy consumers expect (`chrono` format string).
pub const LEGACY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Modern (v2) order field names.
pub mod modern {
    pub const ORDER_ID: &str = "orderId";
    pub const STATE: &str = "state";
    pub const AMOUNT: &str = "amount";
    pub const AMOUNT_VALUE: &str = "value";
    pub const AMOUNT_CURRENCY: &str = "currency";
    pub const CUSTOMER: &str = "customer";
    pub const CUSTOMER_ID: &str = "id";
    pub const CUSTOMER_NAME: &str = "name";
    pub const CUSTOMER_EMAIL: &str = "email";
    pub const CREATED_AT: &str = "createdAt";
    pub const LINE_ITEMS: &str = "lineItems";
    pub const ITEM_NAME: &str = "name";
    pub const ITEM_QUANTITY: &str = "quantity";
    pub const ITEM_UNIT_PRICE: &str = "unitPrice";
    pub const ITEM_TAX: &str = "tax";
    pub const TRACKING_NUMBER: &str = "trackingNumber";
    pub const ERRORS: &str = "errors";
    pub const ERROR_CODE: &str = "code";
    pub const ERROR_MESSAGE: &str = "message";
    pub const ERROR_FIELD: &str = "field";
}

/// Legacy (v1) order field names.
pub mod legacy {
    pub const ORDER_ID: &str = "orderId";
    pub const STATUS: &str = "status";
    pub const TOTAL_PRICE: &str = "totalPrice";
    pub const CUSTOMER_ID: &str = "customerId";
    pub const CUSTOMER_NAME: &str = "customerName";
    pub const CREATED_AT: &str = "createdAt";
    pub const ITEMS: &str = "items";
    pub const ITEM_PRODUCT_NAME: &str = "productName";
    pub const ITEM_QTY: &str = "qty";
    pub const TRACKING_NUMBER: &str = "trackingNumber";
    pub const ERROR: &str = "error";
    pub const MESSAGE: &str = "message";

    /// Keys every translated order must carry.
    pub const REQUIRED_ORDER_KEYS: [&str; 7] = [
        ORDER_ID,
        STATUS,
        TOTAL_PRICE,
        ITEMS,
        CUSTOMER_ID,
        CUSTOMER_NAME,
        CREATED_AT,
    ];
}

/// Check whether a string matches the legacy `YYYY-MM-DD` layout.
///
/// This is a shape check only; it does not validate the calendar date.
pub fn is_legacy_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
