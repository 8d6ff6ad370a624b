//! Inbound wire types for the merchant API.

use serde::Deserialize;

/// Raw gateway order status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderStatus(pub i64);

impl OrderStatus {
    /// The order has been paid.
    pub const PAID: i64 = 1;
    /// Non-success terminal codes: refunded, errored, cancelled.
    pub const FAILED: [i64; 3] = [6, 8, 9];

    pub fn is_paid(self) -> bool {
        self.0 == Self::PAID
    }

    pub fn is_failed(self) -> bool {
        Self::FAILED.contains(&self.0)
    }

    /// Terminal statuses end a poll; everything else keeps it running.
    pub fn is_terminal(self) -> bool {
        self.is_paid() || self.is_failed()
    }
}

/// Result of a successful order creation.
#[derive(Debug, Clone)]
pub struct OrderHandle {
    /// Caller-chosen idempotency key.
    pub payment_id: String,
    /// Gateway-assigned order id. Optional for later status lookups as long
    /// as `payment_id` is supplied.
    pub order_id: Option<i64>,
    /// Hosted checkout URL returned by the gateway, when present.
    pub checkout_location: Option<String>,
}

/// Response body of `POST orders/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderResponse {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "orderId")]
    pub order_id: Option<i64>,
    pub location: Option<String>,
    /// The gateway has been seen emitting the location field in either casing.
    #[serde(rename = "Location")]
    pub location_upper: Option<String>,
}

impl CreateOrderResponse {
    pub fn is_success(&self) -> bool {
        self.kind == "success"
    }

    /// Checkout URL under either field casing, lowercase first.
    pub fn checkout_location(&self) -> Option<&str> {
        self.location.as_deref().or(self.location_upper.as_deref())
    }
}

/// Response body of `POST orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderListResponse {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub orders: Vec<OrderEntry>,
}

impl OrderListResponse {
    pub fn is_success(&self) -> bool {
        self.kind == "success"
    }
}

/// A single order in the `orders` array.
///
/// The status field name has drifted across gateway revisions; all three
/// spellings are accepted, first present one wins.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderEntry {
    #[serde(rename = "orderStatus")]
    pub order_status: Option<i64>,
    pub status: Option<i64>,
    #[serde(rename = "order_status")]
    pub order_status_snake: Option<i64>,
}

impl OrderEntry {
    /// Status under the first present field name, in priority order
    /// `orderStatus`, `status`, `order_status`.
    pub fn status_code(&self) -> Option<OrderStatus> {
        self.order_status
            .or(self.status)
            .or(self.order_status_snake)
            .map(OrderStatus)
    }
}
