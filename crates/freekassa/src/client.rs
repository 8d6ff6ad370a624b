//! Signed-transport client for the merchant API.

use std::time::Duration;

use serde_json::Value;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::nonce;
use crate::poller::{OrderPoller, StatusSource};
use crate::request::{signed_envelope, CreateOrderRequest, OrderStatusRequest, ParamValue};
use crate::response::{CreateOrderResponse, OrderHandle, OrderListResponse, OrderStatus};

/// Per-call HTTP timeout, independent of the poll budget.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the merchant API.
///
/// Wraps `reqwest::Client`. Every outbound call drops absent parameters,
/// injects `shopId`, a fresh nonce, and the request signature, then POSTs
/// the envelope as JSON. Each call is attempted exactly once; retry policy
/// belongs to the caller.
pub struct GatewayClient {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl GatewayClient {
    /// Build a client, checking the config invariants up front.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| GatewayError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Poller bound to this client's configured interval and budget.
    pub fn poller(&self) -> OrderPoller<&GatewayClient> {
        OrderPoller::new(self, self.config.poll_interval, self.config.max_poll_minutes)
    }

    /// POST a signed envelope to `route` and return the parsed JSON body.
    async fn post_signed(
        &self,
        route: &str,
        params: Vec<(&'static str, ParamValue)>,
    ) -> Result<Value, GatewayError> {
        let body = signed_envelope(params, self.config.shop_id, nonce::next(), &self.config.api_key)?;

        tracing::debug!(route, payload = %redact_signature(&body), "sending gateway request");

        let url = format!("{}/{route}", self.config.api_url.trim_end_matches('/'));
        let resp = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("request to {route} failed: {e}")))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            let text = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Auth(text));
        }
        if status == reqwest::StatusCode::BAD_REQUEST {
            let text = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Request(text));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Transport(format!(
                "HTTP {} for {route}: {text}",
                status.as_u16()
            )));
        }

        let data: Value = resp.json().await.map_err(|e| {
            GatewayError::Transport(format!("unparseable response from {route}: {e}"))
        })?;
        tracing::debug!(route, response = %data, "gateway response");
        Ok(data)
    }

    /// Create a payment order.
    ///
    /// Succeeds only when the gateway answers `type: "success"`; any other
    /// 2xx body is a business rejection carrying the raw response.
    pub async fn create_order(&self, payment_id: &str) -> Result<OrderHandle, GatewayError> {
        let request = CreateOrderRequest {
            payment_id: payment_id.to_string(),
            amount: self.config.amount,
            currency: self.config.currency.clone(),
            email: self.config.client_email.clone(),
            ip: self.config.client_ip.clone(),
            payment_system: self.config.payment_system,
        };

        let data = self.post_signed("orders/create", request.params()).await?;

        let parsed: CreateOrderResponse = serde_json::from_value(data.clone())?;
        if !parsed.is_success() {
            return Err(GatewayError::Business { raw: data });
        }

        Ok(OrderHandle {
            payment_id: payment_id.to_string(),
            order_id: parsed.order_id,
            checkout_location: parsed.checkout_location().map(String::from),
        })
    }

    /// Look up the current status of an order.
    ///
    /// `Ok(None)` means the gateway had no answer: a non-success reply, an
    /// empty match list, or an order entry without a recognizable status
    /// field. None of those is an error; a poll keeps running through them.
    pub async fn order_status(
        &self,
        payment_id: &str,
        order_id: Option<i64>,
    ) -> Result<Option<OrderStatus>, GatewayError> {
        let request = OrderStatusRequest {
            order_id,
            payment_id: payment_id.to_string(),
        };
        let data = self.post_signed("orders", request.params()).await?;

        let parsed: OrderListResponse = serde_json::from_value(data.clone())?;
        if !parsed.is_success() {
            tracing::warn!(response = %data, "status query rejected by gateway");
            return Ok(None);
        }
        let Some(order) = parsed.orders.first() else {
            tracing::warn!(payment_id, "no order matched the status query");
            return Ok(None);
        };
        let status = order.status_code();
        if status.is_none() {
            tracing::warn!(response = %data, "order entry has no recognizable status field");
        }
        Ok(status)
    }
}

impl StatusSource for GatewayClient {
    async fn fetch_status(
        &self,
        payment_id: &str,
        order_id: Option<i64>,
    ) -> Result<Option<OrderStatus>, GatewayError> {
        self.order_status(payment_id, order_id).await
    }
}

/// Debug view of an outbound body with the signature removed.
fn redact_signature(body: &serde_json::Map<String, Value>) -> Value {
    let mut copy = body.clone();
    copy.remove("signature");
    Value::Object(copy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = GatewayClient::new(GatewayConfig::default());
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[test]
    fn test_redact_signature_drops_only_signature() {
        let mut body = serde_json::Map::new();
        body.insert("shopId".to_string(), serde_json::json!(42));
        body.insert("signature".to_string(), serde_json::json!("deadbeef"));

        let redacted = redact_signature(&body);
        assert_eq!(redacted["shopId"], serde_json::json!(42));
        assert!(redacted.get("signature").is_none());
        // the original body is untouched
        assert!(body.contains_key("signature"));
    }
}
