//! Outbound wire types for the merchant API.
//!
//! Request bodies are typed records rather than open maps; each record
//! flattens to an ordered parameter list with absent options dropped, and
//! the signed envelope is assembled from that list.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::config::PaymentSystem;
use crate::error::GatewayError;
use crate::signature;

/// A scalar request parameter value.
///
/// The gateway signs the *canonical string form* of each value, so the
/// coercion here is part of the wire contract: integers print bare,
/// decimal amounts keep a `.` radix point and drop trailing zeros.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Money(Decimal),
}

impl ParamValue {
    /// Canonical string form used in the signature message.
    pub fn canonical(&self) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Money(d) => d.normalize().to_string(),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Str(s) => serializer.serialize_str(s),
            ParamValue::Int(i) => serializer.serialize_i64(*i),
            ParamValue::Money(d) => {
                let n = d.normalize();
                match n.to_i64() {
                    Some(i) if n.fract().is_zero() => serializer.serialize_i64(i),
                    _ => serializer.serialize_f64(n.to_f64().unwrap_or_default()),
                }
            }
        }
    }
}

/// Body parameters for `POST orders/create`, before envelope injection.
#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    pub payment_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub email: String,
    pub ip: String,
    pub payment_system: PaymentSystem,
}

impl CreateOrderRequest {
    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        vec![
            ("paymentId", ParamValue::Str(self.payment_id.clone())),
            ("amount", ParamValue::Money(self.amount)),
            ("currency", ParamValue::Str(self.currency.clone())),
            ("email", ParamValue::Str(self.email.clone())),
            ("ip", ParamValue::Str(self.ip.clone())),
            ("i", ParamValue::Int(self.payment_system.code())),
        ]
    }
}

/// Body parameters for `POST orders` (status lookup).
#[derive(Debug, Clone)]
pub struct OrderStatusRequest {
    pub order_id: Option<i64>,
    pub payment_id: String,
}

impl OrderStatusRequest {
    /// An absent `orderId` is dropped entirely; it must appear in neither
    /// the signature message nor the JSON body.
    pub fn params(&self) -> Vec<(&'static str, ParamValue)> {
        let mut params = Vec::with_capacity(2);
        if let Some(id) = self.order_id {
            params.push(("orderId", ParamValue::Int(id)));
        }
        params.push(("paymentId", ParamValue::Str(self.payment_id.clone())));
        params
    }
}

/// Assemble the signed JSON envelope: the caller's parameters plus the
/// injected `shopId`, a fresh `nonce`, and the `signature` computed over
/// everything else.
pub fn signed_envelope(
    params: Vec<(&'static str, ParamValue)>,
    shop_id: i64,
    nonce: i64,
    api_key: &str,
) -> Result<serde_json::Map<String, serde_json::Value>, GatewayError> {
    let mut all = params;
    all.push(("shopId", ParamValue::Int(shop_id)));
    all.push(("nonce", ParamValue::Int(nonce)));

    let sig = signature::sign(&all, api_key);

    let mut body = serde_json::Map::new();
    for (name, value) in &all {
        body.insert((*name).to_string(), serde_json::to_value(value)?);
    }
    body.insert("signature".to_string(), serde_json::Value::String(sig));
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_canonical_forms() {
        assert_eq!(ParamValue::Str("abc".to_string()).canonical(), "abc");
        assert_eq!(ParamValue::Int(44).canonical(), "44");
        assert_eq!(ParamValue::Money(dec!(10)).canonical(), "10");
        assert_eq!(ParamValue::Money(dec!(10.00)).canonical(), "10");
        assert_eq!(ParamValue::Money(dec!(10.50)).canonical(), "10.5");
    }

    #[test]
    fn test_money_serializes_as_bare_integer_when_whole() {
        let v = serde_json::to_value(ParamValue::Money(dec!(10.00))).unwrap();
        assert_eq!(v, serde_json::json!(10));

        let v = serde_json::to_value(ParamValue::Money(dec!(10.5))).unwrap();
        assert_eq!(v, serde_json::json!(10.5));
    }

    #[test]
    fn test_status_request_drops_absent_order_id() {
        let request = OrderStatusRequest {
            order_id: None,
            payment_id: "169999".to_string(),
        };
        let params = request.params();
        assert_eq!(params.len(), 1);
        assert!(params.iter().all(|(name, _)| *name != "orderId"));

        let with_id = OrderStatusRequest {
            order_id: Some(555),
            payment_id: "169999".to_string(),
        };
        assert_eq!(with_id.params().len(), 2);
    }

    #[test]
    fn test_envelope_injects_shop_id_nonce_and_signature() {
        let request = OrderStatusRequest {
            order_id: None,
            payment_id: "169999".to_string(),
        };
        let body = signed_envelope(request.params(), 42, 1_700_000_000_000_000_000, "topsecret")
            .unwrap();

        assert_eq!(body["shopId"], serde_json::json!(42));
        assert_eq!(body["nonce"], serde_json::json!(1_700_000_000_000_000_000i64));
        assert!(body["signature"].is_string());
        assert!(!body.contains_key("orderId"));
    }

    #[test]
    fn test_envelope_signature_matches_reference_vector() {
        // sorted values: amount|currency|email|i|ip|nonce|paymentId|shopId
        let request = CreateOrderRequest {
            payment_id: "169999".to_string(),
            amount: dec!(10),
            currency: "RUB".to_string(),
            email: "x@y".to_string(),
            ip: "127.0.0.1".to_string(),
            payment_system: PaymentSystem::Sbp,
        };
        let body = signed_envelope(request.params(), 42, 1_700_000_000_000_000_000, "topsecret")
            .unwrap();
        assert_eq!(
            body["signature"],
            serde_json::json!(
                "81c2030713cf3f342f4e289f3aa94e8d7021dad7160c784813ad8e0cc0b3e6fd"
            )
        );
    }
}
