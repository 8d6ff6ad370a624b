//! Request signing for the merchant API.
//!
//! Every signed call concatenates the canonically ordered parameter values
//! with `|` and authenticates the result with HMAC-SHA256 keyed by the
//! API key.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::request::ParamValue;

type HmacSha256 = Hmac<Sha256>;

/// Compute the request signature over a parameter set.
///
/// Parameters are sorted by name in ascending byte order, their values
/// coerced to canonical strings and joined with `|`. Returns the lowercase
/// hex HMAC-SHA256 of that message, keyed by `secret`.
///
/// The sort happens here, so callers may pass parameters in any order.
/// Absent values never reach this function; the typed request records drop
/// them when building the parameter list.
pub fn sign(params: &[(&str, ParamValue)], secret: &str) -> String {
    let mut sorted: Vec<&(&str, ParamValue)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let message = sorted
        .iter()
        .map(|(_, value)| value.canonical())
        .collect::<Vec<_>>()
        .join("|");

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub(crate) mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().fold(String::new(), |mut s, b| {
            use std::fmt::Write;
            let _ = write!(s, "{b:02x}");
            s
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sign_matches_reference_vector() {
        // sorted values: amount | currency | paymentId -> "10|RUB|169999"
        let params = vec![
            ("paymentId", ParamValue::Str("169999".to_string())),
            ("amount", ParamValue::Money(dec!(10))),
            ("currency", ParamValue::Str("RUB".to_string())),
        ];
        assert_eq!(
            sign(&params, "topsecret"),
            "e0e0d167fdb9de62b67508962215ea6b81b70ec3b11513dd421850bcd2cd4d58"
        );
    }

    #[test]
    fn test_sign_is_deterministic() {
        let params = vec![
            ("paymentId", ParamValue::Str("169999".to_string())),
            ("amount", ParamValue::Money(dec!(10))),
        ];
        assert_eq!(sign(&params, "topsecret"), sign(&params, "topsecret"));
    }

    #[test]
    fn test_sign_ignores_input_order() {
        let forward = vec![
            ("amount", ParamValue::Money(dec!(10))),
            ("currency", ParamValue::Str("RUB".to_string())),
            ("paymentId", ParamValue::Str("169999".to_string())),
        ];
        let shuffled = vec![
            ("paymentId", ParamValue::Str("169999".to_string())),
            ("currency", ParamValue::Str("RUB".to_string())),
            ("amount", ParamValue::Money(dec!(10))),
        ];
        assert_eq!(sign(&forward, "topsecret"), sign(&shuffled, "topsecret"));
    }

    #[test]
    fn test_sign_changes_with_value() {
        let base = vec![
            ("paymentId", ParamValue::Str("169999".to_string())),
            ("amount", ParamValue::Money(dec!(10))),
            ("currency", ParamValue::Str("RUB".to_string())),
        ];
        let changed = vec![
            ("paymentId", ParamValue::Str("169999".to_string())),
            ("amount", ParamValue::Money(dec!(11))),
            ("currency", ParamValue::Str("RUB".to_string())),
        ];
        assert_ne!(sign(&base, "topsecret"), sign(&changed, "topsecret"));
        assert_eq!(
            sign(&changed, "topsecret"),
            "f4c2c85b679a9395e317d9bfeaa45a2cabd2d269b56f1efa4e808244c33c03ab"
        );
    }

    #[test]
    fn test_sign_changes_with_secret() {
        let params = vec![("paymentId", ParamValue::Str("169999".to_string()))];
        assert_ne!(sign(&params, "secret-1"), sign(&params, "secret-2"));
    }

    #[test]
    fn test_numeric_and_string_forms_coerce_identically() {
        // The gateway signs str(value), so 1 and "1" are the same message.
        let as_int = vec![("i", ParamValue::Int(44))];
        let as_str = vec![("i", ParamValue::Str("44".to_string()))];
        assert_eq!(sign(&as_int, "topsecret"), sign(&as_str, "topsecret"));
    }
}
