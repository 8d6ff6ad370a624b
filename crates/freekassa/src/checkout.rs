//! Hosted checkout links.
//!
//! The hosted flow uses a separate hash scheme from the API signature: an
//! unkeyed MD5 over a colon-joined string that includes the first secret
//! word. The gateway recomputes the same string byte-for-byte, so the join
//! order and amount formatting are a wire contract, not a convention.

use md5::{Digest, Md5};
use rust_decimal::Decimal;
use url::Url;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::signature::hex;

/// Build a customer-facing checkout URL for the given payment id.
///
/// The MD5 input is exactly `shopId:amount:secretWord1:currency:paymentId`,
/// with the amount carrying two decimal digits and a `.` radix point.
pub fn build_link(config: &GatewayConfig, payment_id: &str) -> Result<Url, GatewayError> {
    let amount = format_amount(config.amount);
    let hash_input = format!(
        "{}:{}:{}:{}:{}",
        config.shop_id, amount, config.secret_word_1, config.currency, payment_id
    );
    let digest = hex::encode(Md5::digest(hash_input.as_bytes()));

    let mut url = Url::parse(&config.checkout_url)
        .map_err(|e| GatewayError::Config(format!("invalid checkout URL: {e}")))?;
    url.query_pairs_mut()
        .append_pair("m", &config.shop_id.to_string())
        .append_pair("oa", &amount)
        .append_pair("currency", &config.currency)
        .append_pair("o", payment_id)
        .append_pair("s", &digest)
        .append_pair("i", &config.payment_system.code().to_string())
        .append_pair("em", &config.client_email);
    Ok(url)
}

/// Amount with exactly two decimal digits and a `.` separator, regardless
/// of locale.
fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}
