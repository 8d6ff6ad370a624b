//! Client configuration.

use std::env;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::error::GatewayError;

pub const DEFAULT_API_URL: &str = "https://api.freekassa.com/v1/";
pub const DEFAULT_CHECKOUT_URL: &str = "https://pay.fk.money/";
pub const DEFAULT_CURRENCY: &str = "RUB";
pub const DEFAULT_AMOUNT: i64 = 10;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_MAX_POLL_MINUTES: u64 = 10;

/// Payment rails accepted by the gateway, by numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentSystem {
    /// Faster-payments (SBP) transfer. Rejects loopback as the client IP.
    Sbp,
    /// Bank card.
    Card,
    /// SberPay.
    SberPay,
    /// Any other rail id the gateway understands.
    Other(i64),
}

impl PaymentSystem {
    pub fn code(self) -> i64 {
        match self {
            PaymentSystem::Sbp => 44,
            PaymentSystem::Card => 36,
            PaymentSystem::SberPay => 43,
            PaymentSystem::Other(code) => code,
        }
    }

    pub fn from_code(code: i64) -> Self {
        match code {
            44 => PaymentSystem::Sbp,
            36 => PaymentSystem::Card,
            43 => PaymentSystem::SberPay,
            other => PaymentSystem::Other(other),
        }
    }
}

/// Immutable client configuration. Constructed once, read-only for the
/// process lifetime.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Base URL of the merchant API.
    pub api_url: String,
    /// Hosted checkout base URL.
    pub checkout_url: String,
    /// Merchant shop id.
    pub shop_id: i64,
    /// API key used to sign requests.
    pub api_key: String,
    /// First secret word; feeds the hosted checkout link hash.
    pub secret_word_1: String,
    /// Second secret word; reserved for callback verification, unused by
    /// outbound calls.
    pub secret_word_2: String,
    /// Order amount.
    pub amount: Decimal,
    /// ISO currency code, e.g. "RUB".
    pub currency: String,
    /// Payment rail to offer.
    pub payment_system: PaymentSystem,
    /// Payer email forwarded to the gateway.
    pub client_email: String,
    /// Payer IP forwarded to the gateway.
    pub client_ip: String,
    /// Delay between status polls.
    pub poll_interval: Duration,
    /// Overall poll budget, in whole minutes of wall-clock time.
    pub max_poll_minutes: u64,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_url", &self.api_url)
            .field("checkout_url", &self.checkout_url)
            .field("shop_id", &self.shop_id)
            .field("api_key", &"[REDACTED]")
            .field("secret_word_1", &"[REDACTED]")
            .field("secret_word_2", &"[REDACTED]")
            .field("amount", &self.amount)
            .field("currency", &self.currency)
            .field("payment_system", &self.payment_system)
            .field("client_email", &self.client_email)
            .field("client_ip", &self.client_ip)
            .field("poll_interval", &self.poll_interval)
            .field("max_poll_minutes", &self.max_poll_minutes)
            .finish()
    }
}

impl Default for GatewayConfig {
    /// Production endpoints with empty credentials; `validate` fails until
    /// `shop_id` and `api_key` are filled in.
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            checkout_url: DEFAULT_CHECKOUT_URL.to_string(),
            shop_id: 0,
            api_key: String::new(),
            secret_word_1: String::new(),
            secret_word_2: String::new(),
            amount: Decimal::from(DEFAULT_AMOUNT),
            currency: DEFAULT_CURRENCY.to_string(),
            payment_system: PaymentSystem::Sbp,
            client_email: String::new(),
            client_ip: String::new(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_poll_minutes: DEFAULT_MAX_POLL_MINUTES,
        }
    }
}

impl GatewayConfig {
    /// Check the invariants that must hold before any signed call.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.shop_id <= 0 {
            return Err(GatewayError::Config(
                "shop id must be a positive integer".to_string(),
            ));
        }
        if self.api_key.is_empty() {
            return Err(GatewayError::Config("api key must not be empty".to_string()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(GatewayError::Config("amount must be positive".to_string()));
        }
        if self.poll_interval.is_zero() {
            return Err(GatewayError::Config(
                "poll interval must be positive".to_string(),
            ));
        }
        if self.max_poll_minutes == 0 {
            return Err(GatewayError::Config(
                "poll budget must be at least one minute".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from `FREEKASSA_*` environment variables.
    ///
    /// `FREEKASSA_SHOP_ID` and `FREEKASSA_API_KEY` are required; everything
    /// else falls back to the defaults above.
    pub fn from_env() -> Result<Self, GatewayError> {
        let shop_id = env::var("FREEKASSA_SHOP_ID")
            .map_err(|_| GatewayError::Config("FREEKASSA_SHOP_ID is required".to_string()))?
            .parse::<i64>()
            .map_err(|_| {
                GatewayError::Config("FREEKASSA_SHOP_ID must be an integer".to_string())
            })?;

        let api_key = env::var("FREEKASSA_API_KEY")
            .map_err(|_| GatewayError::Config("FREEKASSA_API_KEY is required".to_string()))?;

        let amount = match env::var("FREEKASSA_AMOUNT") {
            Ok(raw) => raw.parse::<Decimal>().map_err(|_| {
                GatewayError::Config(format!("invalid FREEKASSA_AMOUNT: {raw}"))
            })?,
            Err(_) => Decimal::from(DEFAULT_AMOUNT),
        };

        let payment_system = env::var("FREEKASSA_PAYMENT_SYSTEM")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .map(PaymentSystem::from_code)
            .unwrap_or(PaymentSystem::Sbp);

        let poll_interval = env::var("FREEKASSA_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));

        let max_poll_minutes = env::var("FREEKASSA_MAX_POLL_MINUTES")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_POLL_MINUTES);

        Ok(Self {
            api_url: env::var("FREEKASSA_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            checkout_url: env::var("FREEKASSA_CHECKOUT_URL")
                .unwrap_or_else(|_| DEFAULT_CHECKOUT_URL.to_string()),
            shop_id,
            api_key,
            secret_word_1: env::var("FREEKASSA_SECRET_WORD_1").unwrap_or_default(),
            secret_word_2: env::var("FREEKASSA_SECRET_WORD_2").unwrap_or_default(),
            amount,
            currency: env::var("FREEKASSA_CURRENCY")
                .unwrap_or_else(|_| DEFAULT_CURRENCY.to_string()),
            payment_system,
            client_email: env::var("FREEKASSA_CLIENT_EMAIL").unwrap_or_default(),
            client_ip: env::var("FREEKASSA_CLIENT_IP").unwrap_or_default(),
            poll_interval,
            max_poll_minutes,
        })
    }
}
