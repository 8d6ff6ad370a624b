//! FreeKassa merchant API client.
//!
//! Creates payment orders over the signed JSON protocol, builds hosted
//! checkout links, and tracks order completion by polling.
//!
//! # Flow
//!
//! - [`GatewayClient::create_order`] — create an order, get the checkout URL
//! - [`checkout::build_link`] — or build a hosted checkout link locally
//! - [`OrderPoller::poll`] — poll until paid, failed, or out of budget
//!
//! # Quick example
//!
//! ```no_run
//! use freekassa::{GatewayClient, GatewayConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), freekassa::GatewayError> {
//! let config = GatewayConfig::from_env()?;
//! let client = GatewayClient::new(config)?;
//!
//! let handle = client.create_order("1699999999").await?;
//! println!("pay here: {:?}", handle.checkout_location);
//!
//! let outcome = client.poller().poll(&handle.payment_id, handle.order_id).await?;
//! println!("final: {outcome:?}");
//! # Ok(())
//! # }
//! ```

pub mod checkout;
pub mod client;
pub mod config;
pub mod error;
pub mod nonce;
pub mod poller;
pub mod request;
pub mod response;
pub mod signature;

pub use client::GatewayClient;
pub use config::{GatewayConfig, PaymentSystem};
pub use error::GatewayError;
pub use poller::{OrderPoller, PollOutcome, StatusSource};
pub use response::{OrderHandle, OrderStatus};
