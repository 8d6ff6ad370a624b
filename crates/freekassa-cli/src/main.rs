use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use freekassa::{checkout, GatewayClient, GatewayConfig, PollOutcome};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    let client = match GatewayClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    let payment_id = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        .to_string();

    tracing::info!(
        amount = %client.config().amount,
        currency = %client.config().currency,
        payment_id,
        "creating order"
    );

    let handle = match client.create_order(&payment_id).await {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("order creation failed: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(order_id = ?handle.order_id, "order created");

    match handle.checkout_location.as_deref() {
        Some(url) => println!("Pay here: {url}"),
        None => match checkout::build_link(client.config(), &payment_id) {
            Ok(url) => println!("Pay here: {url}"),
            Err(e) => tracing::warn!("could not build checkout link: {e}"),
        },
    }

    match client.poller().poll(&handle.payment_id, handle.order_id).await {
        Ok(PollOutcome::Succeeded) => println!("Payment received."),
        Ok(PollOutcome::Failed(status)) => {
            println!("Payment failed (status {}).", status.0);
            std::process::exit(2);
        }
        Ok(PollOutcome::TimedOut) => {
            println!("Gave up waiting for the payment.");
            std::process::exit(3);
        }
        Err(e) => {
            tracing::error!("polling aborted: {e}");
            std::process::exit(1);
        }
    }
}
