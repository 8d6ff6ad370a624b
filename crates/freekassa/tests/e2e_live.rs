//! Live end-to-end test against the production gateway.
//!
//! Creates a real order, prints the checkout link, and polls it until a
//! terminal status or the configured budget. Requires real merchant
//! credentials in the environment (or a `.env` file):
//!
//!   FREEKASSA_SHOP_ID, FREEKASSA_API_KEY, FREEKASSA_SECRET_WORD_1, ...
//!
//! Run:  cargo test --test e2e_live -- --ignored --nocapture

use std::time::{SystemTime, UNIX_EPOCH};

use freekassa::{checkout, GatewayClient, GatewayConfig};

#[tokio::test]
#[ignore = "requires live merchant credentials"]
async fn e2e_create_order_and_poll() {
    dotenvy::dotenv().ok();

    let config = GatewayConfig::from_env().expect("merchant credentials required");
    let client = GatewayClient::new(config).expect("invalid configuration");

    let payment_id = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        .to_string();

    println!("\n=== FreeKassa End-to-End Test ===");
    println!(
        "Creating order: {} {} (paymentId={payment_id})",
        client.config().amount,
        client.config().currency
    );

    let handle = client
        .create_order(&payment_id)
        .await
        .expect("order creation failed");
    println!("Gateway order id: {:?}", handle.order_id);

    match handle.checkout_location.as_deref() {
        Some(url) => println!("Checkout: {url}"),
        None => {
            let url = checkout::build_link(client.config(), &payment_id)
                .expect("failed to build checkout link");
            println!("Checkout (hosted link): {url}");
        }
    }

    let outcome = client
        .poller()
        .poll(&handle.payment_id, handle.order_id)
        .await
        .expect("polling failed");
    println!("Final outcome: {outcome:?}");
}
