//! Order-lifecycle polling.
//!
//! `Polling → {Succeeded, Failed, TimedOut}`, all three terminal. One
//! status query per tick, a fixed sleep in between, and a wall-clock budget
//! measured in whole minutes from poll start.

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::error::GatewayError;
use crate::response::OrderStatus;

/// Anything the poller can read order statuses from.
///
/// `Ok(None)` means "no answer yet" and keeps the poll running; an `Err`
/// ends it.
pub trait StatusSource: Send + Sync {
    fn fetch_status(
        &self,
        payment_id: &str,
        order_id: Option<i64>,
    ) -> impl Future<Output = Result<Option<OrderStatus>, GatewayError>> + Send;
}

impl<T: StatusSource> StatusSource for &T {
    fn fetch_status(
        &self,
        payment_id: &str,
        order_id: Option<i64>,
    ) -> impl Future<Output = Result<Option<OrderStatus>, GatewayError>> + Send {
        (**self).fetch_status(payment_id, order_id)
    }
}

/// Terminal outcome of a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The order reached the paid status.
    Succeeded,
    /// The order reached a non-success terminal status.
    Failed(OrderStatus),
    /// The budget ran out with no terminal status observed.
    TimedOut,
}

/// Polls a single order until it reaches a terminal state or the budget
/// expires. Never creates orders; it only reads status for a handle
/// created earlier.
pub struct OrderPoller<S> {
    source: S,
    interval: Duration,
    max_minutes: u64,
}

impl<S: StatusSource> OrderPoller<S> {
    pub fn new(source: S, interval: Duration, max_minutes: u64) -> Self {
        Self {
            source,
            interval,
            max_minutes,
        }
    }

    /// Poll until the order reaches a terminal status or the budget expires.
    ///
    /// The status check happens before the budget check, so a terminal
    /// status observed on the tick that would also time out still wins. A
    /// failure from the source ends the poll immediately with that error;
    /// transient-failure tolerance is deliberately not provided here.
    pub async fn poll(
        &self,
        payment_id: &str,
        order_id: Option<i64>,
    ) -> Result<PollOutcome, GatewayError> {
        tracing::info!(payment_id, ?order_id, "starting status poll");
        let start = Instant::now();

        loop {
            let status = self.source.fetch_status(payment_id, order_id).await?;
            let elapsed_min = start.elapsed().as_secs() / 60;
            tracing::info!(elapsed_min, status = ?status.map(|s| s.0), "poll tick");

            if let Some(status) = status {
                if status.is_paid() {
                    tracing::info!(payment_id, "order paid");
                    return Ok(PollOutcome::Succeeded);
                }
                if status.is_failed() {
                    tracing::info!(payment_id, code = status.0, "order failed");
                    return Ok(PollOutcome::Failed(status));
                }
            }

            if elapsed_min >= self.max_minutes {
                tracing::info!(payment_id, "poll budget exhausted");
                return Ok(PollOutcome::TimedOut);
            }

            sleep(self.interval).await;
        }
    }
}
