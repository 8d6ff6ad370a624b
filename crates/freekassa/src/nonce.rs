//! Per-request nonce generation.
//!
//! The gateway rejects replayed envelopes by requiring a distinct,
//! increasing nonce per shop. The source is the wall clock in nanoseconds;
//! an atomic floor keeps the sequence strictly increasing even if two
//! signers race within the same nanosecond tick.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static LAST_NONCE: AtomicI64 = AtomicI64::new(0);

/// Next strictly increasing nonce, unique across all signers in the process.
pub fn next() -> i64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
        .unwrap_or(0);

    let mut prev = LAST_NONCE.load(Ordering::Relaxed);
    loop {
        let next = now.max(prev + 1);
        match LAST_NONCE.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonces_strictly_increase() {
        let mut last = next();
        for _ in 0..1000 {
            let n = next();
            assert!(n > last);
            last = n;
        }
    }

    #[test]
    fn test_nonce_tracks_wall_clock() {
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos() as i64;
        assert!(next() >= before);
    }
}
