//! Unit tests for the rate limiter policies

use std::time::Duration;
use tactix::services::{IntervalLimiter, NoopLimiter, RateLimiter};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn interval_limiter_spaces_out_acquisitions() {
    let limiter = IntervalLimiter::new(Duration::from_millis(500));
    let started = Instant::now();

    limiter.acquire().await;
    limiter.acquire().await;
    limiter.acquire().await;

    // First acquisition is free, the next two wait a full interval each.
    assert!(started.elapsed() >= Duration::from_millis(1000));
}

#[tokio::test(start_paused = true)]
async fn interval_limiter_does_not_wait_when_idle_long_enough() {
    let limiter = IntervalLimiter::new(Duration::from_millis(100));
    limiter.acquire().await;
    tokio::time::sleep(Duration::from_millis(500)).await;

    let before = Instant::now();
    limiter.acquire().await;
    assert_eq!(before.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn noop_limiter_never_waits() {
    let limiter = NoopLimiter;
    let started = Instant::now();
    for _ in 0..10 {
        limiter.acquire().await;
    }
    assert_eq!(started.elapsed(), Duration::ZERO);
}
