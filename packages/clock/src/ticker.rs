//! Tickers drive the polling cadence of the dashboard.
//!
//! The [`Interval`] ticker is used in production. It's a `tokio` interval that
//! skips missed ticks instead of bursting to catch up, so a slow tracker never
//! causes a storm of refreshes once it answers again.
//!
//! The [`Manual`] ticker is used in tests. It only ticks when its [`Trigger`]
//! is pulled, so the cadence can be simulated deterministically without
//! waiting for the wall clock.
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

/// A source of ticks.
pub trait Ticker: Send + 'static {
    /// Resolves on the next tick.
    fn tick(&mut self) -> impl Future<Output = ()> + Send;
}

/// Ticks on a fixed period. The first tick completes immediately.
#[derive(Debug)]
pub struct Interval {
    interval: time::Interval,
}

impl Interval {
    /// # Panics
    ///
    /// Will panic if `period` is zero.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Self { interval }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

impl Ticker for Interval {
    async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Ticks only when the paired [`Trigger`] is pulled.
#[derive(Debug)]
pub struct Manual {
    rx: mpsc::UnboundedReceiver<()>,
}

/// The handle that makes a [`Manual`] ticker tick.
#[derive(Debug, Clone)]
pub struct Trigger {
    tx: mpsc::UnboundedSender<()>,
}

/// Builds a manual ticker and its trigger.
#[must_use]
pub fn manual() -> (Manual, Trigger) {
    let (tx, rx) = mpsc::unbounded_channel();

    (Manual { rx }, Trigger { tx })
}

impl Trigger {
    /// Makes the ticker tick once. It does nothing if the ticker is gone.
    pub fn pull(&self) {
        if self.tx.send(()).is_err() {
            tracing::debug!("manual ticker dropped, tick ignored");
        }
    }
}

impl Ticker for Manual {
    async fn tick(&mut self) {
        // Once every trigger is dropped the ticker never ticks again.
        if self.rx.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::{manual, Interval, Ticker};

    #[tokio::test(start_paused = true)]
    async fn the_interval_ticker_should_tick_immediately_and_then_on_every_period() {
        let mut ticker = Interval::new(Duration::from_secs(10));

        assert_eq!(ticker.period(), Duration::from_secs(10));

        ticker.tick().await;
        let start = tokio::time::Instant::now();
        ticker.tick().await;

        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test]
    async fn the_manual_ticker_should_tick_once_per_pull() {
        let (mut ticker, trigger) = manual();

        trigger.pull();
        trigger.pull();

        ticker.tick().await;
        ticker.tick().await;

        assert!(timeout(Duration::from_millis(10), ticker.tick()).await.is_err());
    }

    #[tokio::test]
    async fn the_manual_ticker_should_stop_ticking_when_the_trigger_is_dropped() {
        let (mut ticker, trigger) = manual();

        drop(trigger);

        assert!(timeout(Duration::from_millis(10), ticker.tick()).await.is_err());
    }
}
