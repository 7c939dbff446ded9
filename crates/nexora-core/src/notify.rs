//! Change notifier
//!
//! Polling stand-in for real-time change delivery. In remote mode a timer
//! fires the caller's callback on a fixed period until the subscription is
//! cancelled; duplicate and no-op notifications are acceptable, and there is
//! no ordering or delivery guarantee. In local mode nothing external can
//! change the store, so the callback is never invoked.
//!
//! Cancellation stops future invocations only; a refresh already triggered
//! by an earlier tick runs to completion.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::debug;

use crate::config::GatewayConfig;

/// Factory for change subscriptions, one mode decision per process
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    poll_period: Option<Duration>,
}

impl ChangeNotifier {
    /// Build a notifier from the gateway configuration.
    ///
    /// Demo mode yields a notifier whose subscriptions never fire.
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            poll_period: (!config.demo_mode()).then_some(config.poll_period),
        }
    }

    /// A notifier that polls on the given period
    pub fn polling(period: Duration) -> Self {
        Self {
            poll_period: Some(period),
        }
    }

    /// A notifier that never fires (local mode)
    pub fn silent() -> Self {
        Self { poll_period: None }
    }

    /// Invoke `on_change` every polling period until the returned handle is
    /// cancelled or dropped. Subscriptions are independent: each owns its own
    /// timer.
    pub fn subscribe<F>(&self, on_change: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let Some(period) = self.poll_period else {
            debug!("Local mode: change subscription is a no-op");
            return Subscription { task: None };
        };

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            // The first tick completes immediately; skip it so the caller's
            // initial load stays in their hands.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                on_change();
            }
        });

        Subscription { task: Some(task) }
    }
}

/// Cancellation handle for one change subscription
///
/// Dropping the handle cancels the subscription as well.
#[derive(Debug)]
pub struct Subscription {
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Stop future notifications. Safe to call more than once.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// True when this subscription can still fire
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
