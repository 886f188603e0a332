//! Status View: polls an order until it settles.
//!
//! States: `Loading -> Loaded | Failed`. A loaded order that is still
//! `pending`/`processing` goes back to `Loading` after the poll interval.
//! Anything else (terminal status, unknown status, failed fetch) ends the
//! loop for good. Dropping the [`StatusView`] cancels the loop.

use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use bakery_core::{Order, OrderId, OrderStatus};
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;

use crate::client::StorefrontApi;

/// Default delay between two polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusViewState {
    Loading,
    Loaded(Order),
    Failed(String),
}

impl StatusViewState {
    /// Whether polling has stopped for good in this state.
    pub fn is_settled(&self) -> bool {
        match self {
            StatusViewState::Loading => false,
            StatusViewState::Loaded(order) => !order.status.is_in_progress(),
            StatusViewState::Failed(_) => true,
        }
    }
}

/// Handle owning one polling task for one order.
#[derive(Debug)]
pub struct StatusView {
    order_id: OrderId,
    state: watch::Receiver<StatusViewState>,
    shutdown: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl StatusView {
    /// Start polling `order_id`. Must be called within a tokio runtime.
    pub fn spawn(api: Arc<dyn StorefrontApi>, order_id: OrderId, poll_interval: Duration) -> Self {
        let (tx, rx) = watch::channel(StatusViewState::Loading);
        let shutdown = Arc::new(Notify::new());

        let handle = tokio::spawn(poll_order(api, order_id, poll_interval, tx, shutdown.clone()));

        Self {
            order_id,
            state: rx,
            shutdown,
            handle,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> StatusViewState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<StatusViewState> {
        self.state.clone()
    }

    /// Wait until polling has stopped, returning the final state.
    ///
    /// If the view is cancelled first, returns whatever state was last seen.
    pub async fn settled(&self) -> StatusViewState {
        let mut rx = self.state.clone();
        // An error only means the task is gone; the last value still stands.
        let _ = rx.wait_for(StatusViewState::is_settled).await;
        let state = rx.borrow().clone();
        state
    }

    /// Whether the polling task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop polling. Idempotent.
    pub fn cancel(&self) {
        self.shutdown.notify_one();
    }

    pub fn render(&self) -> String {
        render_state(self.order_id, &self.state.borrow())
    }
}

impl Drop for StatusView {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn poll_order(
    api: Arc<dyn StorefrontApi>,
    order_id: OrderId,
    poll_interval: Duration,
    tx: watch::Sender<StatusViewState>,
    shutdown: Arc<Notify>,
) {
    tracing::info!(%order_id, "order status polling started");

    loop {
        tx.send_replace(StatusViewState::Loading);

        let fetched = tokio::select! {
            biased;
            _ = shutdown.notified() => {
                tracing::info!(%order_id, "order status polling cancelled");
                break;
            }
            fetched = api.get_order(order_id) => fetched,
        };

        match fetched {
            Ok(order) => {
                let status = order.status;
                tracing::debug!(%order_id, %status, "order status fetched");
                tx.send_replace(StatusViewState::Loaded(order));

                if !status.is_in_progress() {
                    tracing::info!(%order_id, %status, "order settled; polling stopped");
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(%order_id, "failed to fetch order status: {}", e);
                tx.send_replace(StatusViewState::Failed(format!(
                    "Failed to fetch order status: {e}"
                )));
                break;
            }
        }

        tokio::select! {
            biased;
            _ = shutdown.notified() => {
                tracing::info!(%order_id, "order status polling cancelled");
                break;
            }
            _ = tokio::time::sleep(poll_interval) => {}
        }
    }
}

fn render_state(order_id: OrderId, state: &StatusViewState) -> String {
    let mut out = String::new();

    match state {
        StatusViewState::Loading => {
            let _ = writeln!(out, "Loading order details...");
            return out;
        }
        StatusViewState::Failed(error) => {
            let _ = writeln!(out, "! {error}");
        }
        StatusViewState::Loaded(order) => {
            let _ = writeln!(out, "Order #{order_id}");
            let _ = writeln!(out, "Status: [{}]", order.status);
            let _ = writeln!(out);
            let _ = writeln!(out, "Customer: {}", order.customer_name);
            let created = order
                .created_at
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let _ = writeln!(out, "Order Date: {created}");
            let _ = writeln!(out, "Items:");
            for item in &order.items {
                let _ = writeln!(out, "  - {} - ${}", item.product_name, item.price);
            }
            let _ = writeln!(out, "Total: ${}", order.total);

            match order.status {
                OrderStatus::Pending | OrderStatus::Processing => {
                    let _ = writeln!(
                        out,
                        "\nYour order is being processed. Please check back later for updates."
                    );
                }
                OrderStatus::Completed => {
                    let _ = writeln!(
                        out,
                        "\nYour order has been completed! Thank you for shopping with us."
                    );
                }
                OrderStatus::Cancelled | OrderStatus::Unknown => {}
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Commands: back | watch");
    out
}
