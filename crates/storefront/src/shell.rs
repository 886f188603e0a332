//! Application Shell: the state store and the coordinator around it.
//!
//! [`ShellState`] is the single source of truth for which view is on screen,
//! the catalog and the active order id. It only changes through
//! [`ShellState::reduce`]. [`Shell`] performs the network calls, feeds their
//! outcomes back as [`Action`]s and keeps view lifetimes in step with the
//! selected view (leaving the Status View cancels its poller).

use std::fmt::Write;
use std::sync::Arc;
use std::time::Duration;

use bakery_core::{CategoryFilter, OrderId, PlaceOrder, Product, ProductId};

use crate::client::StorefrontApi;
use crate::error::{ClientError, FormError};
use crate::views::{CatalogView, OrderFormView, StatusView, StatusViewState, SubmitOutcome};

pub const SHOP_NAME: &str = "Sweet Delights Bakery";

/// The view selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Products,
    PlaceOrder,
    OrderStatus,
    /// Fallback for any selector value that names no view.
    NotFound(String),
}

impl View {
    /// Parse a selector name. Unknown names yield [`View::NotFound`].
    pub fn parse(name: &str) -> View {
        match name.trim() {
            "products" => View::Products,
            "placeOrder" => View::PlaceOrder,
            "orderStatus" => View::OrderStatus,
            other => View::NotFound(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            View::Products => "products",
            View::PlaceOrder => "placeOrder",
            View::OrderStatus => "orderStatus",
            View::NotFound(raw) => raw,
        }
    }
}

/// Everything the shell reduces over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CatalogLoaded(Vec<Product>),
    CatalogFailed(String),
    Navigate(View),
    OrderPlaced(OrderId),
    OrderFailed(String),
    BackToProducts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    pub view: View,
    pub catalog: Vec<Product>,
    pub catalog_loading: bool,
    pub error: Option<String>,
    pub order_id: Option<OrderId>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            view: View::Products,
            catalog: Vec::new(),
            catalog_loading: true,
            error: None,
            order_id: None,
        }
    }
}

impl ShellState {
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::CatalogLoaded(products) => {
                self.catalog = products;
                self.catalog_loading = false;
                self.error = None;
            }
            Action::CatalogFailed(message) => {
                self.catalog.clear();
                self.catalog_loading = false;
                self.error = Some(message);
            }
            Action::Navigate(View::OrderStatus) if self.order_id.is_none() => {
                tracing::debug!("ignoring navigation to order status without an order");
            }
            Action::Navigate(view) => {
                self.view = view;
            }
            Action::OrderPlaced(order_id) => {
                self.order_id = Some(order_id);
                self.view = View::OrderStatus;
                self.error = None;
            }
            Action::OrderFailed(message) => {
                self.error = Some(message);
            }
            Action::BackToProducts => {
                self.order_id = None;
                self.view = View::Products;
            }
        }
    }
}

/// Coordinator owning the API handle, the store and the live views.
pub struct Shell {
    api: Arc<dyn StorefrontApi>,
    poll_interval: Duration,
    state: ShellState,
    catalog_view: CatalogView,
    order_form: Option<OrderFormView>,
    status_view: Option<StatusView>,
}

impl Shell {
    pub fn new(api: Arc<dyn StorefrontApi>, poll_interval: Duration) -> Self {
        Self {
            api,
            poll_interval,
            state: ShellState::default(),
            catalog_view: CatalogView::new(),
            order_form: None,
            status_view: None,
        }
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn catalog_view_mut(&mut self) -> &mut CatalogView {
        &mut self.catalog_view
    }

    pub fn order_form(&self) -> Option<&OrderFormView> {
        self.order_form.as_ref()
    }

    pub fn order_form_mut(&mut self) -> Option<&mut OrderFormView> {
        self.order_form.as_mut()
    }

    pub fn status_view(&self) -> Option<&StatusView> {
        self.status_view.as_ref()
    }

    /// Fetch the catalog once. Called on start; never retried.
    pub async fn load_catalog(&mut self) {
        match self.api.list_products().await {
            Ok(products) => {
                tracing::info!("catalog loaded with {} products", products.len());
                self.dispatch(Action::CatalogLoaded(products));
            }
            Err(e) => {
                tracing::warn!("failed to fetch products: {}", e);
                self.dispatch(Action::CatalogFailed(format!("Failed to fetch products: {e}")));
            }
        }
    }

    pub fn navigate(&mut self, view: View) {
        self.dispatch(Action::Navigate(view));
    }

    pub fn open_order_form(&mut self) {
        self.navigate(View::PlaceOrder);
    }

    /// Leave the order form; the draft is discarded.
    pub fn cancel_order(&mut self) {
        self.navigate(View::Products);
    }

    /// Leave the Status View and forget the active order.
    pub fn back_to_products(&mut self) {
        self.dispatch(Action::BackToProducts);
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.catalog_view.set_filter(filter);
    }

    /// Type into the order form's name field.
    pub fn set_customer_name(&mut self, name: impl Into<String>) -> Result<(), FormError> {
        let form = self.order_form.as_mut().ok_or(FormError::NotOpen)?;
        form.set_customer_name(name);
        Ok(())
    }

    /// Tick or untick a catalog product in the order form.
    pub fn toggle_product(&mut self, id: ProductId) -> Result<bool, FormError> {
        let form = self.order_form.as_mut().ok_or(FormError::NotOpen)?;
        Ok(form.toggle(id, &self.state.catalog)?)
    }

    /// Validate the open order form and, if it passes, place the order.
    ///
    /// Validation failures stay inside the form and never reach the network.
    pub async fn submit_order(&mut self) -> Option<OrderId> {
        let Some(form) = self.order_form.as_mut() else {
            tracing::debug!("submit ignored: order form is not open");
            return None;
        };

        match form.submit() {
            SubmitOutcome::Submit(body) => self.place_order(body).await.ok(),
            SubmitOutcome::Invalid(_) => None,
        }
    }

    /// One `POST /api/orders`. On success switch to the Status View for the
    /// new order; on failure record the error and stay where we are.
    pub async fn place_order(&mut self, body: PlaceOrder) -> Result<OrderId, ClientError> {
        match self.api.place_order(&body).await {
            Ok(order_id) => {
                tracing::info!(%order_id, items = body.product_ids.len(), "order placed");
                self.dispatch(Action::OrderPlaced(order_id));
                Ok(order_id)
            }
            Err(e) => {
                tracing::warn!("failed to place order: {}", e);
                self.dispatch(Action::OrderFailed(format!("Failed to place order: {e}")));
                Err(e)
            }
        }
    }

    /// Wait for the shown order to settle. `None` when no Status View is open.
    pub async fn wait_for_order(&self) -> Option<StatusViewState> {
        match &self.status_view {
            Some(view) => Some(view.settled().await),
            None => None,
        }
    }

    fn dispatch(&mut self, action: Action) {
        self.state.reduce(action);
        self.sync_views();
    }

    /// Create or tear down view-local state to match the selected view.
    fn sync_views(&mut self) {
        if self.state.view == View::PlaceOrder {
            self.order_form.get_or_insert_with(OrderFormView::new);
        } else {
            self.order_form = None;
        }

        let wanted = match (&self.state.view, self.state.order_id) {
            (View::OrderStatus, Some(order_id)) => Some(order_id),
            _ => None,
        };
        let current = self.status_view.as_ref().map(StatusView::order_id);

        if wanted != current {
            // Dropping the old view cancels its poller.
            self.status_view = wanted
                .map(|order_id| StatusView::spawn(self.api.clone(), order_id, self.poll_interval));
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== {SHOP_NAME} ===");
        let mut nav = vec!["Products".to_string()];
        if let Some(order_id) = self.state.order_id {
            nav.push(format!("View Order #{order_id}"));
        }
        let _ = writeln!(out, "{}", nav.join(" | "));
        let _ = writeln!(out);

        if let Some(error) = &self.state.error {
            let _ = writeln!(out, "! {error}");
            let _ = writeln!(out);
        }

        let main = match &self.state.view {
            View::Products => self
                .catalog_view
                .render(&self.state.catalog, self.state.catalog_loading),
            View::PlaceOrder => match &self.order_form {
                Some(form) => form.render(&self.state.catalog),
                None => OrderFormView::new().render(&self.state.catalog),
            },
            View::OrderStatus => match &self.status_view {
                Some(view) => view.render(),
                None => "Order not found\n".to_string(),
            },
            View::NotFound(_) => "Page not found\n".to_string(),
        };
        out.push_str(&main);

        let _ = writeln!(out);
        let _ = writeln!(out, "(c) 2025 {SHOP_NAME}. All rights reserved.");
        out
    }
}
