//! Scripted in-memory `StorefrontApi` for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bakery_core::{Order, OrderId, OrderStatus, PlaceOrder, Price, Product};
use tokio::time::Instant;

use crate::client::StorefrontApi;
use crate::error::ClientError;

type Script<T> = Mutex<VecDeque<Result<T, ClientError>>>;

#[derive(Default)]
pub(crate) struct FakeApi {
    products: Script<Vec<Product>>,
    placements: Script<OrderId>,
    orders: Script<Order>,
    product_calls: Mutex<usize>,
    placed: Mutex<Vec<PlaceOrder>>,
    order_fetches: Mutex<Vec<(OrderId, Instant)>>,
}

impl FakeApi {
    pub(crate) fn script_products(
        &self,
        responses: impl IntoIterator<Item = Result<Vec<Product>, ClientError>>,
    ) {
        self.products.lock().unwrap().extend(responses);
    }

    pub(crate) fn script_placements(
        &self,
        responses: impl IntoIterator<Item = Result<OrderId, ClientError>>,
    ) {
        self.placements.lock().unwrap().extend(responses);
    }

    pub(crate) fn script_orders(
        &self,
        responses: impl IntoIterator<Item = Result<Order, ClientError>>,
    ) {
        self.orders.lock().unwrap().extend(responses);
    }

    pub(crate) fn product_calls(&self) -> usize {
        *self.product_calls.lock().unwrap()
    }

    pub(crate) fn placed(&self) -> Vec<PlaceOrder> {
        self.placed.lock().unwrap().clone()
    }

    pub(crate) fn order_fetches(&self) -> Vec<(OrderId, Instant)> {
        self.order_fetches.lock().unwrap().clone()
    }

    fn next<T>(script: &Script<T>) -> Result<T, ClientError> {
        script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Network("no scripted response".to_string())))
    }
}

#[async_trait]
impl StorefrontApi for FakeApi {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        *self.product_calls.lock().unwrap() += 1;
        Self::next(&self.products)
    }

    async fn place_order(&self, order: &PlaceOrder) -> Result<OrderId, ClientError> {
        self.placed.lock().unwrap().push(order.clone());
        Self::next(&self.placements)
    }

    async fn get_order(&self, id: OrderId) -> Result<Order, ClientError> {
        self.order_fetches.lock().unwrap().push((id, Instant::now()));
        Self::next(&self.orders)
    }
}

pub(crate) fn order_with_status(id: i64, status: OrderStatus) -> Order {
    Order {
        id: OrderId::new(id),
        customer_name: "Test Customer".to_string(),
        created_at: None,
        items: Vec::new(),
        total: Price::ZERO,
        status,
    }
}
