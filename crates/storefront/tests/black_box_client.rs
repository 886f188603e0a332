use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use bakery_core::{OrderId, OrderStatus, ProductId};
use bakery_storefront::{ClientError, HttpClient, Shell, StatusViewState, StorefrontApi, View};
use serde_json::{Value, json};

#[derive(Default)]
struct Bakery {
    /// Statuses handed out by successive `GET /api/orders/42`.
    statuses: Mutex<VecDeque<&'static str>>,
    products_broken: bool,
    requests: Mutex<Vec<String>>,
    order_bodies: Mutex<Vec<Value>>,
}

impl Bakery {
    fn record(&self, line: String) {
        self.requests.lock().unwrap().push(line);
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

struct TestServer {
    base_url: String,
    bakery: Arc<Bakery>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(bakery: Bakery) -> Self {
        let bakery = Arc::new(bakery);
        let app = Router::new()
            .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
            .route("/api/products", get(list_products))
            .route("/api/orders", axum::routing::post(place_order))
            .route("/api/orders/:id", get(get_order))
            .with_state(bakery.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            bakery,
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn list_products(State(bakery): State<Arc<Bakery>>) -> axum::response::Response {
    bakery.record("GET /api/products".to_string());
    if bakery.products_broken {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }

    Json(json!([
        {"id": 1, "name": "Croissant", "description": "Buttery and flaky", "price": 2.5, "category": "pastry"},
        {"id": 2, "name": "Eclair", "description": null, "price": 3.75, "category": "pastry"},
        {"id": 3, "name": "Sourdough", "description": "Naturally leavened", "price": 6.0, "category": "bread"}
    ]))
    .into_response()
}

async fn place_order(
    State(bakery): State<Arc<Bakery>>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    bakery.record("POST /api/orders".to_string());
    bakery.order_bodies.lock().unwrap().push(body.clone());

    let name_ok = body["customer_name"].as_str().is_some_and(|n| !n.is_empty());
    let items_ok = body["product_ids"].as_array().is_some_and(|ids| !ids.is_empty());
    if !name_ok || !items_ok {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid order data"})),
        )
            .into_response();
    }

    Json(json!({"order_id": 42, "status": "pending"})).into_response()
}

async fn get_order(
    State(bakery): State<Arc<Bakery>>,
    Path(id): Path<i64>,
) -> axum::response::Response {
    bakery.record(format!("GET /api/orders/{id}"));
    if id != 42 {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "Order not found"}))).into_response();
    }

    let status = bakery
        .statuses
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or("completed");

    Json(json!({
        "id": 42,
        "customer_name": "Ada",
        "status": status,
        "created_at": "2025-03-01T09:30:00.123456",
        "items": [
            {"product_id": 1, "product_name": "Croissant", "price": 2.5},
            {"product_id": 2, "product_name": "Eclair", "price": 3.75}
        ],
        "total": 6.25
    }))
    .into_response()
}

#[tokio::test]
async fn client_reads_the_catalog() {
    let srv = TestServer::spawn(Bakery::default()).await;
    let client = HttpClient::new(&srv.base_url);

    assert!(client.check_health().await);

    let products = client.list_products().await.unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[1].price.to_string(), "3.75");
    assert!(products[1].description.is_none());
}

#[tokio::test]
async fn submit_switches_to_status_view_polling_the_returned_id() {
    let srv = TestServer::spawn(Bakery {
        statuses: Mutex::new(VecDeque::from(["pending", "processing", "completed"])),
        ..Bakery::default()
    })
    .await;

    let api = Arc::new(HttpClient::new(&srv.base_url));
    let mut shell = Shell::new(api, Duration::from_millis(20));
    shell.load_catalog().await;
    shell.open_order_form();
    shell.set_customer_name("Ada").unwrap();
    shell.toggle_product(ProductId::new(1)).unwrap();
    shell.toggle_product(ProductId::new(2)).unwrap();
    assert!(shell.render().contains("Total: $6.25"));

    assert_eq!(shell.submit_order().await, Some(OrderId::new(42)));
    assert_eq!(shell.state().view, View::OrderStatus);

    let settled = tokio::time::timeout(Duration::from_secs(5), shell.wait_for_order())
        .await
        .expect("order did not settle in time")
        .unwrap();
    match settled {
        StatusViewState::Loaded(order) => {
            assert_eq!(order.status, OrderStatus::Completed);
            assert_eq!(order.total.to_string(), "6.25");
        }
        other => panic!("Expected Loaded, got {other:?}"),
    }

    let polls = srv
        .bakery
        .requests()
        .iter()
        .filter(|r| *r == "GET /api/orders/42")
        .count();
    assert_eq!(polls, 3);

    let bodies = srv.bakery.order_bodies.lock().unwrap().clone();
    assert_eq!(bodies, vec![json!({"customer_name": "Ada", "product_ids": [1, 2]})]);
    assert!(shell.render().contains("Your order has been completed!"));
}

#[tokio::test]
async fn non_success_status_is_a_failure_with_service_message() {
    let srv = TestServer::spawn(Bakery::default()).await;
    let client = HttpClient::new(&srv.base_url);

    let err = client.get_order(OrderId::new(7)).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 404, .. }));
    assert_eq!(err.to_string(), "HTTP error! Status: 404 (Order not found)");
}

#[tokio::test]
async fn catalog_failure_is_shown_and_not_retried() {
    let srv = TestServer::spawn(Bakery {
        products_broken: true,
        ..Bakery::default()
    })
    .await;

    let mut shell = Shell::new(Arc::new(HttpClient::new(&srv.base_url)), Duration::from_millis(20));
    shell.load_catalog().await;

    assert!(shell.state().catalog.is_empty());
    assert_eq!(
        shell.state().error.as_deref(),
        Some("Failed to fetch products: HTTP error! Status: 500")
    );
    assert_eq!(srv.bakery.requests(), vec!["GET /api/products".to_string()]);
}

#[tokio::test]
async fn rejected_order_stays_on_the_form() {
    let srv = TestServer::spawn(Bakery::default()).await;
    let mut shell = Shell::new(Arc::new(HttpClient::new(&srv.base_url)), Duration::from_millis(20));
    shell.load_catalog().await;

    // Bypass local validation to exercise the service's 400.
    let result = shell
        .place_order(bakery_core::PlaceOrder {
            customer_name: String::new(),
            product_ids: vec![],
        })
        .await;

    assert!(matches!(result, Err(ClientError::Api { status: 400, .. })));
    assert_eq!(shell.state().view, View::Products);
    assert_eq!(
        shell.state().error.as_deref(),
        Some("Failed to place order: HTTP error! Status: 400 (Invalid order data)")
    );
}
