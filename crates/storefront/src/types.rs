//! Wire shapes of the bakery service that are not domain types.

use bakery_core::{OrderId, OrderStatus};
use serde::{Deserialize, Serialize};

/// Response of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub order_id: OrderId,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}
