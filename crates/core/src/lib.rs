//! `bakery-core` - storefront domain building blocks.
//!
//! This crate contains **pure domain** types and rules (no IO, no HTTP).

pub mod draft;
pub mod error;
pub mod id;
pub mod money;
pub mod order;
pub mod product;

pub use draft::OrderDraft;
pub use error::{DomainError, DomainResult};
pub use id::{OrderId, ProductId};
pub use money::Price;
pub use order::{LineItem, Order, OrderStatus, PlaceOrder};
pub use product::{Category, CategoryFilter, Product, filter_by_category};
