//! `bakery-storefront`
//!
//! **Responsibility:** customer-facing client for the bakery ordering service.
//!
//! This crate provides:
//! - An HTTP client for the catalog and order endpoints
//! - An explicit shell state store routing between the three views
//! - A cancellable order status poller
//! - A line-oriented terminal front end
//!
//! The storefront is a **thin shell** around the bakery API: it validates a
//! draft locally and otherwise shows whatever the service reports.

pub mod client;
pub mod config;
pub mod error;
pub mod shell;
pub mod terminal;
pub mod types;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpClient, StorefrontApi};
pub use config::Config;
pub use error::{ClientError, FormError};
pub use shell::{Action, Shell, ShellState, View};
pub use views::{StatusView, StatusViewState};
