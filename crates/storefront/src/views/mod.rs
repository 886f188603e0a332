//! Terminal renditions of the storefront views.
//!
//! Each view keeps its own local state and renders to plain text; the shell
//! decides which one is on screen.

pub mod catalog;
pub mod order_form;
pub mod status;

pub use catalog::{CatalogView, ProductCard, catalog_cards};
pub use order_form::{OrderFormView, SubmitOutcome};
pub use status::{StatusView, StatusViewState};
