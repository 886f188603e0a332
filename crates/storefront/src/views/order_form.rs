//! Order Entry View: customer name, product checkboxes, running total.

use std::fmt::Write;

use bakery_core::{DomainError, DomainResult, OrderDraft, PlaceOrder, Product, ProductId};

/// Result of pressing "Submit Order".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The draft passed validation; hand this body to the shell.
    Submit(PlaceOrder),
    /// Validation failed; nothing must reach the network.
    Invalid(DomainError),
}

#[derive(Debug, Clone, Default)]
pub struct OrderFormView {
    draft: OrderDraft,
    error: Option<String>,
}

impl OrderFormView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Inline error shown above the form, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.draft.set_customer_name(name);
    }

    /// Toggle a product's checkbox. Only catalog products can be selected.
    ///
    /// A rejected id is returned to the caller; the inline error is reserved
    /// for submit-time validation.
    pub fn toggle(&mut self, id: ProductId, catalog: &[Product]) -> DomainResult<bool> {
        if !catalog.iter().any(|p| p.id == id) {
            return Err(DomainError::invalid_id(format!("no product #{id} in the catalog")));
        }
        Ok(self.draft.toggle(id))
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        match self.draft.validate() {
            Ok(body) => {
                self.error = None;
                SubmitOutcome::Submit(body)
            }
            Err(err) => {
                tracing::debug!("order draft rejected: {}", err);
                self.error = Some(err.to_string());
                SubmitOutcome::Invalid(err)
            }
        }
    }

    pub fn render(&self, catalog: &[Product]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Place Your Order");
        if let Some(error) = &self.error {
            let _ = writeln!(out, "! {error}");
        }
        let _ = writeln!(out);

        let name = self.draft.customer_name();
        let _ = writeln!(
            out,
            "Your Name: {}",
            if name.is_empty() { "(enter your name)" } else { name }
        );
        let _ = writeln!(out, "Select Products:");
        for product in catalog {
            let mark = if self.draft.is_selected(product.id) { "x" } else { " " };
            let _ = writeln!(
                out,
                "  [{mark}] #{} {} - ${}",
                product.id, product.name, product.price
            );
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Order Summary");
        let selected = self.draft.selected_products(catalog);
        if selected.is_empty() {
            let _ = writeln!(out, "  No products selected");
        }
        for product in selected {
            let _ = writeln!(out, "  - {} - ${}", product.name, product.price);
        }
        let _ = writeln!(out, "Total: ${}", self.draft.total(catalog));

        let _ = writeln!(out);
        let _ = writeln!(out, "Commands: name <your name> | toggle <product id> | submit | cancel");
        out
    }
}
