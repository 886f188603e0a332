//! Client-local order draft: customer name plus selected products.

use crate::error::{DomainError, DomainResult};
use crate::id::ProductId;
use crate::money::Price;
use crate::order::PlaceOrder;
use crate::product::Product;

pub const MISSING_NAME: &str = "Please enter your name";
pub const EMPTY_SELECTION: &str = "Please select at least one product";

/// Unsubmitted order state. Discarded after submit or cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    customer_name: String,
    // Selection order is kept so the summary lists products as picked.
    selected: Vec<ProductId>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    pub fn selected(&self) -> &[ProductId] {
        &self.selected
    }

    pub fn is_selected(&self, id: ProductId) -> bool {
        self.selected.contains(&id)
    }

    /// Toggle a product in or out of the selection.
    ///
    /// Returns whether the product is selected afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(id);
            true
        }
    }

    /// Selected products, in catalog order.
    pub fn selected_products<'a>(&self, catalog: &'a [Product]) -> Vec<&'a Product> {
        catalog.iter().filter(|p| self.is_selected(p.id)).collect()
    }

    /// Running total of the currently selected products.
    pub fn total(&self, catalog: &[Product]) -> Price {
        self.selected_products(catalog).iter().map(|p| p.price).sum()
    }

    /// Check the draft and produce the request body.
    ///
    /// The customer name is forwarded as typed; only its emptiness is checked.
    pub fn validate(&self) -> DomainResult<PlaceOrder> {
        if self.customer_name.trim().is_empty() {
            return Err(DomainError::validation(MISSING_NAME));
        }
        if self.selected.is_empty() {
            return Err(DomainError::validation(EMPTY_SELECTION));
        }

        Ok(PlaceOrder {
            customer_name: self.customer_name.clone(),
            product_ids: self.selected.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Category;

    fn catalog() -> Vec<Product> {
        vec![
            Product {
                id: ProductId::new(1),
                name: "Croissant".to_string(),
                description: None,
                price: Price::from_decimal(2.50).unwrap(),
                category: Category::Pastry,
            },
            Product {
                id: ProductId::new(2),
                name: "Eclair".to_string(),
                description: None,
                price: Price::from_decimal(3.75).unwrap(),
                category: Category::Pastry,
            },
            Product {
                id: ProductId::new(3),
                name: "Baguette".to_string(),
                description: None,
                price: Price::from_decimal(3.10).unwrap(),
                category: Category::Bread,
            },
        ]
    }

    #[test]
    fn total_of_selected_products_is_exact() {
        let mut draft = OrderDraft::new();
        draft.toggle(ProductId::new(1));
        draft.toggle(ProductId::new(2));

        assert_eq!(draft.total(&catalog()).to_string(), "6.25");
    }

    #[test]
    fn toggle_twice_deselects() {
        let mut draft = OrderDraft::new();
        assert!(draft.toggle(ProductId::new(3)));
        assert!(!draft.toggle(ProductId::new(3)));
        assert!(draft.selected().is_empty());
        assert_eq!(draft.total(&catalog()), Price::ZERO);
    }

    #[test]
    fn blank_name_is_rejected_before_selection() {
        let mut draft = OrderDraft::new();
        draft.set_customer_name("   ");

        assert_eq!(draft.validate(), Err(DomainError::validation(MISSING_NAME)));
    }

    #[test]
    fn empty_selection_is_rejected() {
        let mut draft = OrderDraft::new();
        draft.set_customer_name("Ada");

        assert_eq!(draft.validate(), Err(DomainError::validation(EMPTY_SELECTION)));
    }

    #[test]
    fn valid_draft_is_forwarded_unchanged() {
        let mut draft = OrderDraft::new();
        draft.set_customer_name(" Ada ");
        draft.toggle(ProductId::new(3));
        draft.toggle(ProductId::new(1));

        let body = draft.validate().unwrap();
        assert_eq!(body.customer_name, " Ada ");
        assert_eq!(body.product_ids, vec![ProductId::new(3), ProductId::new(1)]);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a whitespace-only name is always rejected, whatever is selected.
            #[test]
            fn blank_name_always_rejected(
                name in "[ \t]{0,8}",
                ids in proptest::collection::vec(0i64..20, 0..10)
            ) {
                let mut draft = OrderDraft::new();
                draft.set_customer_name(name);
                for id in ids {
                    draft.toggle(ProductId::new(id));
                }
                prop_assert_eq!(draft.validate(), Err(DomainError::validation(MISSING_NAME)));
            }

            /// Property: an empty selection is always rejected for a non-blank name.
            #[test]
            fn empty_selection_always_rejected(name in "[A-Za-z][A-Za-z ]{0,30}") {
                let mut draft = OrderDraft::new();
                draft.set_customer_name(name);
                prop_assert_eq!(draft.validate(), Err(DomainError::validation(EMPTY_SELECTION)));
            }
        }
    }
}
