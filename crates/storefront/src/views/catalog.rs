//! Catalog View: product cards plus a category filter.

use std::fmt::Write;

use bakery_core::{Category, CategoryFilter, Product, filter_by_category};

/// Display projection of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Always `$` followed by exactly two decimals.
    pub price: String,
    pub category: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: format!("${}", product.price),
            category: product.category.label(),
        }
    }
}

/// One card per product, in order.
pub fn catalog_cards<'a, I>(products: I) -> Vec<ProductCard>
where
    I: IntoIterator<Item = &'a Product>,
{
    products.into_iter().map(ProductCard::from).collect()
}

#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    filter: CategoryFilter,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        tracing::debug!("catalog filter set to {}", filter.label());
        self.filter = filter;
    }

    /// Cards for the products passing the current filter.
    pub fn cards(&self, products: &[Product]) -> Vec<ProductCard> {
        catalog_cards(filter_by_category(products, &self.filter))
    }

    pub fn render(&self, products: &[Product], loading: bool) -> String {
        if loading {
            return "Loading products...\n".to_string();
        }

        let mut out = String::new();
        let _ = writeln!(out, "Our Products");
        let _ = writeln!(out, "{}", self.render_filters());
        let _ = writeln!(out);

        let cards = self.cards(products);
        if cards.is_empty() {
            let _ = writeln!(out, "No products available.");
        }
        for card in &cards {
            let _ = writeln!(
                out,
                "  #{} {}  {}  [{}]",
                card.id, card.name, card.price, card.category
            );
            if !card.description.is_empty() {
                let _ = writeln!(out, "      {}", card.description);
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Commands: order | filter <all|bread|pastry|cake|cookie>");
        out
    }

    fn render_filters(&self) -> String {
        let options = std::iter::once(CategoryFilter::All)
            .chain(Category::KNOWN.into_iter().map(CategoryFilter::Only));

        options
            .map(|option| {
                if option == self.filter {
                    format!("[{}]", option.label())
                } else {
                    option.label()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
