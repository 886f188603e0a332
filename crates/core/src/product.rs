//! Catalog products and category filtering.

use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::id::ProductId;
use crate::money::Price;

/// Product category (enum-like string on the wire).
///
/// Unknown categories are preserved verbatim rather than rejected, since the
/// service owns the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Bread,
    Pastry,
    Cake,
    Cookie,
    Other(String),
}

impl Category {
    /// Categories offered as filters, in display order.
    pub const KNOWN: [Category; 4] = [
        Category::Bread,
        Category::Pastry,
        Category::Cake,
        Category::Cookie,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Bread => "bread",
            Category::Pastry => "pastry",
            Category::Cake => "cake",
            Category::Cookie => "cookie",
            Category::Other(raw) => raw.as_str(),
        }
    }

    /// Human-facing label ("Bread", "Pastry", ...).
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl FromStr for Category {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let category = match s.trim().to_ascii_lowercase().as_str() {
            "bread" => Category::Bread,
            "pastry" => Category::Pastry,
            "cake" => Category::Cake,
            "cookie" => Category::Cookie,
            _ => Category::Other(s.trim().to_string()),
        };
        Ok(category)
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let Ok(category) = raw.parse::<Category>();
        Ok(category)
    }
}

/// A purchasable product as returned by `GET /api/products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Price,
    pub category: Category,
}

/// Which slice of the catalog to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            // Service categories outside the known four keep their casing.
            CategoryFilter::Only(category) => product
                .category
                .as_str()
                .eq_ignore_ascii_case(category.as_str()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            CategoryFilter::All => "All".to_string(),
            CategoryFilter::Only(category) => category.label(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        let Ok(category) = s.parse::<Category>();
        Ok(CategoryFilter::Only(category))
    }
}

/// Products matching `filter`, in catalog order.
pub fn filter_by_category<'a>(
    products: &'a [Product],
    filter: &CategoryFilter,
) -> Vec<&'a Product> {
    products.iter().filter(|p| filter.matches(p)).collect()
}
