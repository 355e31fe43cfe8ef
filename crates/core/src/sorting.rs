//! View-time ordering of the product list.
//!
//! Sorting never touches stored order: [`sort_products`] returns a new
//! vector of references over a snapshot.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// How the product list is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    #[default]
    Name,
    NameDesc,
    Count,
    CountDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [Self::Name, Self::NameDesc, Self::Count, Self::CountDesc];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Alphabetical (A-Z)",
            Self::NameDesc => "Alphabetical (Z-A)",
            Self::Count => "Count (Low to High)",
            Self::CountDesc => "Count (High to Low)",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Name => compare_names(&a.name, &b.name),
            Self::NameDesc => compare_names(&b.name, &a.name),
            Self::Count => a.count.cmp(&b.count),
            Self::CountDesc => b.count.cmp(&a.count),
        }
    }
}

/// Case-insensitive first, case-sensitive as a tiebreak.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Stable sort of `products` by `mode`.
pub fn sort_products(products: &[Product], mode: SortMode) -> Vec<&Product> {
    let mut sorted: Vec<&Product> = products.iter().collect();
    sorted.sort_by(|a, b| mode.compare(a, b));
    sorted
}
