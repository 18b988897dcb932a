use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ProductContext;

/// Maximum number of recently viewed products kept on a profile
pub const MAX_VIEWED_PRODUCTS: usize = 10;

/// A recently viewed product, reduced to what ranking needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewedProduct {
    pub id: String,
    pub name: String,
    pub category: String,
}

impl From<&ProductContext> for ViewedProduct {
    fn from(product: &ProductContext) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
        }
    }
}

/// Insertion-ordered map from a name (category or color) to a non-negative weight
///
/// Order matters: when two names carry the same weight, the one inserted first
/// ranks higher in [`PreferenceWeights::top`]. Deserialization keeps JSON
/// document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, f64>")]
pub struct PreferenceWeights(IndexMap<String, f64>);

impl PreferenceWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weight for a name, keeping its original position if already present
    ///
    /// Negative and non-finite weights are stored as zero.
    pub fn insert(&mut self, name: impl Into<String>, weight: f64) {
        let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
        self.0.insert(name.into(), weight);
    }

    /// Adds `amount` to a name's weight, inserting it at the end if absent
    pub fn bump(&mut self, name: &str, amount: f64) {
        let current = self.get(name).unwrap_or(0.0);
        self.insert(name, current + amount);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(n, w)| (n.as_str(), *w))
    }

    /// Returns the `n` highest-weighted names; ties keep insertion order
    pub fn top(&self, n: usize) -> Vec<&str> {
        let mut entries: Vec<(&str, f64)> = self.iter().collect();
        // sort_by is stable, which is what breaks ties by insertion order
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        entries.into_iter().take(n).map(|(name, _)| name).collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PreferenceWeights {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut weights = Self::new();
        for (name, weight) in iter {
            weights.insert(name, weight);
        }
        weights
    }
}

impl From<IndexMap<String, f64>> for PreferenceWeights {
    fn from(raw: IndexMap<String, f64>) -> Self {
        raw.into_iter().collect()
    }
}

/// Behavioral signals for the requesting user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// Past free-text search terms, oldest first
    pub search_history: Vec<String>,
    /// Recently viewed products, most recent first
    pub viewed_products: Vec<ViewedProduct>,
    pub category_preferences: PreferenceWeights,
    pub color_preferences: PreferenceWeights,
}

impl UserProfile {
    /// Creates an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a search term, ignoring blanks
    pub fn record_search(&mut self, term: &str) {
        let term = term.trim();
        if !term.is_empty() {
            self.search_history.push(term.to_string());
        }
    }

    /// Records a product view
    ///
    /// Moves the product to the front of the viewed list, caps the list, and
    /// bumps the product's category and colors by one.
    pub fn record_view(&mut self, product: &ProductContext) {
        self.viewed_products.retain(|v| v.id != product.id);
        self.viewed_products.insert(0, ViewedProduct::from(product));
        self.viewed_products.truncate(MAX_VIEWED_PRODUCTS);

        self.category_preferences.bump(&product.category, 1.0);
        for color in &product.colors {
            self.color_preferences.bump(color, 1.0);
        }
    }

    /// The most recent views, never more than [`MAX_VIEWED_PRODUCTS`]
    pub fn recent_views(&self) -> &[ViewedProduct] {
        let len = self.viewed_products.len().min(MAX_VIEWED_PRODUCTS);
        &self.viewed_products[..len]
    }
}
