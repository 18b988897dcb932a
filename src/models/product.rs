use serde::{Deserialize, Serialize};

/// The product currently being viewed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductContext {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    /// Listed price; zero or non-finite disables price proximity scoring
    #[serde(default)]
    pub price: f64,
    /// Color names drawn from the product's variants
    #[serde(default)]
    pub colors: Vec<String>,
}

impl From<&Candidate> for ProductContext {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id.clone(),
            name: candidate.name.clone(),
            category: candidate.category.clone(),
            description: candidate.description.clone().unwrap_or_default(),
            price: candidate.price,
            colors: candidate.colors().map(str::to_string).collect(),
        }
    }
}

/// A catalog product eligible for recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    /// Direct image reference on the product itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// A purchasable variant of a catalog product
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Candidate {
    /// Creates a candidate with no description, image or variants
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            description: None,
            price,
            image: None,
            variants: Vec::new(),
        }
    }

    /// Iterates over the color names carried by this candidate's variants
    pub fn colors(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().filter_map(|v| v.color.as_deref())
    }

    /// Lowercased `name + description + category`, used for search-term matching
    pub fn search_text(&self) -> String {
        format!(
            "{}{}{}",
            self.name,
            self.description.as_deref().unwrap_or_default(),
            self.category
        )
        .to_lowercase()
    }
}
