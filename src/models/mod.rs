use serde::{Deserialize, Serialize};
use std::fmt::Display;

mod product;
mod user_profile;

pub use product::{Candidate, ProductContext, Variant};
pub use user_profile::{PreferenceWeights, UserProfile, ViewedProduct, MAX_VIEWED_PRODUCTS};

/// Which resolution path produced a recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceTag {
    /// Ranked by the remote ranking service
    Ai,
    /// Ranked by the local signal scorer
    Local,
}

impl Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceTag::Ai => write!(f, "ai"),
            SourceTag::Local => write!(f, "local"),
        }
    }
}

/// A recommended catalog product, ready for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    #[serde(flatten)]
    pub candidate: Candidate,
    /// Resolved display image, never empty
    pub display_image: String,
    pub source: SourceTag,
}

impl RecommendationResult {
    pub fn id(&self) -> &str {
        &self.candidate.id
    }
}

// ============================================================================
// Remote Ranking Service Types
// ============================================================================

/// Bare reference to a catalog product returned by the remote ranking service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteCandidateRef {
    pub id: String,
}

impl RemoteCandidateRef {
    /// Extracts a reference from one raw recommendation entry
    ///
    /// Returns `None` when the entry has no usable `id`. String and numeric ids
    /// are accepted; every other field is ignored.
    pub fn from_value(entry: &serde_json::Value) -> Option<Self> {
        match entry.get("id")? {
            serde_json::Value::String(id) if !id.trim().is_empty() => Some(Self {
                id: id.trim().to_string(),
            }),
            serde_json::Value::Number(id) => Some(Self { id: id.to_string() }),
            _ => None,
        }
    }
}

/// Request body sent to the remote ranking service
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRequest<'a> {
    pub current_product: &'a ProductContext,
    pub user_preferences: RankingPreferences<'a>,
    pub limit: usize,
}

/// The slice of a [`UserProfile`] shared with the remote ranking service
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingPreferences<'a> {
    pub search_history: &'a [String],
    pub viewed_products: &'a [ViewedProduct],
    pub category_preferences: &'a PreferenceWeights,
    pub color_preferences: &'a PreferenceWeights,
}

impl<'a> RankingRequest<'a> {
    pub fn new(context: &'a ProductContext, profile: &'a UserProfile, limit: usize) -> Self {
        Self {
            current_product: context,
            user_preferences: RankingPreferences {
                search_history: &profile.search_history,
                viewed_products: profile.recent_views(),
                category_preferences: &profile.category_preferences,
                color_preferences: &profile.color_preferences,
            },
            limit,
        }
    }
}

/// Raw response from the remote ranking service
///
/// Entries are kept as raw JSON so that one malformed entry does not fail the batch.
#[derive(Debug, Clone, Deserialize)]
pub struct RankingResponse {
    pub success: bool,
    #[serde(default)]
    pub recommendations: Vec<serde_json::Value>,
    /// Echoed by some deployments; not trusted
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RankingResponse {
    /// References for every entry carrying a usable id, in response order
    pub fn candidate_refs(&self) -> Vec<RemoteCandidateRef> {
        self.recommendations
            .iter()
            .filter_map(|entry| {
                let parsed = RemoteCandidateRef::from_value(entry);
                if parsed.is_none() {
                    tracing::debug!(entry = %entry, "Dropping ranking entry without id");
                }
                parsed
            })
            .collect()
    }
}
