// Local signal scorer
//
// Deterministic fallback ranking used whenever the remote ranking service
// yields nothing. Each signal contributes a fixed integer weight when it
// triggers; candidates are ordered by total score, ties keep catalog order.

use std::collections::HashSet;

use crate::models::{Candidate, ProductContext, UserProfile};
use tracing::debug;

/// Number of highest-weighted categories that count as preferred
pub const TOP_CATEGORIES: usize = 3;
/// Number of highest-weighted colors that count as preferred
pub const TOP_COLORS: usize = 5;
/// Maximum relative price difference for the price proximity signal
pub const PRICE_TOLERANCE: f64 = 0.20;

/// One scoring rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Same category as the viewed product
    CategoryMatch,
    /// Category is among the user's top categories
    PreferredCategory,
    /// Price within [`PRICE_TOLERANCE`] of the viewed product
    PriceProximity,
    /// A variant color is among the user's top colors
    ColorOverlap,
    /// A past search term appears in name, description or category
    SearchHistory,
}

impl Signal {
    pub const ALL: [Signal; 5] = [
        Signal::CategoryMatch,
        Signal::PreferredCategory,
        Signal::PriceProximity,
        Signal::ColorOverlap,
        Signal::SearchHistory,
    ];
}

/// Weight table for the local scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalWeights {
    pub category_match: u32,
    pub preferred_category: u32,
    pub price_proximity: u32,
    pub color_overlap: u32,
    pub search_history: u32,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            category_match: 100,
            preferred_category: 50,
            price_proximity: 30,
            color_overlap: 20,
            search_history: 15,
        }
    }
}

impl SignalWeights {
    pub fn weight(&self, signal: Signal) -> u32 {
        match signal {
            Signal::CategoryMatch => self.category_match,
            Signal::PreferredCategory => self.preferred_category,
            Signal::PriceProximity => self.price_proximity,
            Signal::ColorOverlap => self.color_overlap,
            Signal::SearchHistory => self.search_history,
        }
    }
}

/// A catalog candidate with its local score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub candidate: &'a Candidate,
    pub score: u32,
    /// Position in the input catalog, the tie-break key
    pub position: usize,
}

/// Per-request view of the profile, computed once per scoring pass
struct ScoringInputs<'a> {
    context: &'a ProductContext,
    top_categories: Vec<&'a str>,
    top_colors: Vec<&'a str>,
    search_terms: Vec<String>,
}

impl<'a> ScoringInputs<'a> {
    fn new(context: &'a ProductContext, profile: &'a UserProfile) -> Self {
        Self {
            context,
            top_categories: profile.category_preferences.top(TOP_CATEGORIES),
            top_colors: profile.color_preferences.top(TOP_COLORS),
            search_terms: profile
                .search_history
                .iter()
                .map(|term| term.trim().to_lowercase())
                // a blank term would match every candidate
                .filter(|term| !term.is_empty())
                .collect(),
        }
    }

    fn triggers(&self, signal: Signal, candidate: &Candidate) -> bool {
        match signal {
            Signal::CategoryMatch => candidate.category == self.context.category,
            Signal::PreferredCategory => self
                .top_categories
                .iter()
                .any(|category| *category == candidate.category),
            Signal::PriceProximity => price_is_close(self.context.price, candidate.price),
            Signal::ColorOverlap => candidate
                .colors()
                .any(|color| self.top_colors.iter().any(|top| *top == color)),
            Signal::SearchHistory => {
                if self.search_terms.is_empty() {
                    return false;
                }
                let text = candidate.search_text();
                self.search_terms.iter().any(|term| text.contains(term.as_str()))
            }
        }
    }
}

fn price_is_close(reference: f64, price: f64) -> bool {
    if !reference.is_finite() || reference <= 0.0 || !price.is_finite() {
        return false;
    }
    (price - reference).abs() / reference <= PRICE_TOLERANCE
}

/// Deterministic multi-signal scorer
#[derive(Debug, Clone, Default)]
pub struct LocalScorer {
    weights: SignalWeights,
}

impl LocalScorer {
    /// Create a scorer with the default weight table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom weights
    pub fn with_weights(weights: SignalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &SignalWeights {
        &self.weights
    }

    /// Ranks the catalog for `context`, best first, at most `limit` entries
    ///
    /// The viewed product itself is never included. When the catalog repeats an
    /// id, only its first entry is scored.
    pub fn rank<'a>(
        &self,
        context: &ProductContext,
        catalog: &'a [Candidate],
        profile: &UserProfile,
        limit: usize,
    ) -> Vec<ScoredCandidate<'a>> {
        let inputs = ScoringInputs::new(context, profile);
        let mut seen: HashSet<&str> = HashSet::new();

        let mut scored: Vec<ScoredCandidate<'a>> = catalog
            .iter()
            .enumerate()
            .filter(|(_, candidate)| candidate.id != context.id)
            .filter(|&(_, candidate)| seen.insert(candidate.id.as_str()))
            .map(|(position, candidate)| ScoredCandidate {
                candidate,
                score: self.score_candidate(&inputs, candidate),
                position,
            })
            .collect();

        // Stable sort: equal scores keep catalog order
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(limit);

        debug!(
            product_id = %context.id,
            catalog_size = catalog.len(),
            output_count = scored.len(),
            "Local ranking completed"
        );

        scored
    }

    /// Ranks the catalog and returns owned candidates
    pub fn score(
        &self,
        context: &ProductContext,
        catalog: &[Candidate],
        profile: &UserProfile,
        limit: usize,
    ) -> Vec<Candidate> {
        self.rank(context, catalog, profile, limit)
            .into_iter()
            .map(|scored| scored.candidate.clone())
            .collect()
    }

    /// Signals that fire for one candidate, in table order
    pub fn signals(
        &self,
        context: &ProductContext,
        candidate: &Candidate,
        profile: &UserProfile,
    ) -> Vec<Signal> {
        let inputs = ScoringInputs::new(context, profile);
        Signal::ALL
            .into_iter()
            .filter(|signal| inputs.triggers(*signal, candidate))
            .collect()
    }

    fn score_candidate(&self, inputs: &ScoringInputs<'_>, candidate: &Candidate) -> u32 {
        Signal::ALL
            .into_iter()
            .filter(|signal| inputs.triggers(*signal, candidate))
            .map(|signal| self.weights.weight(signal))
            .sum()
    }
}
