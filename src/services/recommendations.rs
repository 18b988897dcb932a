use std::{future::Future, sync::Arc, time::Instant};

use crate::{
    error::RankingError,
    models::{Candidate, ProductContext, RecommendationResult, SourceTag, UserProfile},
    services::{providers::RankingProvider, reconciler::reconcile, scorer::LocalScorer},
};

/// Number of recommendations returned when the caller does not choose
pub const DEFAULT_LIMIT: usize = 4;

/// Outcome of one resolution
///
/// Every recommendation carries `source`; a resolution is never a mix of paths.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub source: SourceTag,
    pub recommendations: Vec<RecommendationResult>,
}

/// Resolves related products for a viewed product
///
/// Tries the remote ranking provider once, and on any failure or empty answer
/// ranks the catalog locally. Both paths finish through the reconciler, so
/// results always carry full catalog data and a display image. Resolution never
/// fails; the worst outcome is an empty list.
pub struct Recommender {
    provider: Arc<dyn RankingProvider>,
    scorer: LocalScorer,
}

impl Recommender {
    pub fn new(provider: Arc<dyn RankingProvider>) -> Self {
        Self {
            provider,
            scorer: LocalScorer::new(),
        }
    }

    /// Replaces the local fallback scorer
    pub fn with_scorer(mut self, scorer: LocalScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Returns at most `limit` recommendations for `context`
    pub async fn resolve(
        &self,
        context: &ProductContext,
        catalog: &[Candidate],
        profile: &UserProfile,
        limit: usize,
    ) -> Vec<RecommendationResult> {
        self.resolve_detailed(context, catalog, profile, limit)
            .await
            .recommendations
    }

    /// Like [`Recommender::resolve`], also reporting which path answered
    pub async fn resolve_detailed(
        &self,
        context: &ProductContext,
        catalog: &[Candidate],
        profile: &UserProfile,
        limit: usize,
    ) -> Resolution {
        self.resolve_until(context, catalog, profile, limit, std::future::pending())
            .await
    }

    /// Resolves with the remote call bound to `cancelled`
    ///
    /// If `cancelled` completes first, the in-flight remote call is dropped and
    /// resolution continues on the local path as if the call had failed.
    pub async fn resolve_until<C>(
        &self,
        context: &ProductContext,
        catalog: &[Candidate],
        profile: &UserProfile,
        limit: usize,
        cancelled: C,
    ) -> Resolution
    where
        C: Future<Output = ()>,
    {
        if limit == 0 || catalog.is_empty() {
            tracing::debug!(
                product_id = %context.id,
                limit = limit,
                catalog_size = catalog.len(),
                "Nothing to recommend"
            );
            return Resolution {
                source: SourceTag::Local,
                recommendations: Vec::new(),
            };
        }

        let start = Instant::now();

        let remote = tokio::select! {
            result = self.provider.fetch_ranking(context, profile, limit) => result,
            _ = cancelled => Err(RankingError::Cancelled),
        };

        // A ranking that only names the viewed product is as good as empty
        let remote = remote.and_then(|refs| {
            let ids: Vec<String> = refs
                .into_iter()
                .map(|r| r.id)
                .filter(|id| *id != context.id)
                .collect();
            if ids.is_empty() {
                Err(RankingError::EmptyResult)
            } else {
                Ok(ids)
            }
        });

        let (source, recommendations) = match remote {
            Ok(ids) => {
                let recommendations = reconcile(&ids, catalog, SourceTag::Ai, limit);
                if recommendations.len() < ids.len().min(limit) {
                    tracing::debug!(
                        product_id = %context.id,
                        requested = ids.len(),
                        matched = recommendations.len(),
                        "Remote ranking referenced products missing from catalog"
                    );
                }
                (SourceTag::Ai, recommendations)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = self.provider.name(),
                    product_id = %context.id,
                    "Remote ranking unavailable, falling back to local scoring"
                );
                let ranked = self.scorer.rank(context, catalog, profile, limit);
                let recommendations = reconcile(
                    ranked.iter().map(|scored| scored.candidate.id.as_str()),
                    catalog,
                    SourceTag::Local,
                    limit,
                );
                (SourceTag::Local, recommendations)
            }
        };

        tracing::info!(
            product_id = %context.id,
            source = %source,
            count = recommendations.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Recommendations resolved"
        );

        Resolution {
            source,
            recommendations,
        }
    }
}
