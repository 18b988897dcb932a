/// Remote ranking provider abstraction
///
/// The recommender talks to the remote ranking service only through this trait,
/// which keeps the fallback policy independent of transport and lets tests swap
/// in a scripted provider.
use crate::{
    error::RankingError,
    models::{ProductContext, RemoteCandidateRef, UserProfile},
};

pub mod http;

pub use http::HttpRankingProvider;

/// Trait for remote ranking providers
///
/// Implementations make at most one bounded attempt per call and report every
/// failure as a [`RankingError`]; they never retry. Callers decide policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RankingProvider: Send + Sync {
    /// Fetch a ranked list of catalog references for the viewed product
    ///
    /// A successful result is non-empty; a well-formed response without usable
    /// entries is reported as [`RankingError::EmptyResult`].
    async fn fetch_ranking(
        &self,
        context: &ProductContext,
        profile: &UserProfile,
        limit: usize,
    ) -> Result<Vec<RemoteCandidateRef>, RankingError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
