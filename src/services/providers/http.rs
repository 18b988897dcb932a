/// HTTP ranking provider
///
/// Posts the viewed product and a reduced user profile to the remote ranking
/// service and maps the answer to catalog references.
///
/// API Flow:
/// 1. POST {api_url}/recommendations with `currentProduct`, `userPreferences`, `limit`
/// 2. Response `{ success, recommendations: [{ id, .. }], source? }`
///
/// The whole exchange, body included, runs under one timeout.
use crate::{
    error::RankingError,
    models::{ProductContext, RankingRequest, RankingResponse, RemoteCandidateRef, UserProfile},
    services::providers::RankingProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct HttpRankingProvider {
    http_client: HttpClient,
    api_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpRankingProvider {
    /// Creates a provider with a shared HTTP client
    pub fn new(api_url: String, api_key: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http_client = HttpClient::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// One unbounded request/response exchange
    async fn request_ranking(
        &self,
        context: &ProductContext,
        profile: &UserProfile,
        limit: usize,
    ) -> Result<Vec<RemoteCandidateRef>, RankingError> {
        let url = format!("{}/recommendations", self.api_url);

        let mut request = self
            .http_client
            .post(&url)
            .json(&RankingRequest::new(context, profile, limit));

        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RankingError::Protocol(format!(
                "Ranking service returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        parse_ranking_response(&body)
    }
}

/// Maps a raw response body to catalog references
fn parse_ranking_response(body: &str) -> Result<Vec<RemoteCandidateRef>, RankingError> {
    let response: RankingResponse = serde_json::from_str(body).map_err(|e| {
        tracing::debug!(error = %e, response = %body, "Failed to deserialize ranking response");
        RankingError::Protocol(format!("Failed to parse ranking response: {}", e))
    })?;

    if !response.success {
        return Err(RankingError::Protocol(
            response
                .error
                .unwrap_or_else(|| "Ranking service reported failure".to_string()),
        ));
    }

    let refs = response.candidate_refs();
    if refs.is_empty() {
        return Err(RankingError::EmptyResult);
    }

    Ok(refs)
}

#[async_trait::async_trait]
impl RankingProvider for HttpRankingProvider {
    async fn fetch_ranking(
        &self,
        context: &ProductContext,
        profile: &UserProfile,
        limit: usize,
    ) -> Result<Vec<RemoteCandidateRef>, RankingError> {
        let refs = tokio::time::timeout(self.timeout, self.request_ranking(context, profile, limit))
            .await
            .map_err(|_| RankingError::Timeout(self.timeout))??;

        tracing::info!(
            product_id = %context.id,
            results = refs.len(),
            provider = self.name(),
            "Remote ranking fetched"
        );

        Ok(refs)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
