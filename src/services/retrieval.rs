use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{NetworkProfile, SimilarityScore, UserObjective, UserProfileInfo};

/// Errors that can occur when talking to the retrieval service
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// One row of the retrieval service's response
#[derive(Debug, Deserialize)]
struct ScoreRow {
    profile_id: String,
    similarity: f64,
    #[serde(default)]
    rank: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ScoresResponse {
    scores: Vec<ScoreRow>,
}

/// Client for the vector-similarity retrieval service
///
/// The embedding model lives behind this endpoint and is warmed up there
/// once; this core only consumes similarity scores and ranks. Constructed
/// once at startup and shared.
pub struct RetrievalClient {
    base_url: String,
    client: Client,
}

impl RetrievalClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    /// Fetch similarity scores for all candidates
    ///
    /// Returns `{profile_id: SimilarityScore}`. Candidates the service does
    /// not mention are simply absent from the map; the orchestrator treats
    /// them as similarity 0 with no rank. Similarity values are clamped
    /// into [0, 100].
    pub async fn similarity_scores(
        &self,
        user_profile: &UserProfileInfo,
        user_objective: &UserObjective,
        candidates: &[NetworkProfile],
    ) -> Result<HashMap<String, SimilarityScore>, RetrievalError> {
        let url = format!("{}/retrieval/scores", self.base_url.trim_end_matches('/'));

        tracing::debug!(
            "Requesting similarity scores for {} candidates",
            candidates.len()
        );

        let payload = serde_json::json!({
            "user_profile": user_profile,
            "user_objective": user_objective,
            "candidates": candidates,
        });

        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(RetrievalError::ApiError(format!(
                "Failed to fetch similarity scores: {}",
                response.status()
            )));
        }

        let body: ScoresResponse = response
            .json()
            .await
            .map_err(|e| RetrievalError::InvalidResponse(format!("Failed to parse scores: {}", e)))?;

        let scores = body
            .scores
            .into_iter()
            .map(|row| {
                (
                    row.profile_id,
                    SimilarityScore {
                        similarity: row.similarity.clamp(0.0, 100.0),
                        rank: row.rank,
                    },
                )
            })
            .collect();

        Ok(scores)
    }
}
