use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::models::{NetworkProfile, UserObjective, UserProfileInfo};

/// Sampling temperature for remote completions
const TEMPERATURE: f64 = 0.3;
/// Completion budget; the prompt asks for a single sentence
const MAX_COMPLETION_TOKENS: u32 = 60;

/// Errors from one remote reason attempt
///
/// These never leave the generator; a failed attempt is logged and the chain
/// advances to the next backend or the fallback.
#[derive(Debug, Error)]
pub enum ReasonError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend returned status: {0}")]
    Status(reqwest::StatusCode),

    #[error("backend returned an empty completion")]
    EmptyCompletion,

    #[error("no API token configured")]
    MissingToken,
}

/// Which backends the attempt chain may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Primary, then secondary, then fallback
    Auto,
    /// Pin to the local inference server only
    Ollama,
    /// Pin to the hosted inference API only
    Hf,
    /// Skip remote backends entirely
    None,
}

impl Default for BackendMode {
    fn default() -> Self {
        BackendMode::Auto
    }
}

/// Reason generator configuration, embedded in the service settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReasonerConfig {
    #[serde(default)]
    pub backend: BackendMode,
    #[serde(default = "default_ollama_host")]
    pub ollama_host: String,
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,
    #[serde(default)]
    pub hf_api_token: Option<String>,
    #[serde(default = "default_hf_model")]
    pub hf_model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "mistral".to_string()
}

fn default_hf_model() -> String {
    "mistralai/Mistral-7B-Instruct-v0.2".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            backend: BackendMode::default(),
            ollama_host: default_ollama_host(),
            ollama_model: default_ollama_model(),
            hf_api_token: None,
            hf_model: default_hf_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Backend {
    Ollama,
    HuggingFace,
}

impl Backend {
    fn name(&self) -> &'static str {
        match self {
            Backend::Ollama => "ollama",
            Backend::HuggingFace => "huggingface",
        }
    }
}

/// Generates a one-sentence match justification per candidate
///
/// Remote backends are tried in a fixed order with a per-call timeout; any
/// failure advances the chain. The deterministic fallback requires no remote
/// call, so `generate` always returns a non-empty string and never blocks
/// the pipeline on backend unavailability.
pub struct ReasonGenerator {
    config: ReasonerConfig,
    client: Client,
}

impl ReasonGenerator {
    pub fn new(config: ReasonerConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Ordered attempt chain for the configured mode
    fn chain(&self) -> Vec<Backend> {
        match self.config.backend {
            BackendMode::Auto => vec![Backend::Ollama, Backend::HuggingFace],
            BackendMode::Ollama => vec![Backend::Ollama],
            BackendMode::Hf => vec![Backend::HuggingFace],
            BackendMode::None => vec![],
        }
    }

    /// Generate a match reason. Always returns a non-empty string.
    pub async fn generate(
        &self,
        user_profile: &UserProfileInfo,
        user_objective: &UserObjective,
        candidate: &NetworkProfile,
        kg_signals: &[String],
        kg_score: f64,
        similarity_score: f64,
    ) -> String {
        let prompt = build_prompt(
            user_profile,
            user_objective,
            candidate,
            kg_signals,
            kg_score,
            similarity_score,
        );

        for backend in self.chain() {
            let attempt = match backend {
                Backend::Ollama => self.call_ollama(&prompt).await,
                Backend::HuggingFace => self.call_hugging_face(&prompt).await,
            };

            match attempt {
                Ok(reason) => return reason,
                Err(e) => {
                    tracing::warn!(
                        "{} reason attempt failed for {}: {}",
                        backend.name(),
                        candidate.profile_id,
                        e
                    );
                }
            }
        }

        fallback_reason(kg_signals, kg_score, similarity_score)
    }

    async fn call_ollama(&self, prompt: &str) -> Result<String, ReasonError> {
        let payload = serde_json::json!({
            "model": self.config.ollama_model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": TEMPERATURE,
                "num_predict": MAX_COMPLETION_TOKENS,
            },
        });

        let url = format!(
            "{}/api/generate",
            self.config.ollama_host.trim_end_matches('/')
        );
        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(ReasonError::Status(response.status()));
        }

        let json: Value = response.json().await?;
        let text = json
            .get("response")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(ReasonError::EmptyCompletion);
        }
        Ok(text)
    }

    async fn call_hugging_face(&self, prompt: &str) -> Result<String, ReasonError> {
        let token = self
            .config
            .hf_api_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ReasonError::MissingToken)?;

        let payload = serde_json::json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": MAX_COMPLETION_TOKENS,
                "temperature": TEMPERATURE,
                "return_full_text": false,
            },
        });

        let url = format!(
            "https://api-inference.huggingface.co/models/{}",
            self.config.hf_model
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReasonError::Status(response.status()));
        }

        let json: Value = response.json().await?;
        let text = json
            .as_array()
            .and_then(|rows| rows.first())
            .and_then(|row| row.get("generated_text"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(ReasonError::EmptyCompletion);
        }
        Ok(text)
    }
}

/// Deterministic reason used when every remote attempt fails or none is
/// configured. Always non-empty.
pub fn fallback_reason(kg_signals: &[String], kg_score: f64, similarity_score: f64) -> String {
    if let Some(top) = kg_signals.first() {
        let combined = ((kg_score + similarity_score) / 2.0).round();
        return format!(
            "Strong match based on {} with a combined alignment score of {:.0}/100.",
            top.to_lowercase(),
            combined
        );
    }
    "Candidate aligns semantically with the target profile.".to_string()
}

/// Package the full match context into a single instruction prompt
fn build_prompt(
    user_profile: &UserProfileInfo,
    user_objective: &UserObjective,
    candidate: &NetworkProfile,
    kg_signals: &[String],
    kg_score: f64,
    similarity_score: f64,
) -> String {
    let user_skills = user_profile
        .top_skills
        .iter()
        .map(|s| s.skill.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let sought_titles = user_objective
        .target_profiles
        .iter()
        .flat_map(|tp| tp.titles.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(", ");
    let success_signals = user_objective.success_signals.join(", ");
    let signals_text = if kg_signals.is_empty() {
        "none".to_string()
    } else {
        kg_signals.join("; ")
    };

    format!(
        "<s>[INST]\n\
         You are an AI networking assistant. Given the context below, write a single concise sentence\n\
         (max 25 words) explaining why this candidate is a good match for the user's objective.\n\
         Be specific. Do not repeat the candidate's name in the reason.\n\
         \n\
         USER CONTEXT\n\
         \x20 Goal: {goal}\n\
         \x20 Seeking: {sought_titles}\n\
         \x20 User skills: {user_skills}\n\
         \x20 Success signals: {success_signals}\n\
         \n\
         CANDIDATE\n\
         \x20 Title: {title}\n\
         \x20 Company: {company}\n\
         \x20 Industry: {industry}\n\
         \x20 Skills: {skills}\n\
         \x20 Summary: {summary}\n\
         \n\
         MATCH SIGNALS (from knowledge graph): {signals}\n\
         KG Score: {kg:.1}/100   Semantic Score: {sim:.1}/100\n\
         \n\
         Respond with ONLY the reason sentence, nothing else.\n\
         [/INST]",
        goal = user_objective.primary_goal,
        sought_titles = sought_titles,
        user_skills = user_skills,
        success_signals = success_signals,
        title = candidate.title,
        company = candidate.company.as_deref().unwrap_or("N/A"),
        industry = candidate.industry.as_deref().unwrap_or("N/A"),
        skills = candidate.skills.join(", "),
        summary = candidate.summary.as_deref().unwrap_or("N/A"),
        signals = signals_text,
        kg = kg_score,
        sim = similarity_score,
    )
}
