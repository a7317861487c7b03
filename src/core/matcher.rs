use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::core::graph::{build_graph, user_node_id};
use crate::core::scoring::score_candidates;
use crate::models::{
    BlendWeights, NetworkProfile, ScoredMatch, SimilarityScore, UserObjective, UserProfileInfo,
};
use crate::services::ReasonGenerator;

/// Failure of the orchestration itself, surfaced as one aggregate error for
/// the whole request. Per-candidate backend failures never end up here; they
/// are recovered inside the reason generator.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("reason generation task failed: {0}")]
    ReasonTask(#[from] tokio::task::JoinError),
}

/// Result of the matching pipeline
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
}

/// Blend orchestrator
///
/// # Pipeline Stages
/// 1. Knowledge graph construction and structural scoring (shared graph)
/// 2. Blend with the externally supplied similarity scores
/// 3. Concurrent reason generation, one task per candidate
/// 4. Threshold filter and stable descending sort
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: BlendWeights,
    min_score: f64,
}

impl Matcher {
    pub fn new(weights: BlendWeights, min_score: f64) -> Self {
        Self { weights, min_score }
    }

    pub fn with_default_weights() -> Self {
        Self::new(BlendWeights::default(), 0.0)
    }

    /// Run the full pipeline for one request
    ///
    /// Candidates missing from `similarity` default to similarity 0 with no
    /// rank. An empty candidate list returns immediately without building a
    /// graph or issuing remote calls.
    pub async fn run(
        &self,
        user_profile: UserProfileInfo,
        user_objective: UserObjective,
        candidates: Vec<NetworkProfile>,
        similarity: HashMap<String, SimilarityScore>,
        reasoner: Arc<ReasonGenerator>,
    ) -> Result<MatchResult, MatchError> {
        let total_candidates = candidates.len();
        if candidates.is_empty() {
            return Ok(MatchResult {
                matches: Vec::new(),
                total_candidates: 0,
            });
        }

        tracing::info!(
            "Stage 1: knowledge graph scoring for {} candidates",
            total_candidates
        );
        let graph = build_graph(&user_profile, &user_objective, &candidates);
        let user_id = user_node_id(&user_objective.person_id);
        let mut kg_results = score_candidates(&graph, &user_id, &candidates);
        drop(graph);

        tracing::info!("Stage 2: blending scores and generating reasons");
        let user_profile = Arc::new(user_profile);
        let user_objective = Arc::new(user_objective);

        let mut tasks = Vec::with_capacity(total_candidates);
        for candidate in candidates {
            let (kg_score, signals) = kg_results
                .remove(&candidate.profile_id)
                .unwrap_or((0.0, Vec::new()));
            let sim = similarity
                .get(&candidate.profile_id)
                .copied()
                .unwrap_or_default();
            let final_score = round_two(
                self.weights.knowledge * kg_score + self.weights.semantic * sim.similarity,
            );

            let reasoner = Arc::clone(&reasoner);
            let user_profile = Arc::clone(&user_profile);
            let user_objective = Arc::clone(&user_objective);
            tasks.push(tokio::spawn(async move {
                let reason = reasoner
                    .generate(
                        &user_profile,
                        &user_objective,
                        &candidate,
                        &signals,
                        kg_score,
                        sim.similarity,
                    )
                    .await;

                ScoredMatch {
                    profile_id: candidate.profile_id,
                    name: candidate.name,
                    score: final_score,
                    reason,
                    kg_signals: signals,
                    retrieval_rank: sim.rank,
                }
            }));
        }

        let mut matches = Vec::with_capacity(total_candidates);
        for task in tasks {
            matches.push(task.await?);
        }

        matches.retain(|m| m.score >= self.min_score);
        // Stable sort keeps tied candidates in input order
        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::info!("Matching complete, {} candidates retained", matches.len());
        Ok(MatchResult {
            matches,
            total_candidates,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Round to two decimal places
#[inline]
pub fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, SkillEntry, TargetProfile};
    use crate::services::reasoner::{BackendMode, ReasonerConfig};

    fn offline_reasoner() -> Arc<ReasonGenerator> {
        Arc::new(ReasonGenerator::new(ReasonerConfig {
            backend: BackendMode::None,
            ..ReasonerConfig::default()
        }))
    }

    fn user_profile() -> UserProfileInfo {
        UserProfileInfo {
            current_role: Role {
                title: "Founder".to_string(),
                company: None,
                location: None,
            },
            previous_roles: vec![],
            top_skills: vec![SkillEntry {
                skill: "python".to_string(),
                applied_in: None,
            }],
            solutions_offered: vec![],
            career_highlights: vec![],
        }
    }

    fn objective() -> UserObjective {
        UserObjective {
            person_id: "u1".to_string(),
            primary_goal: "Hire a data lead".to_string(),
            secondary_goals: vec![],
            target_profiles: vec![TargetProfile {
                profile_type: "hire".to_string(),
                titles: vec![],
                why: None,
            }],
            exclude: vec![],
            success_signals: vec![],
        }
    }

    fn candidate(id: &str, skills: &[&str]) -> NetworkProfile {
        NetworkProfile {
            profile_id: id.to_string(),
            name: format!("Candidate {}", id),
            title: "Analyst".to_string(),
            company: None,
            industry: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            summary: None,
        }
    }

    #[test]
    fn round_two_rounds_to_cents() {
        assert_eq!(round_two(49.994), 49.99);
        assert_eq!(round_two(49.996), 50.0);
        assert_eq!(round_two(0.45 * 15.0), 6.75);
    }

    #[tokio::test]
    async fn empty_candidates_return_empty_result() {
        let matcher = Matcher::with_default_weights();
        let result = matcher
            .run(
                user_profile(),
                objective(),
                vec![],
                HashMap::new(),
                offline_reasoner(),
            )
            .await
            .unwrap();

        assert!(result.matches.is_empty());
        assert_eq!(result.total_candidates, 0);
    }

    #[tokio::test]
    async fn final_score_is_weighted_blend() {
        let matcher = Matcher::with_default_weights();
        let mut similarity = HashMap::new();
        similarity.insert(
            "c1".to_string(),
            SimilarityScore {
                similarity: 80.0,
                rank: Some(1),
            },
        );

        let result = matcher
            .run(
                user_profile(),
                objective(),
                vec![candidate("c1", &["Python"])],
                similarity,
                offline_reasoner(),
            )
            .await
            .unwrap();

        // 0.45 * 15 + 0.55 * 80 = 50.75
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].score, 50.75);
        assert_eq!(result.matches[0].retrieval_rank, Some(1));
        assert_eq!(
            result.matches[0].kg_signals,
            vec!["Shared skill: python".to_string()]
        );
        assert!(!result.matches[0].reason.is_empty());
    }

    #[tokio::test]
    async fn missing_similarity_defaults_to_zero() {
        let matcher = Matcher::with_default_weights();
        let result = matcher
            .run(
                user_profile(),
                objective(),
                vec![candidate("c1", &["Python"])],
                HashMap::new(),
                offline_reasoner(),
            )
            .await
            .unwrap();

        // 0.45 * 15 + 0.55 * 0 = 6.75
        assert_eq!(result.matches[0].score, 6.75);
        assert!(result.matches[0].retrieval_rank.is_none());
    }

    #[tokio::test]
    async fn threshold_excludes_below_and_keeps_at_boundary() {
        let matcher = Matcher::new(BlendWeights::default(), 50.0);

        let mut profile = user_profile();
        profile.top_skills = vec![
            SkillEntry {
                skill: "python".to_string(),
                applied_in: None,
            },
            SkillEntry {
                skill: "sql".to_string(),
                applied_in: None,
            },
        ];
        let mut obj = objective();
        obj.target_profiles[0].titles = vec!["Analyst".to_string()];

        let mut similarity = HashMap::new();
        // c1: structural 50 (two skills + exact title), 0.45*50 + 0.55*50 = 50.00, kept
        similarity.insert(
            "c1".to_string(),
            SimilarityScore {
                similarity: 50.0,
                rank: Some(1),
            },
        );
        // c2: structural 0, 0.55*90.89 = 49.9895 -> 49.99, dropped
        similarity.insert(
            "c2".to_string(),
            SimilarityScore {
                similarity: 90.89,
                rank: Some(2),
            },
        );

        let c1 = NetworkProfile {
            profile_id: "c1".to_string(),
            name: "Candidate c1".to_string(),
            title: "Analyst".to_string(),
            company: None,
            industry: None,
            skills: vec!["python".to_string(), "sql".to_string()],
            summary: None,
        };
        let c2 = NetworkProfile {
            profile_id: "c2".to_string(),
            name: "Candidate c2".to_string(),
            title: "Painter".to_string(),
            company: None,
            industry: None,
            skills: vec![],
            summary: None,
        };

        let result = matcher
            .run(profile, obj, vec![c1, c2], similarity, offline_reasoner())
            .await
            .unwrap();

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].profile_id, "c1");
        assert_eq!(result.matches[0].score, 50.0);
        assert_eq!(result.total_candidates, 2);
    }

    #[tokio::test]
    async fn tied_scores_keep_input_order() {
        let matcher = Matcher::with_default_weights();
        let mut similarity = HashMap::new();
        for id in ["c1", "c2", "c3"] {
            similarity.insert(
                id.to_string(),
                SimilarityScore {
                    similarity: 40.0,
                    rank: None,
                },
            );
        }

        let result = matcher
            .run(
                user_profile(),
                objective(),
                vec![candidate("c1", &[]), candidate("c2", &[]), candidate("c3", &[])],
                similarity,
                offline_reasoner(),
            )
            .await
            .unwrap();

        let order: Vec<&str> = result
            .matches
            .iter()
            .map(|m| m.profile_id.as_str())
            .collect();
        assert_eq!(order, vec!["c1", "c2", "c3"]);
    }

    #[tokio::test]
    async fn higher_blend_sorts_first() {
        let matcher = Matcher::with_default_weights();
        let mut similarity = HashMap::new();
        similarity.insert(
            "weak".to_string(),
            SimilarityScore {
                similarity: 10.0,
                rank: Some(2),
            },
        );
        similarity.insert(
            "strong".to_string(),
            SimilarityScore {
                similarity: 95.0,
                rank: Some(1),
            },
        );

        let result = matcher
            .run(
                user_profile(),
                objective(),
                vec![candidate("weak", &[]), candidate("strong", &["python"])],
                similarity,
                offline_reasoner(),
            )
            .await
            .unwrap();

        assert_eq!(result.matches[0].profile_id, "strong");
        assert_eq!(result.matches[1].profile_id, "weak");
    }
}
