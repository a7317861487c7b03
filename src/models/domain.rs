use serde::{Deserialize, Serialize};
use validator::Validate;

/// A held or previously held role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// One skill the user brings, optionally with where it was applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    pub skill: String,
    #[serde(default)]
    pub applied_in: Option<String>,
}

/// The requesting user's professional profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileInfo {
    pub current_role: Role,
    #[serde(default)]
    pub previous_roles: Vec<Role>,
    #[serde(default)]
    pub top_skills: Vec<SkillEntry>,
    #[serde(default)]
    pub solutions_offered: Vec<String>,
    #[serde(default)]
    pub career_highlights: Vec<String>,
}

/// A class of people the user wants to reach
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetProfile {
    #[serde(rename = "type")]
    pub profile_type: String,
    pub titles: Vec<String>,
    #[serde(default)]
    pub why: Option<String>,
}

/// What the user is trying to achieve with their network
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserObjective {
    #[validate(length(min = 1))]
    pub person_id: String,
    pub primary_goal: String,
    #[serde(default)]
    pub secondary_goals: Vec<String>,
    pub target_profiles: Vec<TargetProfile>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub success_signals: Vec<String>,
}

/// A candidate profile from the user's network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkProfile {
    pub profile_id: String,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Ranked candidate with blended score and generated reason
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub profile_id: String,
    pub name: String,
    pub score: f64,
    pub reason: String,
    #[serde(default)]
    pub kg_signals: Vec<String>,
    #[serde(default)]
    pub retrieval_rank: Option<u32>,
}

/// Semantic similarity as reported by the retrieval service
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimilarityScore {
    pub similarity: f64,
    #[serde(default)]
    pub rank: Option<u32>,
}

/// Blend weights for the final score
#[derive(Debug, Clone, Copy)]
pub struct BlendWeights {
    pub knowledge: f64,
    pub semantic: f64,
}

impl BlendWeights {
    pub fn sum(&self) -> f64 {
        self.knowledge + self.semantic
    }
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            knowledge: 0.45,
            semantic: 0.55,
        }
    }
}
