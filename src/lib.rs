//! Nexus Match - knowledge-graph candidate matching service
//!
//! Ranks candidate network profiles against one user's stated objective by
//! blending a structural knowledge-graph score with an externally retrieved
//! semantic similarity score, then attaches a generated reason per match.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{build_graph, graph::normalize, Matcher};
pub use self::models::{
    MatchRequest, MatchResponse, NetworkProfile, ScoredMatch, SimilarityScore, UserObjective,
    UserProfileInfo,
};
