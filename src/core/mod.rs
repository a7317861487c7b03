// Core algorithm exports
pub mod graph;
pub mod matcher;
pub mod scoring;

pub use graph::{
    build_graph, candidate_node_id, normalize, user_node_id, EdgeKind, IntentGraph, NodeKind,
};
pub use matcher::{round_two, MatchError, MatchResult, Matcher};
pub use scoring::{score_candidate, score_candidates};
