// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BlendWeights, NetworkProfile, Role, ScoredMatch, SimilarityScore, SkillEntry, TargetProfile,
    UserObjective, UserProfileInfo,
};
pub use requests::MatchRequest;
pub use responses::{ErrorResponse, HealthResponse, MatchResponse};
