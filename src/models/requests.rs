use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{NetworkProfile, UserObjective, UserProfileInfo};

/// Request to run the matching pipeline
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    pub user_profile: UserProfileInfo,
    #[validate(nested)]
    pub user_objective: UserObjective,
    #[serde(default)]
    pub network_profiles: Vec<NetworkProfile>,
}
