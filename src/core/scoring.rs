use std::collections::{HashMap, HashSet};

use crate::core::graph::{candidate_node_id, EdgeKind, IntentGraph};
use crate::models::NetworkProfile;

/// Points per shared skill node
pub const SKILL_POINTS: f64 = 15.0;
/// Points per exact sought-title hit
pub const TITLE_POINTS: f64 = 20.0;
/// Points per partial sought-title hit
pub const PARTIAL_TITLE_POINTS: f64 = 10.0;
/// Points per matched goal signal
pub const GOAL_POINTS: f64 = 10.0;
/// Structural scores are clamped here; three shared skills plus title hits
/// can nominally exceed it
pub const MAX_SCORE: f64 = 100.0;

/// Structural overlap score (0-100) and matched signals for one candidate
///
/// Factors are applied in fixed order so signals come out in discovery
/// order: shared skills, exact title matches, partial title matches, goal
/// matches. Absent edges yield empty intersections and zero contribution;
/// there are no error conditions.
pub fn score_candidate(
    graph: &IntentGraph,
    user_id: &str,
    candidate_id: &str,
) -> (f64, Vec<String>) {
    let mut score = 0.0;
    let mut signals: Vec<String> = Vec::new();

    let cand_skills: HashSet<&str> = graph.successors(candidate_id, EdgeKind::HasSkill).collect();
    let cand_titles: Vec<&str> = graph.successors(candidate_id, EdgeKind::HasTitle).collect();
    let cand_title_set: HashSet<&str> = cand_titles.iter().copied().collect();

    // Skill overlap
    for skill in graph.successors(user_id, EdgeKind::HasSkill) {
        if cand_skills.contains(skill) {
            signals.push(format!("Shared skill: {}", graph.label(skill)));
            score += SKILL_POINTS;
        }
    }

    // Exact title match: sought title node also held by the candidate
    let sought_titles: Vec<&str> = graph.successors(user_id, EdgeKind::SeeksTitle).collect();
    let mut matched_titles: HashSet<&str> = HashSet::new();
    for title in &sought_titles {
        if cand_title_set.contains(title) {
            signals.push(format!("Title match: {}", graph.label(title)));
            score += TITLE_POINTS;
            matched_titles.insert(title);
        }
    }

    // Partial title match: substring containment in either direction, at
    // most one award per sought title
    for title in &sought_titles {
        if matched_titles.contains(title) {
            continue;
        }
        let sought_label = graph.label(title).to_lowercase();
        for cand_title in &cand_titles {
            let cand_label = graph.label(cand_title).to_lowercase();
            if sought_label.contains(&cand_label) || cand_label.contains(&sought_label) {
                signals.push(format!(
                    "Partial title match: {} ~ {}",
                    sought_label, cand_label
                ));
                score += PARTIAL_TITLE_POINTS;
                matched_titles.insert(title);
                break;
            }
        }
    }

    // Goal signals against the union of candidate skill and title labels,
    // one contribution per goal
    for goal in graph.successors(user_id, EdgeKind::HasGoal) {
        let goal_label = graph.label(goal).to_lowercase();
        let candidate_labels = cand_skills
            .iter()
            .chain(cand_title_set.iter())
            .map(|id| graph.label(id));
        for label in candidate_labels {
            let label = label.to_lowercase();
            if goal_label.contains(&label) || label.contains(&goal_label) {
                signals.push(format!("Goal signal match: {}", goal_label));
                score += GOAL_POINTS;
                break;
            }
        }
    }

    (score.min(MAX_SCORE), signals)
}

/// Score every candidate against one shared graph
///
/// Returns `{profile_id: (score, signals)}`.
pub fn score_candidates(
    graph: &IntentGraph,
    user_id: &str,
    candidates: &[NetworkProfile],
) -> HashMap<String, (f64, Vec<String>)> {
    candidates
        .iter()
        .map(|c| {
            let cand_id = candidate_node_id(&c.profile_id);
            (
                c.profile_id.clone(),
                score_candidate(graph, user_id, &cand_id),
            )
        })
        .collect()
}
