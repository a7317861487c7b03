use std::collections::HashMap;

use crate::models::{NetworkProfile, UserObjective, UserProfileInfo};

/// Minimum character count for a title token to become a title node.
/// Shorter tokens ("VP", "of", "the") are noise for matching.
pub const MIN_TITLE_TOKEN_LEN: usize = 4;

/// Node categories in the intent graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    User,
    Candidate,
    Skill,
    Title,
    Industry,
    Goal,
}

impl NodeKind {
    fn prefix(&self) -> &'static str {
        match self {
            NodeKind::User => "user",
            NodeKind::Candidate => "candidate",
            NodeKind::Skill => "skill",
            NodeKind::Title => "title",
            NodeKind::Industry => "industry",
            NodeKind::Goal => "goal",
        }
    }
}

/// Directed edge labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    HasSkill,
    SeeksTitle,
    HasGoal,
    HasTitle,
    InIndustry,
}

/// Graph node carrying the label as first inserted
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub label: String,
}

/// Outgoing edge from a source node
#[derive(Debug, Clone)]
pub struct Edge {
    pub kind: EdgeKind,
    pub target: String,
    pub rationale: Option<String>,
}

/// Normalize a label for use in a node identifier
///
/// Lower-cases, trims, and collapses internal whitespace runs to a single
/// underscore. Two labels differing only in case or whitespace normalize to
/// the same identifier and therefore the same node.
#[inline]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Identifier for a label-derived node: `{kind}::{normalized_label}`
#[inline]
pub fn node_id(kind: NodeKind, label: &str) -> String {
    format!("{}::{}", kind.prefix(), normalize(label))
}

/// Identifier for the single user node of a request
#[inline]
pub fn user_node_id(person_id: &str) -> String {
    format!("user::{}", person_id)
}

/// Identifier for a candidate node
#[inline]
pub fn candidate_node_id(profile_id: &str) -> String {
    format!("candidate::{}", profile_id)
}

/// Request-scoped typed directed graph over user intent and candidate
/// attributes
///
/// Built fresh per request and discarded after scoring. Node identifiers are
/// globally unique by construction; inserting an existing node or edge is a
/// no-op, so the first inserted label wins and edges never duplicate.
#[derive(Debug, Default)]
pub struct IntentGraph {
    nodes: HashMap<String, Node>,
    adjacency: HashMap<String, Vec<Edge>>,
}

impl IntentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under an explicit identifier. No-op if present.
    pub fn add_node(&mut self, id: &str, kind: NodeKind, label: &str) {
        if !self.nodes.contains_key(id) {
            self.nodes.insert(
                id.to_string(),
                Node {
                    kind,
                    label: label.to_string(),
                },
            );
        }
    }

    /// Insert a label-derived node and return its identifier
    pub fn add_labeled(&mut self, kind: NodeKind, label: &str) -> String {
        let id = node_id(kind, label);
        self.add_node(&id, kind, label);
        id
    }

    /// Insert a directed edge. No-op if the same (kind, target) edge already
    /// leaves the source.
    pub fn add_edge(&mut self, source: &str, kind: EdgeKind, target: &str, rationale: Option<&str>) {
        let edges = self.adjacency.entry(source.to_string()).or_default();
        if edges.iter().any(|e| e.kind == kind && e.target == target) {
            return;
        }
        edges.push(Edge {
            kind,
            target: target.to_string(),
            rationale: rationale.map(str::to_string),
        });
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Label of a node, falling back to the identifier for unknown ids
    pub fn label<'a>(&'a self, id: &'a str) -> &'a str {
        self.nodes.get(id).map(|n| n.label.as_str()).unwrap_or(id)
    }

    /// Targets of a source's outgoing edges of one kind, in insertion order
    pub fn successors(&self, source: &str, kind: EdgeKind) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(source)
            .into_iter()
            .flatten()
            .filter(move |e| e.kind == kind)
            .map(|e| e.target.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}

/// Build the intent graph for one request
///
/// Pure function of its inputs: one USER node from the objective, intent
/// edges for skills, sought titles and success signals, then one CANDIDATE
/// node per profile with skill, title and industry edges. Candidates with
/// empty skill, title or industry data simply contribute no corresponding
/// edges.
pub fn build_graph(
    user_profile: &UserProfileInfo,
    user_objective: &UserObjective,
    candidates: &[NetworkProfile],
) -> IntentGraph {
    let mut graph = IntentGraph::new();

    let user_id = user_node_id(&user_objective.person_id);
    graph.add_node(&user_id, NodeKind::User, &user_profile.current_role.title);

    for entry in &user_profile.top_skills {
        let skill_id = graph.add_labeled(NodeKind::Skill, &entry.skill);
        graph.add_edge(&user_id, EdgeKind::HasSkill, &skill_id, None);
    }

    for target in &user_objective.target_profiles {
        for title in &target.titles {
            let title_id = graph.add_labeled(NodeKind::Title, title);
            graph.add_edge(
                &user_id,
                EdgeKind::SeeksTitle,
                &title_id,
                target.why.as_deref(),
            );
        }
    }

    for signal in &user_objective.success_signals {
        let goal_id = graph.add_labeled(NodeKind::Goal, signal);
        graph.add_edge(&user_id, EdgeKind::HasGoal, &goal_id, None);
    }

    for candidate in candidates {
        let cand_id = candidate_node_id(&candidate.profile_id);
        graph.add_node(&cand_id, NodeKind::Candidate, &candidate.name);

        for skill in &candidate.skills {
            let skill_id = graph.add_labeled(NodeKind::Skill, skill);
            graph.add_edge(&cand_id, EdgeKind::HasSkill, &skill_id, None);
        }

        // Each significant title token becomes a candidate title node
        for token in candidate.title.split_whitespace() {
            if token.chars().count() >= MIN_TITLE_TOKEN_LEN {
                let title_id = graph.add_labeled(NodeKind::Title, token);
                graph.add_edge(&cand_id, EdgeKind::HasTitle, &title_id, None);
            }
        }

        // The full title string is matchable as well
        if !candidate.title.trim().is_empty() {
            let full_title_id = graph.add_labeled(NodeKind::Title, &candidate.title);
            graph.add_edge(&cand_id, EdgeKind::HasTitle, &full_title_id, None);
        }

        if let Some(industry) = &candidate.industry {
            if !industry.trim().is_empty() {
                let industry_id = graph.add_labeled(NodeKind::Industry, industry);
                graph.add_edge(&cand_id, EdgeKind::InIndustry, &industry_id, None);
            }
        }
    }

    graph
}
