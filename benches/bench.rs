// Criterion benchmarks for Nexus Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nexus_match::core::{build_graph, candidate_node_id, normalize, score_candidate, user_node_id};
use nexus_match::models::{
    NetworkProfile, Role, SkillEntry, TargetProfile, UserObjective, UserProfileInfo,
};

fn create_user_profile() -> UserProfileInfo {
    UserProfileInfo {
        current_role: Role {
            title: "Founder".to_string(),
            company: Some("Acme".to_string()),
            location: None,
        },
        previous_roles: vec![],
        top_skills: ["python", "rust", "product strategy", "sql"]
            .iter()
            .map(|s| SkillEntry {
                skill: s.to_string(),
                applied_in: None,
            })
            .collect(),
        solutions_offered: vec![],
        career_highlights: vec![],
    }
}

fn create_objective() -> UserObjective {
    UserObjective {
        person_id: "bench-user".to_string(),
        primary_goal: "Hire engineering leaders".to_string(),
        secondary_goals: vec![],
        target_profiles: vec![TargetProfile {
            profile_type: "hire".to_string(),
            titles: vec!["Engineering Manager".to_string(), "CTO".to_string()],
            why: None,
        }],
        exclude: vec![],
        success_signals: vec!["scaled a team".to_string()],
    }
}

fn create_candidate(id: usize) -> NetworkProfile {
    let titles = [
        "Engineering Manager",
        "Data Engineer",
        "Product Designer",
        "CTO",
        "Account Executive",
    ];
    let skills: Vec<String> = match id % 3 {
        0 => vec!["python".to_string(), "sql".to_string()],
        1 => vec!["rust".to_string()],
        _ => vec!["figma".to_string()],
    };

    NetworkProfile {
        profile_id: format!("candidate-{}", id),
        name: format!("Candidate {}", id),
        title: titles[id % titles.len()].to_string(),
        company: Some("Globex".to_string()),
        industry: Some("Software".to_string()),
        skills,
        summary: None,
    }
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize", |b| {
        b.iter(|| normalize(black_box("  Senior   Machine Learning Engineer ")));
    });
}

fn bench_graph_build(c: &mut Criterion) {
    let profile = create_user_profile();
    let objective = create_objective();

    let mut group = c.benchmark_group("graph_build");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<NetworkProfile> =
            (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("build_graph", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    build_graph(
                        black_box(&profile),
                        black_box(&objective),
                        black_box(&candidates),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_structural_scoring(c: &mut Criterion) {
    let profile = create_user_profile();
    let objective = create_objective();

    let mut group = c.benchmark_group("structural_scoring");

    for candidate_count in [10, 100, 1000].iter() {
        let candidates: Vec<NetworkProfile> =
            (0..*candidate_count).map(create_candidate).collect();
        let graph = build_graph(&profile, &objective, &candidates);
        let user_id = user_node_id("bench-user");

        group.bench_with_input(
            BenchmarkId::new("score_all", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    for candidate in &candidates {
                        let cand_id = candidate_node_id(&candidate.profile_id);
                        black_box(score_candidate(&graph, &user_id, &cand_id));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize,
    bench_graph_build,
    bench_structural_scoring
);

criterion_main!(benches);
