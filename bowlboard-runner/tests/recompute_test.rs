//! End-to-end recompute over a fixture file: store → snapshot → pipeline →
//! artifact → export round-trip.

use std::collections::BTreeMap;

use bowlboard_core::domain::{MatchId, TeamId};
use bowlboard_core::rank::SeparatedBy;
use bowlboard_runner::{
    export_standings_csv, generate_report, recompute, save_artifacts, InMemoryStore,
    StandingsConfig,
};

/// Four teams, three completed matches, one match still in progress, one
/// match short a ballot. Written the way a host would serialize its store.
const FIXTURE: &str = r#"{
  "tournament": "city-finals",
  "panel_size": 3,
  "teams": [
    { "id": "crimson", "name": "Crimson Debate Society" },
    { "id": "indigo", "name": "Indigo Scholars" },
    { "id": "saffron", "name": "Saffron Union" },
    { "id": "viridian", "name": "Viridian Circle" }
  ],
  "matches": [
    { "id": "m1", "round": 1, "team_a": "crimson", "team_b": "indigo", "status": "COMPLETED" },
    { "id": "m2", "round": 1, "team_a": "saffron", "team_b": "viridian", "status": "COMPLETED" },
    { "id": "m3", "round": 2, "team_a": "crimson", "team_b": "saffron", "status": "COMPLETED" },
    { "id": "m4", "round": 2, "team_a": "indigo", "team_b": "viridian", "status": "COMPLETED" },
    { "id": "m5", "round": 3, "team_a": "crimson", "team_b": "viridian", "status": "IN_PROGRESS" }
  ],
  "ballots": [
    { "judge": "j1", "match_id": "m1", "verdict": { "type": "FAVORS", "team": "crimson" }, "score_a": 55.0, "score_b": 49.0, "finalized": true },
    { "judge": "j2", "match_id": "m1", "verdict": { "type": "FAVORS", "team": "crimson" }, "score_a": 53.0, "score_b": 50.0, "finalized": true },
    { "judge": "j3", "match_id": "m1", "verdict": { "type": "FAVORS", "team": "indigo" }, "score_a": 48.0, "score_b": 52.0, "finalized": true },

    { "judge": "j1", "match_id": "m2", "verdict": { "type": "FAVORS", "team": "saffron" }, "score_a": 54.0, "score_b": 50.0, "finalized": true },
    { "judge": "j2", "match_id": "m2", "verdict": { "type": "TIE" }, "score_a": 50.0, "score_b": 50.0, "finalized": true },
    { "judge": "j3", "match_id": "m2", "verdict": { "type": "FAVORS", "team": "saffron" }, "score_a": 52.0, "score_b": 49.0, "finalized": true },

    { "judge": "j1", "match_id": "m3", "verdict": { "type": "FAVORS", "team": "crimson" }, "score_a": 51.0, "score_b": 50.0, "finalized": true },
    { "judge": "j2", "match_id": "m3", "verdict": { "type": "FAVORS", "team": "saffron" }, "score_a": 49.0, "score_b": 53.0, "finalized": true },
    { "judge": "j3", "match_id": "m3", "verdict": { "type": "FAVORS", "team": "crimson" }, "score_a": 52.0, "score_b": 48.0, "finalized": true },

    { "judge": "j1", "match_id": "m4", "verdict": { "type": "FAVORS", "team": "indigo" }, "score_a": 53.0, "score_b": 47.0, "finalized": true },
    { "judge": "j2", "match_id": "m4", "verdict": { "type": "FAVORS", "team": "indigo" }, "score_a": 54.0, "score_b": 50.0, "finalized": true }
  ]
}"#;

fn config() -> StandingsConfig {
    StandingsConfig {
        panel_size: None,
        master_seed: 42,
        through_round: None,
    }
}

#[test]
fn fixture_recompute_end_to_end() {
    let store = InMemoryStore::from_json_str(FIXTURE).unwrap();
    let artifact = recompute(&store, &config()).unwrap();
    let report = &artifact.report;

    // m4 is short a ballot; m5 is still in progress. Three matches count.
    assert_eq!(report.matches_used, 3);
    assert_eq!(report.excluded.len(), 1);
    assert_eq!(report.excluded[0].match_id, MatchId::new("m4"));

    let shares: BTreeMap<&str, f64> = report
        .standings
        .iter()
        .map(|s| (s.team.0.as_str(), s.record.win_share))
        .collect();
    assert_eq!(shares["crimson"], 2.0);
    assert_eq!(shares["saffron"], 1.0);
    assert_eq!(shares["indigo"], 0.0);
    assert_eq!(shares["viridian"], 0.0);

    assert_eq!(report.standings[0].team, TeamId::new("crimson"));
    assert_eq!(report.standings[1].team, TeamId::new("saffron"));
}

#[test]
fn zero_match_teams_fall_to_the_ladder_not_out_of_the_table() {
    let store = InMemoryStore::from_json_str(FIXTURE).unwrap();
    let artifact = recompute(&store, &config()).unwrap();
    let report = &artifact.report;

    // indigo and viridian both sit at zero wins; indigo lost m1 by -5
    // while viridian lost m2 by -7, so score differential separates them.
    assert_eq!(report.standings.len(), 4);
    assert_eq!(report.standings[2].team, TeamId::new("indigo"));
    assert_eq!(report.standings[3].team, TeamId::new("viridian"));
    assert_eq!(
        report.standings[3].separated_by,
        Some(SeparatedBy::ScoreDifferential)
    );
}

#[test]
fn artifacts_render_and_persist() {
    let store = InMemoryStore::from_json_str(FIXTURE).unwrap();
    let artifact = recompute(&store, &config()).unwrap();

    let csv = export_standings_csv(&artifact).unwrap();
    assert_eq!(csv.lines().count(), 5);

    let md = generate_report(&artifact);
    assert!(md.contains("| Tournament | city-finals |"));
    assert!(md.contains("## Excluded Matches"));

    let dir = tempfile::tempdir().unwrap();
    let run_dir = save_artifacts(&artifact, dir.path()).unwrap();
    assert!(run_dir.join("manifest.json").exists());
}
