//! Reporting and export — JSON, CSV, and Markdown artifact generation.
//!
//! Three export formats for a standings artifact:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: the standings table for external analysis tools
//! - **Markdown**: human-readable report with tie-break annotations,
//!   excluded matches, and the coin-flip audit trail
//!
//! All persisted artifacts include a `schema_version` field. Unknown
//! versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::runner::{StandingsArtifact, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `StandingsArtifact` to pretty JSON.
pub fn export_json(artifact: &StandingsArtifact) -> Result<String> {
    serde_json::to_string_pretty(artifact).context("failed to serialize StandingsArtifact to JSON")
}

/// Deserialize a `StandingsArtifact` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<StandingsArtifact> {
    let artifact: StandingsArtifact =
        serde_json::from_str(json).context("failed to deserialize StandingsArtifact from JSON")?;
    if artifact.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            artifact.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(artifact)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the standings table as CSV.
///
/// Columns: rank, team, played, win_share, score_diff, votes, separated_by
pub fn export_standings_csv(artifact: &StandingsArtifact) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "rank",
        "team",
        "played",
        "win_share",
        "score_diff",
        "votes",
        "separated_by",
    ])?;

    for s in &artifact.report.standings {
        wtr.write_record([
            &s.rank.to_string(),
            &s.team.0,
            &s.record.played.to_string(),
            &format!("{:.1}", s.record.win_share),
            &format!("{:+.1}", s.record.score_diff),
            &format!("{:.1}", s.record.votes),
            &s.separated_by.map(|c| c.to_string()).unwrap_or_default(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one standings computation.
///
/// Creates a directory named `{tournament}_{timestamp}/` under `output_dir`
/// containing:
/// - `manifest.json` — the full `StandingsArtifact`
/// - `standings.csv` — the standings table
/// - `report.md` — the human-readable report
///
/// Returns the path to the created directory.
pub fn save_artifacts(artifact: &StandingsArtifact, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!(
        "{}_{}",
        artifact.tournament,
        artifact.computed_at.format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(artifact)?;
    std::fs::write(run_dir.join("manifest.json"), &json)?;

    let csv = export_standings_csv(artifact)?;
    std::fs::write(run_dir.join("standings.csv"), &csv)?;

    let md = generate_report(artifact);
    std::fs::write(run_dir.join("report.md"), &md)?;

    Ok(run_dir)
}

/// Load a `StandingsArtifact` from an artifact directory's manifest.json.
///
/// Rejects unknown schema versions.
pub fn load_artifacts(dir: &Path) -> Result<StandingsArtifact> {
    let manifest_path = dir.join("manifest.json");
    let json = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate a Markdown report for one standings computation.
pub fn generate_report(artifact: &StandingsArtifact) -> String {
    let report = &artifact.report;
    let mut md = String::with_capacity(2048);

    md.push_str("# Standings Report\n\n");

    // Metadata
    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Tournament | {} |\n", report.tournament));
    md.push_str(&format!("| Computed At | {} |\n", artifact.computed_at));
    md.push_str(&format!("| Matches Used | {} |\n", report.matches_used));
    md.push_str(&format!("| Config | {} |\n", artifact.config_id));
    md.push_str(&format!("| Snapshot | {} |\n", report.snapshot_hash));
    md.push('\n');

    // Standings
    md.push_str("## Standings\n\n");
    md.push_str("| Rank | Team | Played | Wins | Score Diff | Votes | Separated By |\n");
    md.push_str("| ---: | --- | ---: | ---: | ---: | ---: | --- |\n");
    for s in &report.standings {
        md.push_str(&format!(
            "| {} | {} | {} | {:.1} | {:+.1} | {:.1} | {} |\n",
            s.rank,
            s.team,
            s.record.played,
            s.record.win_share,
            s.record.score_diff,
            s.record.votes,
            s.separated_by
                .map(|c| c.to_string())
                .unwrap_or_else(|| "—".to_string()),
        ));
    }
    md.push('\n');

    // Excluded matches
    if !report.excluded.is_empty() {
        md.push_str("## Excluded Matches\n\n");
        for e in &report.excluded {
            md.push_str(&format!("- `{}`: {}\n", e.match_id, e.reason));
        }
        md.push('\n');
    }

    // Coin flips
    if !report.draws.is_empty() {
        md.push_str("## Coin Flips\n\n");
        for d in &report.draws {
            let group: Vec<&str> = d.group.iter().map(|t| t.0.as_str()).collect();
            let order: Vec<&str> = d.order.iter().map(|t| t.0.as_str()).collect();
            md.push_str(&format!(
                "- {{{}}} drawn as {} (sub-seed {})\n",
                group.join(", "),
                order.join(" > "),
                d.sub_seed,
            ));
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StandingsConfig;
    use crate::runner::recompute;
    use crate::store::{InMemoryStore, TournamentFixture};
    use bowlboard_core::domain::{
        Ballot, JudgeId, Match, MatchId, MatchStatus, Team, TeamId, TournamentId, Verdict,
    };

    // ─── Test helpers ────────────────────────────────────────────────

    fn ballot(judge: &str, match_id: &str, verdict: Verdict) -> Ballot {
        Ballot {
            judge: JudgeId::new(judge),
            match_id: MatchId::new(match_id),
            verdict,
            score_a: 52.0,
            score_b: 48.0,
            finalized: true,
        }
    }

    fn completed(id: &str, round: u32, a: &str, b: &str) -> Match {
        Match {
            id: MatchId::new(id),
            round,
            team_a: TeamId::new(a),
            team_b: TeamId::new(b),
            status: MatchStatus::Completed,
        }
    }

    fn sample_artifact() -> StandingsArtifact {
        let store = InMemoryStore::new(TournamentFixture {
            tournament: TournamentId::new("spring-open"),
            panel_size: Some(3),
            teams: vec![
                Team::new("alpha", "Alpha"),
                Team::new("beta", "Beta"),
                Team::new("gamma", "Gamma"),
            ],
            matches: vec![
                completed("m1", 1, "alpha", "beta"),
                // Short a ballot: excluded, reported.
                completed("m2", 2, "alpha", "gamma"),
            ],
            ballots: vec![
                ballot("j1", "m1", Verdict::Favors { team: TeamId::new("alpha") }),
                ballot("j2", "m1", Verdict::Favors { team: TeamId::new("alpha") }),
                ballot("j3", "m1", Verdict::Tie),
                ballot("j1", "m2", Verdict::Favors { team: TeamId::new("gamma") }),
            ],
        });
        let config = StandingsConfig {
            panel_size: None,
            master_seed: 42,
            through_round: None,
        };
        recompute(&store, &config).unwrap()
    }

    // ─── JSON round-trip ─────────────────────────────────────────────

    #[test]
    fn json_roundtrip() {
        let original = sample_artifact();
        let json = export_json(&original).unwrap();
        let restored = import_json(&json).unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn json_rejects_unknown_version() {
        let mut artifact = sample_artifact();
        artifact.schema_version = 99;
        let json = export_json(&artifact).unwrap();
        let err = import_json(&json);
        assert!(err.is_err());
        let msg = err.unwrap_err().to_string();
        assert!(msg.contains("unsupported schema version 99"));
    }

    // ─── CSV standings ──────────────────────────────────────────────

    #[test]
    fn csv_has_all_columns_and_rows() {
        let artifact = sample_artifact();
        let csv = export_standings_csv(&artifact).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4); // header + 3 teams
        assert_eq!(
            lines[0],
            "rank,team,played,win_share,score_diff,votes,separated_by"
        );
        assert!(lines[1].starts_with("1,alpha,"));
        assert!(lines[1].contains("1.0"));
    }

    // ─── Markdown report ────────────────────────────────────────────

    #[test]
    fn markdown_report_has_sections() {
        let artifact = sample_artifact();
        let md = generate_report(&artifact);

        assert!(md.contains("# Standings Report"));
        assert!(md.contains("## Metadata"));
        assert!(md.contains("## Standings"));
        assert!(md.contains("| Tournament | spring-open |"));
        assert!(md.contains("| Matches Used | 1 |"));
    }

    #[test]
    fn markdown_reports_exclusions() {
        let artifact = sample_artifact();
        let md = generate_report(&artifact);

        assert!(md.contains("## Excluded Matches"));
        assert!(md.contains("`m2`"));
        assert!(md.contains("3 ballots"));
    }

    #[test]
    fn markdown_omits_empty_sections() {
        let mut artifact = sample_artifact();
        artifact.report.excluded.clear();
        let md = generate_report(&artifact);

        assert!(!md.contains("## Excluded Matches"));
        assert!(!md.contains("## Coin Flips"));
    }

    #[test]
    fn markdown_reports_coin_flips() {
        // A drawn match with even scores leaves the pair to the coin flip.
        let even = |judge: &str| Ballot {
            score_a: 50.0,
            score_b: 50.0,
            ..ballot(judge, "m1", Verdict::Tie)
        };
        let store = InMemoryStore::new(TournamentFixture {
            tournament: TournamentId::new("spring-open"),
            panel_size: Some(3),
            teams: vec![Team::new("alpha", "Alpha"), Team::new("beta", "Beta")],
            matches: vec![completed("m1", 1, "alpha", "beta")],
            ballots: vec![even("j1"), even("j2"), even("j3")],
        });
        let config = StandingsConfig {
            panel_size: None,
            master_seed: 42,
            through_round: None,
        };
        let artifact = recompute(&store, &config).unwrap();
        assert_eq!(artifact.report.draws.len(), 1);

        let md = generate_report(&artifact);
        assert!(md.contains("## Coin Flips"));
        assert!(md.contains("sub-seed"));
    }

    // ─── Save/load artifacts ────────────────────────────────────────

    #[test]
    fn save_load_artifacts_roundtrip() {
        let artifact = sample_artifact();
        let dir = tempfile::tempdir().unwrap();
        let run_dir = save_artifacts(&artifact, dir.path()).unwrap();

        assert!(run_dir.join("manifest.json").exists());
        assert!(run_dir.join("standings.csv").exists());
        assert!(run_dir.join("report.md").exists());

        let loaded = load_artifacts(&run_dir).unwrap();
        assert_eq!(loaded, artifact);
    }
}
