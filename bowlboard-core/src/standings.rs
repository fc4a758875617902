//! The standings pipeline — one pure pass from snapshot to report.
//!
//! `compute_standings` is the only operation this crate exposes to a host:
//! completed matches + ballots in, ordered standings out. The pass is
//! synchronous, allocation-light, and free of I/O; any new completed match
//! invalidates prior standings and warrants a full recomputation rather
//! than incremental maintenance.
//!
//! Defective matches (wrong ballot count, unfinalized ballot, unknown
//! team) are excluded and reported, never fabricated. Ambiguous
//! configuration is fatal: no standings are produced at all.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Ballot, Match, MatchId, Team, TournamentId};
use crate::draw::{DrawRecord, DrawSource};
use crate::outcome::resolve_outcome;
use crate::rank::{rank_teams, Standing};
use crate::record::accumulate;

/// Errors that abort the whole computation.
#[derive(Debug, Error)]
pub enum StandingsError {
    #[error("judge panel size must be at least 1")]
    InvalidPanelSize,

    #[error("duplicate team id {0} in snapshot")]
    DuplicateTeam(String),

    #[error("duplicate match id {0} in snapshot")]
    DuplicateMatch(String),
}

/// Engine parameters for one computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of judges assigned to every match.
    pub panel_size: usize,
    /// Master seed for coin-flip draws.
    pub master_seed: u64,
    /// Count only matches with `round <= through_round`, when set.
    pub through_round: Option<u32>,
}

/// An immutable snapshot of one tournament's completed state, assembled by
/// the host. The engine reads it and never writes back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub tournament: TournamentId,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    /// Submitted ballots, grouped per match.
    pub ballots: BTreeMap<MatchId, Vec<Ballot>>,
}

impl TournamentSnapshot {
    /// Content hash of the snapshot (BLAKE3 over canonical JSON).
    ///
    /// Two identical snapshots hash identically, which lets a host key
    /// caches and tie draw audit records to the exact input they ranked.
    pub fn content_hash(&self) -> String {
        let json = serde_json::to_string(self).expect("TournamentSnapshot serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

/// A match left out of the standings, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedMatch {
    pub match_id: MatchId,
    pub reason: String,
}

/// The full result of one standings computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsReport {
    pub tournament: TournamentId,
    pub standings: Vec<Standing>,
    /// Number of completed matches that actually counted.
    pub matches_used: usize,
    /// Matches excluded for data-integrity defects, with reasons.
    pub excluded: Vec<ExcludedMatch>,
    /// Audit trail of every coin-flip draw taken.
    pub draws: Vec<DrawRecord>,
    /// Content hash of the input snapshot.
    pub snapshot_hash: String,
}

/// Compute ordered standings for one tournament snapshot.
pub fn compute_standings(
    snapshot: &TournamentSnapshot,
    config: &EngineConfig,
) -> Result<StandingsReport, StandingsError> {
    if config.panel_size == 0 {
        return Err(StandingsError::InvalidPanelSize);
    }

    let mut known = BTreeSet::new();
    for team in &snapshot.teams {
        if !known.insert(team.id.clone()) {
            return Err(StandingsError::DuplicateTeam(team.id.0.clone()));
        }
    }

    let mut seen_matches = BTreeSet::new();
    let mut outcomes = Vec::new();
    let mut excluded = Vec::new();
    static NO_BALLOTS: Vec<Ballot> = Vec::new();

    for m in &snapshot.matches {
        if !seen_matches.insert(m.id.clone()) {
            return Err(StandingsError::DuplicateMatch(m.id.0.clone()));
        }
        if !m.is_completed() {
            continue;
        }
        if let Some(bound) = config.through_round {
            if m.round > bound {
                continue;
            }
        }

        if let Some(stranger) = [&m.team_a, &m.team_b].into_iter().find(|t| !known.contains(*t)) {
            excluded.push(ExcludedMatch {
                match_id: m.id.clone(),
                reason: format!("references unknown team {stranger}"),
            });
            continue;
        }

        let ballots = snapshot.ballots.get(&m.id).unwrap_or(&NO_BALLOTS);
        match resolve_outcome(m, ballots, config.panel_size) {
            Ok(outcome) => outcomes.push(outcome),
            Err(err) => excluded.push(ExcludedMatch {
                match_id: m.id.clone(),
                reason: err.to_string(),
            }),
        }
    }

    let records = accumulate(snapshot.teams.iter().map(|t| &t.id), &outcomes);

    // Win-share conservation: each counted match contributes exactly 1.0.
    debug_assert!({
        let total: f64 = records.values().map(|r| r.win_share).sum();
        (total - outcomes.len() as f64).abs() < 1e-9
    });

    let source = DrawSource::new(config.master_seed);
    let (standings, draws) = rank_teams(&snapshot.tournament, &records, &source);

    Ok(StandingsReport {
        tournament: snapshot.tournament.clone(),
        standings,
        matches_used: outcomes.len(),
        excluded,
        draws,
        snapshot_hash: snapshot.content_hash(),
    })
}
