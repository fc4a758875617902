//! Team record accumulation — folds match outcomes into one running record
//! per team.
//!
//! Every known team gets a record, including teams with zero completed
//! matches: with a partial round-robin schedule, byes must appear in the
//! standings rather than vanish. The per-opponent result log exists because
//! head-to-head tie-breaking applies only between teams that actually met.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::TeamId;
use crate::outcome::MatchOutcome;

/// One match's result from a single team's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentResult {
    pub opponent: TeamId,
    pub round: u32,
    /// This team's win share from that match (0, 0.5, or 1).
    pub win_share: f64,
}

/// A team's cumulative record across all counted matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team: TeamId,
    pub played: u32,
    pub win_share: f64,
    pub score_diff: f64,
    pub votes: f64,
    pub opponents: Vec<OpponentResult>,
}

impl TeamRecord {
    pub fn zero(team: TeamId) -> Self {
        Self {
            team,
            played: 0,
            win_share: 0.0,
            score_diff: 0.0,
            votes: 0.0,
            opponents: Vec::new(),
        }
    }

    fn absorb(&mut self, own_share: f64, own_diff: f64, own_votes: f64, opponent: &TeamId, round: u32) {
        self.played += 1;
        self.win_share += own_share;
        self.score_diff += own_diff;
        self.votes += own_votes;
        self.opponents.push(OpponentResult {
            opponent: opponent.clone(),
            round,
            win_share: own_share,
        });
    }

    /// Results of every match this team played against `opponent`.
    pub fn results_against<'a>(
        &'a self,
        opponent: &'a TeamId,
    ) -> impl Iterator<Item = &'a OpponentResult> {
        self.opponents.iter().filter(move |r| r.opponent == *opponent)
    }
}

/// Fold outcomes into per-team records.
///
/// `teams` is the full set of known teams; each appears in the output even
/// with zero matches. Outcomes must reference known teams only — the
/// pipeline excludes unknown-team matches before accumulation.
pub fn accumulate<'a>(
    teams: impl IntoIterator<Item = &'a TeamId>,
    outcomes: &[MatchOutcome],
) -> BTreeMap<TeamId, TeamRecord> {
    let mut records: BTreeMap<TeamId, TeamRecord> = teams
        .into_iter()
        .map(|t| (t.clone(), TeamRecord::zero(t.clone())))
        .collect();

    for outcome in outcomes {
        let Some(rec_a) = records.get_mut(&outcome.team_a) else {
            debug_assert!(false, "outcome references unknown team {}", outcome.team_a);
            continue;
        };
        rec_a.absorb(
            outcome.win_share_a,
            outcome.score_diff,
            outcome.votes_a,
            &outcome.team_b,
            outcome.round,
        );

        let Some(rec_b) = records.get_mut(&outcome.team_b) else {
            debug_assert!(false, "outcome references unknown team {}", outcome.team_b);
            continue;
        };
        rec_b.absorb(
            outcome.win_share_b,
            -outcome.score_diff,
            outcome.votes_b,
            &outcome.team_a,
            outcome.round,
        );
    }

    records
}
