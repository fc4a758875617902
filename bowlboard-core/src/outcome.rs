//! Ballot resolution — converts a match's submitted ballots into a
//! `MatchOutcome`.
//!
//! Each finalized ballot contributes one vote-unit to its favored side, or
//! half a unit to each side on a declared tie. The majority side takes the
//! full win share; equal votes split it 0.5/0.5 (a drawn match). The score
//! differential is the difference of the two sides' summed judge scores —
//! symmetric and scale-independent.
//!
//! Resolution is a pure function. Every defect in the ballot set is an
//! explicit error, never a silent default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Ballot, JudgeId, Match, MatchId, MatchStatus, TeamId, Verdict};

/// Errors from resolving a match's ballot set.
#[derive(Debug, Error)]
pub enum OutcomeError {
    #[error("match {match_id}: expected {expected} ballots, {submitted} submitted")]
    IncompleteBallotSet {
        match_id: MatchId,
        expected: usize,
        submitted: usize,
    },

    #[error("match {match_id} is not completed (status: {status:?})")]
    MatchNotCompleted {
        match_id: MatchId,
        status: MatchStatus,
    },

    #[error("match {match_id}: ballot from judge {judge} is not finalized")]
    UnfinalizedBallot { match_id: MatchId, judge: JudgeId },

    #[error("match {match_id}: ballot from judge {judge} belongs to match {ballot_match}")]
    MismatchedBallot {
        match_id: MatchId,
        judge: JudgeId,
        ballot_match: MatchId,
    },

    #[error("match {match_id}: judge {judge} favors {team}, which is not a participant")]
    ForeignVerdict {
        match_id: MatchId,
        judge: JudgeId,
        team: TeamId,
    },
}

/// The resolved result of one completed match.
///
/// Invariant: `win_share_a + win_share_b == 1.0` exactly, and
/// `votes_a + votes_b` equals the judge-panel size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub match_id: MatchId,
    pub round: u32,
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub win_share_a: f64,
    pub win_share_b: f64,
    pub votes_a: f64,
    pub votes_b: f64,
    /// Summed judge scores, side A minus side B.
    pub score_diff: f64,
}

impl MatchOutcome {
    /// A drawn match: the judge panel split evenly.
    pub fn is_draw(&self) -> bool {
        self.win_share_a == 0.5
    }

    /// Win share earned by `team` in this match, if it participated.
    pub fn win_share_for(&self, team: &TeamId) -> Option<f64> {
        if self.team_a == *team {
            Some(self.win_share_a)
        } else if self.team_b == *team {
            Some(self.win_share_b)
        } else {
            None
        }
    }
}

/// Resolve a completed match's full ballot set into a `MatchOutcome`.
///
/// `panel_size` is the configured number of judges per match; a submitted
/// ballot count that differs from it is an `IncompleteBallotSet`, reported
/// rather than padded or truncated.
pub fn resolve_outcome(
    m: &Match,
    ballots: &[Ballot],
    panel_size: usize,
) -> Result<MatchOutcome, OutcomeError> {
    if !m.is_completed() {
        return Err(OutcomeError::MatchNotCompleted {
            match_id: m.id.clone(),
            status: m.status,
        });
    }
    if ballots.len() != panel_size {
        return Err(OutcomeError::IncompleteBallotSet {
            match_id: m.id.clone(),
            expected: panel_size,
            submitted: ballots.len(),
        });
    }

    let mut votes_a = 0.0;
    let mut votes_b = 0.0;
    let mut score_a = 0.0;
    let mut score_b = 0.0;

    for ballot in ballots {
        if ballot.match_id != m.id {
            return Err(OutcomeError::MismatchedBallot {
                match_id: m.id.clone(),
                judge: ballot.judge.clone(),
                ballot_match: ballot.match_id.clone(),
            });
        }
        if !ballot.finalized {
            return Err(OutcomeError::UnfinalizedBallot {
                match_id: m.id.clone(),
                judge: ballot.judge.clone(),
            });
        }
        match &ballot.verdict {
            Verdict::Favors { team } if *team == m.team_a => votes_a += 1.0,
            Verdict::Favors { team } if *team == m.team_b => votes_b += 1.0,
            Verdict::Favors { team } => {
                return Err(OutcomeError::ForeignVerdict {
                    match_id: m.id.clone(),
                    judge: ballot.judge.clone(),
                    team: team.clone(),
                });
            }
            Verdict::Tie => {
                votes_a += 0.5;
                votes_b += 0.5;
            }
        }
        score_a += ballot.score_a;
        score_b += ballot.score_b;
    }

    let (win_share_a, win_share_b) = if votes_a > votes_b {
        (1.0, 0.0)
    } else if votes_a < votes_b {
        (0.0, 1.0)
    } else {
        (0.5, 0.5)
    };

    Ok(MatchOutcome {
        match_id: m.id.clone(),
        round: m.round,
        team_a: m.team_a.clone(),
        team_b: m.team_b.clone(),
        win_share_a,
        win_share_b,
        votes_a,
        votes_b,
        score_diff: score_a - score_b,
    })
}
