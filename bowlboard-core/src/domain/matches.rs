//! Match — a scheduled meeting between two teams.

use serde::{Deserialize, Serialize};

use super::{MatchId, TeamId};

/// Lifecycle state of a match, owned by the host's match-flow subsystem.
///
/// Only `Completed` matches are eligible for standings. The engine never
/// observes in-progress phase detail; everything short of `Completed` is
/// simply not eligible yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Completed,
}

/// A single match between two teams in a given round.
///
/// The A/B sides are administrative labels, not home/away. A completed
/// match is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub round: u32,
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub status: MatchStatus,
}

impl Match {
    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Returns true if `team` plays on either side of this match.
    pub fn involves(&self, team: &TeamId) -> bool {
        self.team_a == *team || self.team_b == *team
    }

    /// The other side's team, or `None` if `team` is not a participant.
    pub fn opponent_of(&self, team: &TeamId) -> Option<&TeamId> {
        if self.team_a == *team {
            Some(&self.team_b)
        } else if self.team_b == *team {
            Some(&self.team_a)
        } else {
            None
        }
    }
}
