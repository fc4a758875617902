//! Ballot — one judge's per-match verdict and scores.

use serde::{Deserialize, Serialize};

use super::{JudgeId, MatchId, TeamId};

/// A judge's verdict: a favored team, or a declared judge-level tie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// The judge favors one team outright.
    Favors { team: TeamId },
    /// The judge declares the match even.
    Tie,
}

/// One judge's submission for one match: the verdict plus a numeric score
/// for each side. Scores are opaque beyond being real numbers; only their
/// difference feeds the standings.
///
/// A ballot that is not yet finalized excludes its whole match from
/// standings — partially scored matches are never counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ballot {
    pub judge: JudgeId,
    pub match_id: MatchId,
    pub verdict: Verdict,
    pub score_a: f64,
    pub score_b: f64,
    pub finalized: bool,
}

impl Ballot {
    pub fn is_tie(&self) -> bool {
        self.verdict == Verdict::Tie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_serialization_is_tagged() {
        let v = Verdict::Favors {
            team: TeamId::new("alpha"),
        };
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.contains("\"type\":\"FAVORS\""));

        let tie = serde_json::to_string(&Verdict::Tie).unwrap();
        assert!(tie.contains("\"type\":\"TIE\""));
    }

    #[test]
    fn ballot_roundtrip() {
        let ballot = Ballot {
            judge: JudgeId::new("j1"),
            match_id: MatchId::new("m1"),
            verdict: Verdict::Tie,
            score_a: 51.5,
            score_b: 48.0,
            finalized: true,
        };
        let json = serde_json::to_string(&ballot).unwrap();
        let deser: Ballot = serde_json::from_str(&json).unwrap();
        assert_eq!(ballot, deser);
        assert!(deser.is_tie());
    }
}
