//! Domain types for the standings engine.

pub mod ballot;
pub mod ids;
pub mod matches;
pub mod team;

pub use ballot::{Ballot, Verdict};
pub use ids::{JudgeId, MatchId, TeamId, TournamentId};
pub use matches::{Match, MatchStatus};
pub use team::Team;
