//! The host's match/ballot store boundary.
//!
//! The engine never owns tournament data — teams, matches, and ballots
//! live in a store owned by the surrounding platform, which mutates them
//! through its own match-flow machinery. `TournamentStore` is the read
//! boundary this crate consumes. `InMemoryStore` is the reference
//! implementation, backed by a serde fixture format, used by the CLI and
//! by tests.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bowlboard_core::domain::{Ballot, Match, MatchId, Team, TournamentId};
use bowlboard_core::standings::TournamentSnapshot;

/// Errors from loading fixture data.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read access to one tournament's data, owned by the host.
///
/// Implementations return the current state of the world; the caller
/// snapshots it before computing, so a slow computation never observes a
/// half-updated tournament.
pub trait TournamentStore {
    fn tournament_id(&self) -> TournamentId;
    fn teams(&self) -> Vec<Team>;
    fn matches(&self) -> Vec<Match>;
    fn ballots(&self, match_id: &MatchId) -> Vec<Ballot>;
    /// The judge-panel size this tournament was configured with, if any.
    fn panel_size(&self) -> Option<usize>;
}

/// Serializable tournament fixture: the on-disk shape of a whole
/// tournament for the reference store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentFixture {
    pub tournament: TournamentId,
    pub panel_size: Option<usize>,
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    pub ballots: Vec<Ballot>,
}

/// Reference in-memory store over a fixture.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    fixture: TournamentFixture,
    by_match: BTreeMap<MatchId, Vec<Ballot>>,
}

impl InMemoryStore {
    pub fn new(fixture: TournamentFixture) -> Self {
        let mut by_match: BTreeMap<MatchId, Vec<Ballot>> = BTreeMap::new();
        for ballot in &fixture.ballots {
            by_match
                .entry(ballot.match_id.clone())
                .or_default()
                .push(ballot.clone());
        }
        Self { fixture, by_match }
    }

    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        let fixture: TournamentFixture = serde_json::from_str(json)?;
        Ok(Self::new(fixture))
    }

    /// Load a fixture from a JSON file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn fixture(&self) -> &TournamentFixture {
        &self.fixture
    }
}

impl TournamentStore for InMemoryStore {
    fn tournament_id(&self) -> TournamentId {
        self.fixture.tournament.clone()
    }

    fn teams(&self) -> Vec<Team> {
        self.fixture.teams.clone()
    }

    fn matches(&self) -> Vec<Match> {
        self.fixture.matches.clone()
    }

    fn ballots(&self, match_id: &MatchId) -> Vec<Ballot> {
        self.by_match.get(match_id).cloned().unwrap_or_default()
    }

    fn panel_size(&self) -> Option<usize> {
        self.fixture.panel_size
    }
}

/// Snapshot the store's current state for one pure computation.
pub fn snapshot_store(store: &dyn TournamentStore) -> TournamentSnapshot {
    let matches = store.matches();
    let ballots = matches
        .iter()
        .map(|m| (m.id.clone(), store.ballots(&m.id)))
        .collect();

    TournamentSnapshot {
        tournament: store.tournament_id(),
        teams: store.teams(),
        matches,
        ballots,
    }
}
