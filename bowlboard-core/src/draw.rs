//! Coin-flip draws — the last-resort random tie-break.
//!
//! A master seed injected by the host is expanded into a deterministic
//! sub-seed per (tournament, tied group) via BLAKE3. Derivation hashes the
//! group in sorted order, so the sub-seed is independent of the order the
//! ladder happened to present the teams in. The sub-seed drives a
//! Fisher–Yates shuffle over the group; every member has equal probability
//! of every position.
//!
//! Each draw is recorded with its sub-seed and the resulting order so a
//! host can audit or replay it. Nothing about the draw is derivable from
//! team data — only from the injected master seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::domain::{TeamId, TournamentId};

/// Deterministic source of coin-flip draws for one standings computation.
#[derive(Debug, Clone)]
pub struct DrawSource {
    master_seed: u64,
}

/// Audit record of one coin-flip draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    /// The BLAKE3-derived sub-seed that produced this draw.
    pub sub_seed: u64,
    /// The tied group, in its pre-draw (sorted) order.
    pub group: Vec<TeamId>,
    /// The drawn order, best rank first.
    pub order: Vec<TeamId>,
}

impl DrawSource {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive the sub-seed for a tied group.
    ///
    /// The group is hashed in sorted order: presenting the same teams in a
    /// different order yields the same sub-seed, hence the same draw.
    pub fn sub_seed(&self, tournament: &TournamentId, group: &[TeamId]) -> u64 {
        let mut sorted: Vec<&TeamId> = group.iter().collect();
        sorted.sort();

        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(tournament.0.as_bytes());
        for team in sorted {
            hasher.update(team.0.as_bytes());
            hasher.update(&[0]);
        }
        let hash = hasher.finalize();
        u64::from_le_bytes(hash.as_bytes()[..8].try_into().expect("BLAKE3 output is 32 bytes"))
    }

    /// Draw a uniformly random total order over a tied group.
    pub fn draw(&self, tournament: &TournamentId, group: &[TeamId]) -> DrawRecord {
        let sub_seed = self.sub_seed(tournament, group);
        let mut rng = StdRng::seed_from_u64(sub_seed);

        let mut pre_draw: Vec<TeamId> = group.to_vec();
        pre_draw.sort();
        let mut order = pre_draw.clone();
        order.shuffle(&mut rng);

        DrawRecord {
            sub_seed,
            group: pre_draw,
            order,
        }
    }
}
