//! Standings recompute service — wires the store boundary to the core
//! pipeline.
//!
//! Two entry points:
//! - `recompute()`: snapshot one store, run the pipeline, wrap the report
//!   with host metadata. Used by the CLI.
//! - `recompute_all()`: the same over many independent tournaments in
//!   parallel. Computations share nothing, so this is a plain rayon map.
//!
//! Hosts that rebuild standings reactively (after every score submission)
//! call `recompute()` again rather than maintaining incremental state; a
//! new completed match invalidates the previous table wholesale.

use chrono::NaiveDateTime;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use bowlboard_core::domain::TournamentId;
use bowlboard_core::standings::{compute_standings, StandingsError, StandingsReport};

use crate::config::{ConfigError, StandingsConfig};
use crate::store::{snapshot_store, TournamentStore};

/// Errors from the recompute service.
#[derive(Debug, Error)]
pub enum RecomputeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("standings error: {0}")]
    Standings(#[from] StandingsError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// A standings report wrapped with the metadata hosts persist alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsArtifact {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub tournament: TournamentId,
    pub config_id: String,
    pub computed_at: NaiveDateTime,
    pub report: StandingsReport,
}

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Recompute standings for one tournament.
pub fn recompute(
    store: &dyn TournamentStore,
    config: &StandingsConfig,
) -> Result<StandingsArtifact, RecomputeError> {
    let engine_config = config.to_engine_config(store.panel_size())?;
    let snapshot = snapshot_store(store);
    let report = compute_standings(&snapshot, &engine_config)?;

    for excluded in &report.excluded {
        warn!(
            tournament = %report.tournament,
            match_id = %excluded.match_id,
            reason = %excluded.reason,
            "match excluded from standings"
        );
    }
    info!(
        tournament = %report.tournament,
        matches_used = report.matches_used,
        excluded = report.excluded.len(),
        coin_flips = report.draws.len(),
        "standings recomputed"
    );

    Ok(StandingsArtifact {
        schema_version: SCHEMA_VERSION,
        tournament: report.tournament.clone(),
        config_id: config.config_id(),
        computed_at: chrono::Utc::now().naive_utc(),
        report,
    })
}

/// Recompute standings for many independent tournaments in parallel.
///
/// Results come back in input order; one tournament's failure never
/// aborts the others.
pub fn recompute_all(
    stores: &[&(dyn TournamentStore + Sync)],
    config: &StandingsConfig,
) -> Vec<Result<StandingsArtifact, RecomputeError>> {
    stores
        .par_iter()
        .map(|store| recompute(*store, config))
        .collect()
}
