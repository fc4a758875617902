//! Bowlboard Runner — standings orchestration over the host boundary.
//!
//! This crate builds on `bowlboard-core` to provide:
//! - The `TournamentStore` read boundary plus a fixture-backed reference store
//! - TOML configuration with panel-size reconciliation
//! - The recompute service (single tournament and parallel batch)
//! - JSON/CSV/Markdown artifact export with schema versioning

pub mod config;
pub mod export;
pub mod runner;
pub mod store;

pub use config::{ConfigError, ConfigId, StandingsConfig};
pub use export::{
    export_json, export_standings_csv, generate_report, import_json, load_artifacts,
    save_artifacts,
};
pub use runner::{recompute, recompute_all, RecomputeError, StandingsArtifact, SCHEMA_VERSION};
pub use store::{snapshot_store, InMemoryStore, StoreError, TournamentFixture, TournamentStore};
