//! Bowlboard Core — standings engine for judged team competitions.
//!
//! This crate contains the heart of the standings computation:
//! - Domain types (teams, matches, ballots, ids)
//! - Ballot resolution into match outcomes
//! - Team record accumulation over a partial round-robin schedule
//! - Win-share ranking with the four-rung tie-break ladder
//! - Seeded coin-flip draws with an audit trail
//!
//! The pipeline is pure and synchronous: an immutable tournament snapshot
//! goes in, an ordered standings report comes out. All non-determinism is
//! isolated behind the injected coin-flip master seed.

pub mod domain;
pub mod draw;
pub mod outcome;
pub mod rank;
pub mod record;
pub mod standings;
