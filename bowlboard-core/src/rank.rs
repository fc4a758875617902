//! Ranking — win-share ordering plus the tie-break ladder.
//!
//! Teams are ordered by total win share, descending. Each group of teams
//! with equal win share then descends the ladder:
//!
//! 1. Head-to-head — only for a two-team group that met exactly once with
//!    a decisive result
//! 2. Cumulative score differential, descending
//! 3. Cumulative votes won, descending
//! 4. Coin flip
//!
//! Every rung evaluates its whole (sub-)group at once and splits it into
//! smaller sub-groups; a sub-group left perfectly tied continues with the
//! next rung. The ladder never revisits an earlier rung — a pair isolated
//! by score differential does not get a second head-to-head check. Each
//! boundary between adjacent standings is annotated with the criterion
//! that decided it.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{TeamId, TournamentId};
use crate::draw::{DrawRecord, DrawSource};
use crate::record::TeamRecord;

/// The criterion that separated a standing from the one ranked directly
/// above it. `None` on a standing means it is ranked first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeparatedBy {
    WinShare,
    HeadToHead,
    ScoreDifferential,
    VotesWon,
    CoinFlip,
}

impl fmt::Display for SeparatedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SeparatedBy::WinShare => "win share",
            SeparatedBy::HeadToHead => "head-to-head",
            SeparatedBy::ScoreDifferential => "score differential",
            SeparatedBy::VotesWon => "votes won",
            SeparatedBy::CoinFlip => "coin flip",
        };
        write!(f, "{label}")
    }
}

/// One row of the final standings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub team: TeamId,
    /// 1-based rank. Always a total order; coin flips leave no residual ties.
    pub rank: u32,
    pub record: TeamRecord,
    pub separated_by: Option<SeparatedBy>,
}

/// Ladder rungs below the primary win-share ordering, in application order.
#[derive(Debug, Clone, Copy)]
enum Rung {
    HeadToHead,
    ScoreDifferential,
    VotesWon,
    CoinFlip,
}

/// Order all teams into standings.
///
/// Deterministic for rungs 1–3; coin flips are deterministic given the
/// `DrawSource` master seed. Returns the standings plus the audit record
/// of every draw taken.
pub fn rank_teams(
    tournament: &TournamentId,
    records: &BTreeMap<TeamId, TeamRecord>,
    source: &DrawSource,
) -> (Vec<Standing>, Vec<DrawRecord>) {
    // BTreeMap iteration gives a stable, id-sorted base order; the stable
    // sort then groups equal win shares without disturbing it.
    let base: Vec<TeamId> = records.keys().cloned().collect();
    let groups = split_by_key(base, records, |r| r.win_share);

    let mut draws = Vec::new();
    let mut ordered: Vec<(TeamId, Option<SeparatedBy>)> = Vec::new();

    for group in groups {
        let resolved = resolve_group(group, records, Rung::HeadToHead, tournament, source, &mut draws);
        for (i, (team, sep)) in resolved.into_iter().enumerate() {
            let sep = if i == 0 {
                // Group boundary: decided by the primary criterion, unless
                // this is the very first row.
                if ordered.is_empty() {
                    None
                } else {
                    Some(SeparatedBy::WinShare)
                }
            } else {
                sep
            };
            ordered.push((team, sep));
        }
    }

    let standings = ordered
        .into_iter()
        .enumerate()
        .map(|(i, (team, separated_by))| Standing {
            rank: (i + 1) as u32,
            record: records[&team].clone(),
            team,
            separated_by,
        })
        .collect();

    (standings, draws)
}

/// Fully order one tied group, starting at `rung`.
///
/// Invariant: every element except the first carries a separator.
fn resolve_group(
    group: Vec<TeamId>,
    records: &BTreeMap<TeamId, TeamRecord>,
    rung: Rung,
    tournament: &TournamentId,
    source: &DrawSource,
    draws: &mut Vec<DrawRecord>,
) -> Vec<(TeamId, Option<SeparatedBy>)> {
    if group.len() < 2 {
        return group.into_iter().map(|t| (t, None)).collect();
    }

    match rung {
        Rung::HeadToHead => {
            if group.len() == 2 {
                if let Some(a_won) = decisive_meeting(&records[&group[0]], &group[1]) {
                    let (winner, loser) = if a_won {
                        (group[0].clone(), group[1].clone())
                    } else {
                        (group[1].clone(), group[0].clone())
                    };
                    return vec![(winner, None), (loser, Some(SeparatedBy::HeadToHead))];
                }
            }
            // Drawn, never met, met more than once, or more than two teams:
            // the whole group passes through unresolved.
            resolve_group(group, records, Rung::ScoreDifferential, tournament, source, draws)
        }

        Rung::ScoreDifferential => resolve_by_key(
            group,
            records,
            |r| r.score_diff,
            SeparatedBy::ScoreDifferential,
            Rung::VotesWon,
            tournament,
            source,
            draws,
        ),

        Rung::VotesWon => resolve_by_key(
            group,
            records,
            |r| r.votes,
            SeparatedBy::VotesWon,
            Rung::CoinFlip,
            tournament,
            source,
            draws,
        ),

        Rung::CoinFlip => {
            let record = source.draw(tournament, &group);
            let mut out: Vec<(TeamId, Option<SeparatedBy>)> = record
                .order
                .iter()
                .map(|t| (t.clone(), Some(SeparatedBy::CoinFlip)))
                .collect();
            out[0].1 = None;
            draws.push(record);
            out
        }
    }
}

/// Apply one numeric rung: split the group by `key` descending, recurse
/// into each sub-group with the next rung, and annotate the boundaries.
#[allow(clippy::too_many_arguments)]
fn resolve_by_key(
    group: Vec<TeamId>,
    records: &BTreeMap<TeamId, TeamRecord>,
    key: impl Fn(&TeamRecord) -> f64 + Copy,
    label: SeparatedBy,
    next: Rung,
    tournament: &TournamentId,
    source: &DrawSource,
    draws: &mut Vec<DrawRecord>,
) -> Vec<(TeamId, Option<SeparatedBy>)> {
    let subgroups = split_by_key(group, records, key);

    let mut out = Vec::new();
    for (gi, subgroup) in subgroups.into_iter().enumerate() {
        let resolved = resolve_group(subgroup, records, next, tournament, source, draws);
        for (i, (team, sep)) in resolved.into_iter().enumerate() {
            let sep = if i == 0 {
                if gi == 0 {
                    None
                } else {
                    Some(label)
                }
            } else {
                sep
            };
            out.push((team, sep));
        }
    }
    out
}

/// Stable-sort a group by `key` descending and split it into runs of equal
/// key. NaN keys compare equal, mirroring the sort.
fn split_by_key(
    group: Vec<TeamId>,
    records: &BTreeMap<TeamId, TeamRecord>,
    key: impl Fn(&TeamRecord) -> f64 + Copy,
) -> Vec<Vec<TeamId>> {
    let mut sorted = group;
    sorted.sort_by(|a, b| {
        key(&records[b])
            .partial_cmp(&key(&records[a]))
            .unwrap_or(Ordering::Equal)
    });

    let mut out: Vec<Vec<TeamId>> = Vec::new();
    for team in sorted {
        let k = key(&records[&team]);
        match out.last_mut() {
            Some(run) if key(&records[&run[0]]) == k => run.push(team),
            _ => out.push(vec![team]),
        }
    }
    out
}

/// If the two teams met exactly once and the meeting was decisive, returns
/// whether team `a` won it. Drawn, absent, or repeated meetings yield `None`.
fn decisive_meeting(a: &TeamRecord, b: &TeamId) -> Option<bool> {
    let mut meetings = a.results_against(b);
    let only = meetings.next()?;
    if meetings.next().is_some() {
        return None;
    }
    if only.win_share == 1.0 {
        Some(true)
    } else if only.win_share == 0.0 {
        Some(false)
    } else {
        None
    }
}
