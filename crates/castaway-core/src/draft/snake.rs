// Snake draft allocation.
//
// Rules:
//   - Odd rounds (1, 3, 5, ...) pick in rank order (rank 1 -> rank N).
//   - Even rounds (2, 4, 6, ...) pick in reverse rank order (rank N -> rank 1).
//   - A round only starts when every player can receive a pick; the draft
//     stops the moment fewer than N castaways remain.
//
// Each turn drafts the player's highest-ranked castaway that is still in the
// pool. A player with nothing left on their list gets a uniform random draw
// from whatever remains.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::draft::pool::Pool;
use crate::draft::types::{CastawayId, DraftOrderEntry, DraftPick, DraftResult, PlayerId, Rankings};
use crate::error::DraftError;

/// Inputs for one snake draft. Everything is borrowed; the draft never
/// modifies the caller's collections.
#[derive(Debug, Clone, Copy)]
pub struct SnakeDraftParams<'a> {
    /// Players with their seats in the pick order. Entries may be in any
    /// order, but ranks must be exactly 1..N.
    pub draft_order: &'a [DraftOrderEntry],
    /// Each player's ranked castaway preferences, most wanted first.
    pub player_rankings: &'a Rankings,
    /// Castaways eligible to be drafted in this run.
    pub available_castaways: &'a [CastawayId],
}

/// Walks one player's ranked list across turns.
///
/// Castaways only ever leave the pool, so anything skipped once is never
/// available again and the cursor never moves backwards.
struct PreferenceCursor<'a> {
    prefs: &'a [CastawayId],
    next: usize,
}

impl<'a> PreferenceCursor<'a> {
    fn new(prefs: &'a [CastawayId]) -> Self {
        PreferenceCursor { prefs, next: 0 }
    }

    /// Advance to the first castaway still in `pool`, consuming it and every
    /// entry before it. Leaves the cursor exhausted when nothing is found.
    fn next_available(&mut self, pool: &Pool) -> Option<CastawayId> {
        while let Some(&candidate) = self.prefs.get(self.next) {
            self.next += 1;
            if pool.contains(candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Run a snake draft to completion and return every pick, in order.
///
/// `rng` is only consulted for fallback picks.
pub fn run_snake_draft<R: Rng + ?Sized>(
    params: &SnakeDraftParams<'_>,
    rng: &mut R,
) -> Result<DraftResult, DraftError> {
    let seats = players_by_rank(params.draft_order)?;
    let player_count = seats.len();

    let seated: HashSet<&PlayerId> = seats.iter().copied().collect();
    for player_id in params.player_rankings.keys() {
        if !seated.contains(player_id) {
            warn!("ignoring rankings for '{}': not in the draft order", player_id);
        }
    }

    let mut pool = Pool::new(params.available_castaways)?;
    let mut cursors: Vec<PreferenceCursor<'_>> = seats
        .iter()
        .map(|&player_id| {
            let prefs = params
                .player_rankings
                .get(player_id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            PreferenceCursor::new(prefs)
        })
        .collect();

    let mut picks = Vec::with_capacity(pool.len() - pool.len() % player_count);
    let mut round: u32 = 1;

    'draft: while pool.len() >= player_count {
        let forward = round % 2 == 1;

        for (slot, rank_in_round) in (0..player_count).zip(1u32..) {
            let seat = if forward { slot } else { player_count - 1 - slot };
            let player_id = seats[seat];

            let choice = match cursors[seat].next_available(&pool) {
                Some(castaway_id) => Some((castaway_id, false)),
                None => pool.choose(rng).map(|castaway_id| (castaway_id, true)),
            };
            // The round-start check leaves at least one castaway per turn.
            let Some((castaway_id, is_random_pick)) = choice else {
                break 'draft;
            };

            pool.remove(castaway_id);

            let pick = DraftPick {
                pick_number: picks.len() as u32 + 1,
                player_id: player_id.clone(),
                castaway_id,
                round,
                rank_in_round,
                is_random_pick,
            };
            debug!(
                "pick {}: round {} #{} {} -> castaway {}{}",
                pick.pick_number,
                round,
                rank_in_round,
                player_id,
                castaway_id,
                if is_random_pick { " (random)" } else { "" }
            );
            picks.push(pick);
        }

        round += 1;
    }

    let result = DraftResult::new(picks, pool.into_remaining());
    info!(
        "snake draft complete: {} picks over {} rounds ({} random), {} castaways undrafted",
        result.len(),
        result.rounds(),
        result.random_pick_count(),
        result.undrafted().len()
    );
    Ok(result)
}

/// Validate the draft order and return player ids indexed by rank - 1.
fn players_by_rank(order: &[DraftOrderEntry]) -> Result<Vec<&PlayerId>, DraftError> {
    if order.is_empty() {
        return Err(DraftError::NoParticipants);
    }

    let count = order.len();
    let mut seats: Vec<Option<&PlayerId>> = vec![None; count];
    let mut seen = HashSet::with_capacity(count);

    for entry in order {
        let rank = entry.rank as usize;
        if rank == 0 || rank > count {
            return Err(DraftError::InvalidRanks {
                expected: count,
                found: entry.rank,
            });
        }
        if !seen.insert(&entry.player_id) {
            return Err(DraftError::DuplicatePlayer(entry.player_id.clone()));
        }
        let seat = &mut seats[rank - 1];
        if seat.is_some() {
            return Err(DraftError::DuplicateRank(entry.rank));
        }
        *seat = Some(&entry.player_id);
    }

    // N entries with N distinct ranks in 1..=N fill every seat.
    Ok(seats.into_iter().flatten().collect())
}
