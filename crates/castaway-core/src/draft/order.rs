// Random pick-order generation.

use std::collections::HashSet;

use rand::Rng;

use crate::draft::types::{DraftOrderEntry, PlayerId};
use crate::error::DraftError;

/// Shuffle the given players and assign each a rank 1..N.
///
/// The caller's slice is left untouched; the shuffle runs over a copy. Every
/// one of the N! orderings is equally likely for a uniform `rng`.
pub fn generate_draft_order<R: Rng + ?Sized>(
    player_ids: &[PlayerId],
    rng: &mut R,
) -> Result<Vec<DraftOrderEntry>, DraftError> {
    if player_ids.is_empty() {
        return Err(DraftError::NoParticipants);
    }

    let mut seen = HashSet::with_capacity(player_ids.len());
    for id in player_ids {
        if !seen.insert(id) {
            return Err(DraftError::DuplicatePlayer(id.clone()));
        }
    }

    let mut shuffled = player_ids.to_vec();
    fisher_yates(&mut shuffled, rng);

    Ok(shuffled
        .into_iter()
        .zip(1u32..)
        .map(|(player_id, rank)| DraftOrderEntry { player_id, rank })
        .collect())
}

/// In-place Fisher-Yates shuffle.
fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
