// Remaining-pool bookkeeping for a single draft run.

use std::collections::HashMap;

use rand::Rng;

use crate::draft::types::CastawayId;
use crate::error::DraftError;

/// The castaways still available, with constant-time membership, removal
/// and uniform random choice.
///
/// `ids` is dense; `index` maps each id to its slot in `ids`. Removal swaps
/// the last id into the vacated slot so both stay in step.
#[derive(Debug, Clone)]
pub(crate) struct Pool {
    ids: Vec<CastawayId>,
    index: HashMap<CastawayId, usize>,
}

impl Pool {
    /// Build a pool from the caller's list. The list itself is copied, never
    /// modified. A castaway listed twice is rejected.
    pub(crate) fn new(available: &[CastawayId]) -> Result<Self, DraftError> {
        let mut index = HashMap::with_capacity(available.len());
        for (slot, &id) in available.iter().enumerate() {
            if index.insert(id, slot).is_some() {
                return Err(DraftError::DuplicateCastaway(id));
            }
        }
        Ok(Pool {
            ids: available.to_vec(),
            index,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }

    pub(crate) fn contains(&self, id: CastawayId) -> bool {
        self.index.contains_key(&id)
    }

    /// Remove `id`, returning whether it was present.
    pub(crate) fn remove(&mut self, id: CastawayId) -> bool {
        let Some(slot) = self.index.remove(&id) else {
            return false;
        };
        self.ids.swap_remove(slot);
        if let Some(&moved) = self.ids.get(slot) {
            self.index.insert(moved, slot);
        }
        true
    }

    /// Draw one castaway uniformly at random without removing it.
    pub(crate) fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<CastawayId> {
        if self.ids.is_empty() {
            return None;
        }
        Some(self.ids[rng.gen_range(0..self.ids.len())])
    }

    pub(crate) fn into_remaining(self) -> Vec<CastawayId> {
        self.ids
    }
}
