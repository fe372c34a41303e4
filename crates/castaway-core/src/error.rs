// Error types for draft input validation.

use thiserror::Error;

use crate::draft::types::{CastawayId, PlayerId};

/// Invalid input handed to the order generator or the snake allocator.
///
/// Every variant is fatal to the call: no partial order or pick list is
/// produced alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("no participants to order")]
    NoParticipants,

    #[error("draft order ranks must form 1..={expected}, found rank {found}")]
    InvalidRanks { expected: usize, found: u32 },

    #[error("rank {0} is assigned to more than one player")]
    DuplicateRank(u32),

    #[error("player {0} appears more than once")]
    DuplicatePlayer(PlayerId),

    #[error("castaway {0} appears more than once in the pool")]
    DuplicateCastaway(CastawayId),
}
