// Library root: the draft engine shared by the command-line app and tests.
//
// Two pieces, used in sequence: `generate_draft_order` shuffles the players
// into a pick order, and `run_snake_draft` allocates the castaway pool
// against that order and each player's ranked preferences.

pub mod draft;
pub mod error;

pub use draft::order::generate_draft_order;
pub use draft::snake::{run_snake_draft, SnakeDraftParams};
pub use draft::types::{CastawayId, DraftOrderEntry, DraftPick, DraftResult, PlayerId, Rankings};
pub use error::DraftError;
