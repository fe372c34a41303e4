// Identifiers, pick-order entries and the picks a draft produces.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Opaque identifier of a player taking part in a draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        PlayerId(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        PlayerId(s)
    }
}

/// Opaque identifier of one castaway in the draftable pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CastawayId(pub u32);

impl fmt::Display for CastawayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CastawayId {
    fn from(id: u32) -> Self {
        CastawayId(id)
    }
}

/// Each player's ranked castaway preferences, most wanted first.
///
/// Players missing from the map are treated as having an empty list.
pub type Rankings = HashMap<PlayerId, Vec<CastawayId>>;

// ---------------------------------------------------------------------------
// Draft order
// ---------------------------------------------------------------------------

/// A player's seat in the pick order. Ranks start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftOrderEntry {
    pub player_id: PlayerId,
    pub rank: u32,
}

// ---------------------------------------------------------------------------
// Picks and results
// ---------------------------------------------------------------------------

/// A single pick made during a snake draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPick {
    /// Sequential pick number across the whole draft (1-indexed).
    pub pick_number: u32,
    /// Player who made the pick.
    pub player_id: PlayerId,
    /// Castaway that was drafted.
    pub castaway_id: CastawayId,
    /// Round the pick was made in (1-indexed).
    pub round: u32,
    /// Position within the round's iteration order (1-indexed).
    pub rank_in_round: u32,
    /// True when the player's ranked list had nothing left and the castaway
    /// was drawn at random from the remaining pool.
    pub is_random_pick: bool,
}

/// Every pick of a completed draft, in the order they were made, plus the
/// castaways that were left over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftResult {
    picks: Vec<DraftPick>,
    undrafted: Vec<CastawayId>,
}

impl DraftResult {
    pub(crate) fn new(picks: Vec<DraftPick>, mut undrafted: Vec<CastawayId>) -> Self {
        undrafted.sort_unstable();
        DraftResult { picks, undrafted }
    }

    /// All picks in draft order.
    pub fn picks(&self) -> &[DraftPick] {
        &self.picks
    }

    pub fn into_picks(self) -> Vec<DraftPick> {
        self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Number of rounds that were played. Rounds are never partial, so this
    /// is also the number of picks each player received.
    pub fn rounds(&self) -> u32 {
        self.picks.last().map(|p| p.round).unwrap_or(0)
    }

    /// Picks of a single round, in the order they were made.
    pub fn round(&self, round: u32) -> impl Iterator<Item = &DraftPick> + '_ {
        self.picks.iter().filter(move |p| p.round == round)
    }

    /// One player's picks, in the order they were made.
    pub fn picks_for<'a>(&'a self, player_id: &'a PlayerId) -> impl Iterator<Item = &'a DraftPick> + 'a {
        self.picks.iter().filter(move |p| &p.player_id == player_id)
    }

    /// How many picks fell back to a random draw.
    pub fn random_pick_count(&self) -> usize {
        self.picks.iter().filter(|p| p.is_random_pick).count()
    }

    /// Pool castaways nobody drafted, in ascending id order.
    pub fn undrafted(&self) -> &[CastawayId] {
        &self.undrafted
    }
}
