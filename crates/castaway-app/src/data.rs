// Snapshot loading: members, roster, rankings and the posted draft order.
//
// All inputs are CSV exports from the surrounding application. Members and
// the draft order are read strictly because a silently dropped row would
// change who drafts. Roster and ranking rows that fail to parse are skipped
// with a warning.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;

use castaway_core::{CastawayId, DraftOrderEntry, PlayerId, Rankings};
use serde::{Deserialize, Serialize};
use tracing::warn;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A player who signed up for the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub player_id: PlayerId,
    /// Display name; falls back to the id when the export leaves it blank.
    #[serde(default)]
    pub player_name: Option<String>,
}

impl Member {
    pub fn display_name(&self) -> &str {
        match self.player_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.player_id.as_str(),
        }
    }
}

/// One castaway from the season roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub castaway_id: CastawayId,
    pub name: String,
    pub season: u32,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to access file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw CSV rows (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawRanking {
    player_id: PlayerId,
    castaway_id: CastawayId,
    rank: u32,
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn csv_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr)
}

fn load_members_from_reader<R: Read>(rdr: R) -> Result<Vec<Member>, csv::Error> {
    let mut reader = csv_reader(rdr);
    reader.deserialize::<Member>().collect()
}

fn load_roster_from_reader<R: Read>(rdr: R, season: u32) -> Result<Vec<RosterEntry>, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut roster = Vec::new();
    for result in reader.deserialize::<RosterEntry>() {
        match result {
            Ok(entry) if entry.season == season => roster.push(entry),
            Ok(_) => {}
            Err(e) => warn!("skipping malformed roster row: {}", e),
        }
    }
    Ok(roster)
}

fn load_rankings_from_reader<R: Read>(rdr: R) -> Result<Rankings, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut rows: HashMap<PlayerId, Vec<(u32, CastawayId)>> = HashMap::new();
    for result in reader.deserialize::<RawRanking>() {
        match result {
            Ok(raw) => rows
                .entry(raw.player_id)
                .or_default()
                .push((raw.rank, raw.castaway_id)),
            Err(e) => warn!("skipping malformed ranking row: {}", e),
        }
    }

    // Stable sort: equal ranks keep their file order.
    Ok(rows
        .into_iter()
        .map(|(player_id, mut ranked)| {
            ranked.sort_by_key(|&(rank, _)| rank);
            (player_id, ranked.into_iter().map(|(_, id)| id).collect())
        })
        .collect())
}

fn load_draft_order_from_reader<R: Read>(rdr: R) -> Result<Vec<DraftOrderEntry>, csv::Error> {
    let mut reader = csv_reader(rdr);
    let mut order = reader
        .deserialize::<DraftOrderEntry>()
        .collect::<Result<Vec<_>, _>>()?;
    order.sort_by_key(|e| e.rank);
    Ok(order)
}

fn write_draft_order_to_writer<W: Write>(wtr: W, order: &[DraftOrderEntry]) -> Result<(), csv::Error> {
    let mut sorted: Vec<&DraftOrderEntry> = order.iter().collect();
    sorted.sort_by_key(|e| e.rank);

    let mut writer = csv::Writer::from_writer(wtr);
    for entry in sorted {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Path-based public API
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<std::fs::File, SnapshotError> {
    std::fs::File::open(path).map_err(|e| SnapshotError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn csv_err(path: &Path) -> impl FnOnce(csv::Error) -> SnapshotError + '_ {
    move |e| SnapshotError::Csv {
        path: path.display().to_string(),
        source: e,
    }
}

/// Load the signed-up members. Every row must parse.
pub fn load_members(path: &Path) -> Result<Vec<Member>, SnapshotError> {
    let members = load_members_from_reader(open(path)?).map_err(csv_err(path))?;
    if let Some(blank) = members.iter().position(|m| m.player_id.as_str().is_empty()) {
        return Err(SnapshotError::Validation(format!(
            "{}: member row {} has an empty player_id",
            path.display(),
            blank + 1
        )));
    }
    Ok(members)
}

/// Load the roster rows belonging to `season`, in file order.
pub fn load_roster(path: &Path, season: u32) -> Result<Vec<RosterEntry>, SnapshotError> {
    load_roster_from_reader(open(path)?, season).map_err(csv_err(path))
}

/// Load every player's ranked castaways, most wanted first.
///
/// A missing rankings file means nobody ranked anything yet.
pub fn load_rankings(path: &Path) -> Result<Rankings, SnapshotError> {
    if !path.exists() {
        warn!("no rankings file at {}; every pick will be random", path.display());
        return Ok(Rankings::new());
    }
    load_rankings_from_reader(open(path)?).map_err(csv_err(path))
}

/// Load a posted draft order, sorted by rank. Returns `None` when no order
/// has been posted.
pub fn load_draft_order(path: &Path) -> Result<Option<Vec<DraftOrderEntry>>, SnapshotError> {
    if !path.exists() {
        return Ok(None);
    }
    let order = load_draft_order_from_reader(open(path)?).map_err(csv_err(path))?;
    Ok(if order.is_empty() { None } else { Some(order) })
}

/// Write a draft order as CSV, replacing any previous order.
pub fn write_draft_order(path: &Path, order: &[DraftOrderEntry]) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SnapshotError::Io {
            path: parent.display().to_string(),
            source: e,
        })?;
    }
    let file = std::fs::File::create(path).map_err(|e| SnapshotError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    write_draft_order_to_writer(file, order).map_err(csv_err(path))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
