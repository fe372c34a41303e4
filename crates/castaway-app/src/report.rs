// Draft run records and the plain-text results board.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use castaway_core::{CastawayId, DraftOrderEntry, DraftResult, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything a completed draft produced, as handed back to the ranking
/// store for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRun {
    pub draft_name: String,
    pub season: u32,
    pub ran_at: DateTime<Utc>,
    /// Seed used for fallback picks, when one was configured.
    #[serde(default)]
    pub seed: Option<u64>,
    pub draft_order: Vec<DraftOrderEntry>,
    #[serde(flatten)]
    pub result: DraftResult,
}

/// Write a run as pretty-printed JSON, creating parent directories.
pub fn write_run(path: &Path, run: &DraftRun) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(run).context("failed to serialize draft run")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Read a previously written run.
pub fn read_run(path: &Path) -> Result<DraftRun> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("no draft results at {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Display names for players and castaways. Unknown ids render as the raw id.
#[derive(Debug, Clone, Default)]
pub struct Names {
    pub players: HashMap<PlayerId, String>,
    pub castaways: HashMap<CastawayId, String>,
}

impl Names {
    fn player(&self, id: &PlayerId) -> String {
        self.players
            .get(id)
            .cloned()
            .unwrap_or_else(|| id.to_string())
    }

    fn castaway(&self, id: CastawayId) -> String {
        match self.castaways.get(&id) {
            Some(name) => format!("{name} (#{id})"),
            None => format!("#{id}"),
        }
    }
}

/// Render a run as a board: picks grouped by round, then each player's
/// roster, then the castaways nobody drafted. Random picks are marked.
pub fn render_board(run: &DraftRun, names: &Names) -> String {
    let result = &run.result;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} (season {}): {} picks over {} rounds, {} random",
        run.draft_name,
        run.season,
        result.len(),
        result.rounds(),
        result.random_pick_count()
    );
    let _ = writeln!(out, "Ran at {}", run.ran_at.format("%Y-%m-%d %H:%M:%S UTC"));

    let name_width = run
        .draft_order
        .iter()
        .map(|e| names.player(&e.player_id).len())
        .max()
        .unwrap_or(0);

    for round in 1..=result.rounds() {
        let _ = writeln!(out, "\nRound {round}");
        for pick in result.round(round) {
            let _ = writeln!(
                out,
                "  {:>2}. {:<width$}  {}{}",
                pick.rank_in_round,
                names.player(&pick.player_id),
                names.castaway(pick.castaway_id),
                if pick.is_random_pick { "  [random]" } else { "" },
                width = name_width
            );
        }
    }

    if !result.is_empty() {
        let _ = writeln!(out, "\nRosters");
        for entry in &run.draft_order {
            let roster: Vec<String> = result
                .picks_for(&entry.player_id)
                .map(|p| names.castaway(p.castaway_id))
                .collect();
            let _ = writeln!(
                out,
                "  {:<width$}  {}",
                names.player(&entry.player_id),
                roster.join(", "),
                width = name_width
            );
        }
    }

    if !result.undrafted().is_empty() {
        let undrafted: Vec<String> = result
            .undrafted()
            .iter()
            .map(|&id| names.castaway(id))
            .collect();
        let _ = writeln!(out, "\nUndrafted: {}", undrafted.join(", "));
    }

    out
}
