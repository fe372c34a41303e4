// Admin actions: post a draft order, run the draft, show the results.
//
// Each action reads a full snapshot from disk, hands it to the draft engine
// and writes the outcome back. The caller is responsible for making sure
// only one of these runs against a given data directory at a time.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use castaway_core::{generate_draft_order, run_snake_draft, CastawayId, DraftOrderEntry, SnakeDraftParams};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::{resolve_path, Config};
use crate::data;
use crate::report::{self, DraftRun, Names};

/// Loaded configuration plus the directory its relative paths resolve
/// against.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub base_dir: PathBuf,
    pub config: Config,
}

impl AppContext {
    pub fn new(base_dir: impl Into<PathBuf>, config: Config) -> Self {
        AppContext {
            base_dir: base_dir.into(),
            config,
        }
    }

    fn path(&self, configured: &str) -> PathBuf {
        resolve_path(&self.base_dir, configured)
    }

    pub fn draft_order_path(&self) -> PathBuf {
        self.path(&self.config.data.draft_order)
    }

    pub fn results_path(&self) -> PathBuf {
        self.path(&self.config.data.results)
    }
}

/// Seeded generator when `seed` is set, entropy-seeded otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Shuffle the signed-up members into a new pick order and write it out,
/// replacing any order posted before.
pub fn post_draft_order<R: Rng + ?Sized>(ctx: &AppContext, rng: &mut R) -> Result<Vec<DraftOrderEntry>> {
    let members_path = ctx.path(&ctx.config.data.members);
    let members = data::load_members(&members_path).context("failed to load members")?;
    info!("Loaded {} members from {}", members.len(), members_path.display());

    let player_ids: Vec<_> = members.iter().map(|m| m.player_id.clone()).collect();
    let order = generate_draft_order(&player_ids, rng).context("failed to generate draft order")?;

    let order_path = ctx.draft_order_path();
    data::write_draft_order(&order_path, &order).context("failed to write draft order")?;
    info!("Posted draft order for {} players to {}", order.len(), order_path.display());

    Ok(order)
}

/// Run the snake draft against the posted order and write the results.
pub fn run_draft<R: Rng + ?Sized>(ctx: &AppContext, rng: &mut R) -> Result<DraftRun> {
    let order_path = ctx.draft_order_path();
    let Some(draft_order) = data::load_draft_order(&order_path).context("failed to load draft order")? else {
        bail!("draft order has not been posted yet ({})", order_path.display());
    };

    let rankings = data::load_rankings(&ctx.path(&ctx.config.data.rankings))
        .context("failed to load rankings")?;

    let season = ctx.config.draft.season;
    let roster = data::load_roster(&ctx.path(&ctx.config.data.roster), season)
        .context("failed to load roster")?;
    info!(
        "Loaded {} players in order, {} rankings, {} castaways for season {}",
        draft_order.len(),
        rankings.len(),
        roster.len(),
        season
    );

    let pool: Vec<CastawayId> = roster.iter().map(|r| r.castaway_id).collect();
    let params = SnakeDraftParams {
        draft_order: &draft_order,
        player_rankings: &rankings,
        available_castaways: &pool,
    };
    let result = run_snake_draft(&params, rng).context("failed to run snake draft")?;

    let run = DraftRun {
        draft_name: ctx.config.draft.name.clone(),
        season,
        ran_at: Utc::now(),
        seed: ctx.config.random.seed,
        draft_order,
        result,
    };

    let results_path = ctx.results_path();
    report::write_run(&results_path, &run)?;
    info!("Wrote {} picks to {}", run.result.len(), results_path.display());

    Ok(run)
}

/// Load the most recent run from disk.
pub fn load_results(ctx: &AppContext) -> Result<DraftRun> {
    report::read_run(&ctx.results_path())
}

/// Collect display names from the members and roster snapshots. Missing or
/// unreadable files just leave ids unnamed.
pub fn load_names(ctx: &AppContext) -> Names {
    let mut names = Names::default();
    if let Ok(members) = data::load_members(&ctx.path(&ctx.config.data.members)) {
        for member in members {
            let display = member.display_name().to_string();
            names.players.insert(member.player_id, display);
        }
    }
    if let Ok(roster) = data::load_roster(&ctx.path(&ctx.config.data.roster), ctx.config.draft.season) {
        for entry in roster {
            names.castaways.insert(entry.castaway_id, entry.name);
        }
    }
    names
}

/// Base directory used when none is given on the command line.
pub fn default_base_dir() -> Result<PathBuf> {
    std::env::current_dir().context("failed to determine current directory")
}
