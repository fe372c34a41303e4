// Castaway draft entry point.
//
// Startup sequence:
// 1. Parse command-line arguments
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (stderr, so stdout carries only results)
// 4. Dispatch the requested action

use std::path::PathBuf;

use anyhow::Context;
use castaway_app::commands::{self, AppContext};
use castaway_app::config;
use castaway_app::report;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "castaway-draft",
    about = "Snake draft of castaways from ranked player preferences",
    version
)]
struct Cli {
    /// Directory holding config/, defaults/ and the data files
    #[arg(short, long)]
    base_dir: Option<PathBuf>,

    /// Seed for the random number generator (overrides random.seed in config)
    #[arg(short, long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shuffle the signed-up members into a new draft order
    Order,
    /// Run the snake draft against the posted order and print the board
    Run {
        /// Print the draft run as JSON instead of the board
        #[arg(long)]
        json: bool,
    },
    /// Print the board for the most recent draft run
    Show,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base_dir = match cli.base_dir {
        Some(dir) => dir,
        None => commands::default_base_dir()?,
    };
    let mut config = config::load_config(&base_dir).context("failed to load configuration")?;
    if cli.seed.is_some() {
        config.random.seed = cli.seed;
    }

    init_tracing(&config.logging.filter)?;
    info!(
        "Config loaded: draft={}, season={}, seed={:?}",
        config.draft.name, config.draft.season, config.random.seed
    );

    let ctx = AppContext::new(base_dir, config);
    let mut rng = commands::make_rng(ctx.config.random.seed);

    match cli.command {
        Commands::Order => {
            let order = commands::post_draft_order(&ctx, &mut rng)?;
            let names = commands::load_names(&ctx);
            for entry in &order {
                let name = names
                    .players
                    .get(&entry.player_id)
                    .map(String::as_str)
                    .unwrap_or(entry.player_id.as_str());
                println!("{:>3}. {}", entry.rank, name);
            }
        }
        Commands::Run { json } => {
            let run = commands::run_draft(&ctx, &mut rng)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&run)?);
            } else {
                print!("{}", report::render_board(&run, &commands::load_names(&ctx)));
            }
        }
        Commands::Show => {
            let run = commands::load_results(&ctx)?;
            print!("{}", report::render_board(&run, &commands::load_names(&ctx)));
        }
    }

    Ok(())
}

/// Initialize tracing to stderr. `RUST_LOG` takes precedence over the
/// configured filter.
fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
