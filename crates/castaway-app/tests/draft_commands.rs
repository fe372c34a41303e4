// Integration tests for the admin actions.
//
// Each test builds a throwaway data directory (config + CSV snapshots), then
// drives the same functions the binary calls.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use castaway_app::commands::{self, AppContext};
use castaway_app::config;
use castaway_app::data;
use castaway_app::report;
use castaway_core::{CastawayId, PlayerId};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ===========================================================================
// Test helpers
// ===========================================================================

const DRAFT_TOML: &str = r#"
[draft]
name = "Integration Draft"
season = 50

[random]
seed = 11

[data]
members = "data/members.csv"
roster = "data/roster.csv"
rankings = "data/rankings.csv"
draft_order = "data/draft_order.csv"
results = "out/results.json"
"#;

const MEMBERS: &str = "player_id,player_name\np1,Alice\np2,Bob\np3,Carol\n";

/// Seven castaways in season 50 (plus one from another season), so three
/// players get two full rounds and one castaway is left over.
const ROSTER: &str = "castaway_id,name,season\n\
                      1,Parvati,50\n\
                      2,Sandra,50\n\
                      3,Tony,50\n\
                      4,Kim,50\n\
                      5,Yul,50\n\
                      6,Cirie,50\n\
                      7,Jeremy,50\n\
                      99,Richard,1\n";

const RANKINGS: &str = "player_id,castaway_id,rank\n\
                        p1,3,1\n\
                        p1,1,2\n\
                        p2,3,1\n\
                        p2,2,2\n\
                        p2,4,3\n\
                        p3,99,1\n\
                        p3,5,2\n\
                        p3,6,3\n";

/// Build a fresh data directory under the system temp dir.
fn setup(name: &str) -> PathBuf {
    let base = std::env::temp_dir().join(format!("castaway_app_it_{name}"));
    let _ = fs::remove_dir_all(&base);
    fs::create_dir_all(base.join("defaults")).unwrap();
    fs::create_dir_all(base.join("data")).unwrap();
    fs::write(base.join("defaults/draft.toml"), DRAFT_TOML).unwrap();
    fs::write(base.join("data/members.csv"), MEMBERS).unwrap();
    fs::write(base.join("data/roster.csv"), ROSTER).unwrap();
    fs::write(base.join("data/rankings.csv"), RANKINGS).unwrap();
    base
}

fn context(base: &Path) -> AppContext {
    let config = config::load_config(base).expect("config should load from defaults");
    AppContext::new(base, config)
}

fn write_order(base: &Path, rows: &str) {
    fs::write(base.join("data/draft_order.csv"), format!("player_id,rank\n{rows}")).unwrap();
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn first_load_copies_defaults_into_config() {
    let base = setup("copy_defaults");
    let ctx = context(&base);
    assert!(base.join("config/draft.toml").is_file());
    assert_eq!(ctx.config.draft.name, "Integration Draft");
    assert_eq!(ctx.config.random.seed, Some(11));
    let _ = fs::remove_dir_all(&base);
}

#[test]
fn post_order_writes_every_member_once() {
    let base = setup("post_order");
    let ctx = context(&base);

    let order = commands::post_draft_order(&ctx, &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(order.len(), 3);

    let stored = data::load_draft_order(&ctx.draft_order_path())
        .unwrap()
        .expect("order should be posted");
    assert_eq!(stored, order);

    let players: HashSet<&str> = stored.iter().map(|e| e.player_id.as_str()).collect();
    assert_eq!(players, HashSet::from(["p1", "p2", "p3"]));
    let ranks: Vec<u32> = stored.iter().map(|e| e.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);

    let _ = fs::remove_dir_all(&base);
}

#[test]
fn reposting_replaces_the_previous_order() {
    let base = setup("repost");
    let ctx = context(&base);
    write_order(&base, "ghost,1\n");

    commands::post_draft_order(&ctx, &mut StdRng::seed_from_u64(4)).unwrap();
    let stored = data::load_draft_order(&ctx.draft_order_path()).unwrap().unwrap();
    assert_eq!(stored.len(), 3);
    assert!(stored.iter().all(|e| e.player_id.as_str() != "ghost"));

    let _ = fs::remove_dir_all(&base);
}

#[test]
fn run_requires_a_posted_order() {
    let base = setup("no_order");
    let ctx = context(&base);

    let err = commands::run_draft(&ctx, &mut StdRng::seed_from_u64(5)).unwrap_err();
    assert!(err.to_string().contains("draft order has not been posted yet"));
    assert!(!ctx.results_path().exists());

    let _ = fs::remove_dir_all(&base);
}

#[test]
fn run_drafts_season_pool_by_preference() {
    let base = setup("run_fixed_order");
    let ctx = context(&base);
    write_order(&base, "p1,1\np2,2\np3,3\n");

    let run = commands::run_draft(&ctx, &mut StdRng::seed_from_u64(6)).unwrap();
    let picks = run.result.picks();

    // Round 1: p1 takes 3, p2 falls to 2 (3 gone), p3 skips 99 (other season)
    // and takes 5.
    assert_eq!(picks[0].player_id, PlayerId::from("p1"));
    assert_eq!(picks[0].castaway_id, CastawayId(3));
    assert_eq!(picks[1].castaway_id, CastawayId(2));
    assert_eq!(picks[2].castaway_id, CastawayId(5));
    assert!(picks[..3].iter().all(|p| !p.is_random_pick));

    // Round 2 reverses: p3 takes 6, p2 takes 4, p1 takes 1.
    assert_eq!(picks[3].player_id, PlayerId::from("p3"));
    assert_eq!(picks[3].castaway_id, CastawayId(6));
    assert_eq!(picks[4].player_id, PlayerId::from("p2"));
    assert_eq!(picks[4].castaway_id, CastawayId(4));
    assert!(!picks[4].is_random_pick);
    assert_eq!(picks[5].player_id, PlayerId::from("p1"));
    assert_eq!(picks[5].castaway_id, CastawayId(1));

    // Seven castaways, three players: two rounds and one left over.
    assert_eq!(run.result.len(), 6);
    assert_eq!(run.result.rounds(), 2);
    assert_eq!(run.result.random_pick_count(), 0);
    assert_eq!(run.result.undrafted(), &[CastawayId(7)]);
    assert!(picks.iter().all(|p| p.castaway_id != CastawayId(99)));

    let _ = fs::remove_dir_all(&base);
}

#[test]
fn run_writes_results_that_show_reads_back() {
    let base = setup("run_and_show");
    let ctx = context(&base);
    write_order(&base, "p2,1\np3,2\np1,3\n");

    let run = commands::run_draft(&ctx, &mut StdRng::seed_from_u64(7)).unwrap();
    assert!(ctx.results_path().is_file());
    assert_eq!(run.seed, Some(11));
    assert_eq!(run.season, 50);

    let loaded = commands::load_results(&ctx).unwrap();
    assert_eq!(loaded, run);

    let board = report::render_board(&loaded, &commands::load_names(&ctx));
    assert!(board.starts_with("Integration Draft (season 50): 6 picks over 2 rounds"));
    assert!(board.contains("Bob"));
    assert!(board.contains("Tony (#3)"));
    assert!(!board.contains("Richard"));

    let _ = fs::remove_dir_all(&base);
}

#[test]
fn same_seed_reproduces_order_and_draft() {
    let base = setup("reproducible");
    let ctx = context(&base);

    let order_a = commands::post_draft_order(&ctx, &mut commands::make_rng(Some(8))).unwrap();
    let run_a = commands::run_draft(&ctx, &mut commands::make_rng(Some(9))).unwrap();
    let order_b = commands::post_draft_order(&ctx, &mut commands::make_rng(Some(8))).unwrap();
    let run_b = commands::run_draft(&ctx, &mut commands::make_rng(Some(9))).unwrap();

    assert_eq!(order_a, order_b);
    assert_eq!(run_a.result, run_b.result);

    let _ = fs::remove_dir_all(&base);
}

#[test]
fn missing_rankings_means_all_random() {
    let base = setup("no_rankings");
    fs::remove_file(base.join("data/rankings.csv")).unwrap();
    let ctx = context(&base);
    write_order(&base, "p1,1\np2,2\np3,3\n");

    let run = commands::run_draft(&ctx, &mut StdRng::seed_from_u64(10)).unwrap();
    assert_eq!(run.result.len(), 6);
    assert_eq!(run.result.random_pick_count(), 6);

    let _ = fs::remove_dir_all(&base);
}

#[test]
fn malformed_order_fails_loudly() {
    let base = setup("bad_order");
    let ctx = context(&base);
    write_order(&base, "p1,1\np2,3\n");

    let err = commands::run_draft(&ctx, &mut StdRng::seed_from_u64(12)).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("draft order ranks must form 1..=2"), "{message}");
    assert!(!ctx.results_path().exists());

    let _ = fs::remove_dir_all(&base);
}

#[test]
fn empty_members_cannot_post_an_order() {
    let base = setup("no_members");
    fs::write(base.join("data/members.csv"), "player_id,player_name\n").unwrap();
    let ctx = context(&base);

    let err = commands::post_draft_order(&ctx, &mut StdRng::seed_from_u64(13)).unwrap_err();
    assert!(format!("{err:#}").contains("no participants to order"));
    assert!(!ctx.draft_order_path().exists());

    let _ = fs::remove_dir_all(&base);
}
