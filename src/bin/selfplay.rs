//! Self-play CLI.
//!
//! Plays whole games in-process and prints a win/draw summary.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N     Number of games to play (default: 10)
//!   --areas N     Areas per generated board (default: 24)
//!   --players N   Players seated per game (default: 4)
//!   --plies N     Search depth in full rounds (default: 2)
//!   --rounds N    Round limit before a draw is called (default: 200)
//!   --threads N   Concurrent games (default: 4)
//!   --seed N      Master seed, 0 for entropy (default: 0)
//!   --quiet       Suppress per-game lines

use std::env;
use std::process;
use std::time::Instant;

use hegemon::selfplay::{play_games, SelfPlayConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = parse(&args, i, "--games");
            }
            "--areas" => {
                i += 1;
                config.area_count = parse(&args, i, "--areas");
            }
            "--players" => {
                i += 1;
                config.player_count = parse(&args, i, "--players");
            }
            "--plies" => {
                i += 1;
                config.search_plies = parse(&args, i, "--plies");
            }
            "--rounds" => {
                i += 1;
                config.max_rounds = parse(&args, i, "--rounds");
            }
            "--threads" => {
                i += 1;
                config.threads = parse(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = parse(&args, i, "--seed");
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let started = Instant::now();
    let summary = match play_games(&config) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("selfplay: {}", e);
            process::exit(1);
        }
    };

    if !quiet {
        for (i, outcome) in summary.outcomes.iter().enumerate() {
            match outcome.winner {
                Some(winner) => println!(
                    "game {}: player {} wins after {} rounds ({} moves)",
                    i, winner, outcome.rounds, outcome.moves
                ),
                None => println!(
                    "game {}: draw at the {}-round limit ({} moves)",
                    i, outcome.rounds, outcome.moves
                ),
            }
        }
    }

    println!("played {} games in {:.1?}", config.num_games, started.elapsed());
    for (player, wins) in &summary.wins {
        println!("player {}: {} wins", player, wins);
    }
    println!("draws: {}", summary.draws);
}

fn parse<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    args.get(i)
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("invalid or missing value for {}", flag);
            process::exit(1);
        })
}

fn print_usage() {
    println!("Usage: selfplay [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --games N     Number of games to play (default: 10)");
    println!("  --areas N     Areas per generated board (default: 24)");
    println!("  --players N   Players seated per game (default: 4)");
    println!("  --plies N     Search depth in full rounds (default: 2)");
    println!("  --rounds N    Round limit before a draw is called (default: 200)");
    println!("  --threads N   Concurrent games (default: 4)");
    println!("  --seed N      Master seed, 0 for entropy (default: 0)");
    println!("  --quiet       Suppress per-game lines");
}
