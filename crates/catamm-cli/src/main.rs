//! CATAMM command-line driver.
//!
//! Generates boards, prices swaps and plays scripted market sessions.
//! Configuration comes from `--config` / `CATAMM_CONFIG`; verbosity from
//! `RUST_LOG`.

use catamm_core::market::swap_output;
use catamm_core::Board;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod demo;
mod report;
mod settings;

/// CATAMM - hex boards with constant-product resource markets
#[derive(Parser, Debug)]
#[command(name = "catamm")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file; missing fields take their defaults
    #[arg(short, long, env = "CATAMM_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a board and print its topology summary
    Board {
        /// Rings around the center tile (overrides the config)
        #[arg(short, long)]
        rings: Option<u32>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Price a swap against a pool with the given reserves
    Quote {
        reserve_in: u32,
        reserve_out: u32,
        amount_in: u32,

        /// Trade as the pool owner (no fee)
        #[arg(long)]
        owner: bool,
    },

    /// Play a scripted session: open a market, trade, add and remove liquidity
    Demo {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Discover a tile whenever someone builds on the perimeter
        #[arg(long)]
        growth: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut config = settings::load(args.config.as_deref())?;

    match args.command {
        Commands::Board { rings, seed, json } => {
            if let Some(rings) = rings {
                config.board.rings = rings;
                config.validate()?;
            }
            let seed = seed.unwrap_or_else(rand::random);
            info!(seed, rings = config.board.rings, "Generating board");

            let board = Board::generate_with_rng(&config.board, &mut StdRng::seed_from_u64(seed));
            let report = report::BoardReport::from_board(&board);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
        }

        Commands::Quote {
            reserve_in,
            reserve_out,
            amount_in,
            owner,
        } => {
            if reserve_in == 0 || reserve_out == 0 {
                anyhow::bail!("reserves must be positive");
            }
            let fee_bps = if owner { 0 } else { config.market.fee_bps };
            let out = swap_output(reserve_in, reserve_out, amount_in, fee_bps);
            info!(reserve_in, reserve_out, amount_in, fee_bps, out, "Quoted swap");
            println!("{}", out);
        }

        Commands::Demo { seed, growth } => {
            config.organic_growth |= growth;
            let seed = seed.unwrap_or_else(rand::random);
            let summary = demo::run(config, seed)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
