use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tools::{init_tracing, load_config};
use tracing::info;
use undercroft_core::{Dungeon, DungeonGenerator, Room};

#[derive(Parser)]
#[command(author, version, about = "Generate a dungeon and print it", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42, allow_negative_numbers = true)]
    seed: i64,
    /// TOML file overriding generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print a JSON summary instead of the ASCII map
    #[arg(long)]
    json: bool,
    /// Fail instead of falling back to a disconnected layout
    #[arg(long)]
    strict: bool,
}

#[derive(Serialize)]
struct Summary<'a> {
    seed: i64,
    width: usize,
    height: usize,
    attempts: u32,
    connected: bool,
    floor_tiles: usize,
    coverage: f64,
    rooms: &'a [Room],
}

impl<'a> Summary<'a> {
    fn new(seed: i64, dungeon: &'a Dungeon) -> Self {
        Self {
            seed,
            width: dungeon.grid.width(),
            height: dungeon.grid.height(),
            attempts: dungeon.attempts,
            connected: dungeon.connected,
            floor_tiles: dungeon.grid.floor_count(),
            coverage: dungeon.grid.floor_ratio(),
            rooms: &dungeon.rooms,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let generator = DungeonGenerator::new(config.generator).context("Invalid generator config")?;
    let dungeon = if args.strict {
        generator.generate_connected(args.seed)?
    } else {
        generator.generate(args.seed)
    };
    let summary = Summary::new(args.seed, &dungeon);

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{rendered}");
        return Ok(());
    }

    print!("{}", dungeon.grid);
    info!(seed = args.seed, attempts = summary.attempts, "generation finished");
    println!("Seed: {}", summary.seed);
    println!("Size: {}x{}", summary.width, summary.height);
    println!("Rooms: {}", summary.rooms.len());
    println!("Floor: {} tiles ({:.1}%)", summary.floor_tiles, summary.coverage * 100.0);
    println!("Attempts: {}", summary.attempts);
    println!("Connected: {}", summary.connected);

    Ok(())
}
