use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tools::{init_tracing, load_config};
use tracing::info;
use undercroft_core::{Direction, Simulation, Target};

/// Keeps the avatar's walk off the generation and NPC streams for the same seed.
const WALK_SEED_SALT: u64 = 0xD1B5_4A32_D192_ED03;

#[derive(Parser)]
#[command(author, version, about = "Drive a seeded world with a random-walking avatar", long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42, allow_negative_numbers = true)]
    seed: i64,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u32,
    /// TOML file overriding generator and simulation settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Damage the avatar deals to each adjacent actor when it swings
    #[arg(long, default_value_t = 2)]
    strike: i32,
}

fn walk_seed(seed: i64) -> u64 {
    (seed as u64) ^ WALK_SEED_SALT
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let mut sim = Simulation::new(args.seed, &config).context("Failed to build the world")?;
    let mut rng = ChaCha8Rng::seed_from_u64(walk_seed(args.seed));

    println!(
        "Simulating seed {} for up to {} ticks with {} actors...",
        args.seed,
        args.ticks,
        sim.actor_count()
    );

    let mut kills = 0;
    let mut hits = 0;
    let mut damage_dealt = 0;
    let mut avatar_deaths = 0;

    while sim.tick_count() < u64::from(args.ticks) {
        sim.try_move_avatar(choose(&mut rng, &Direction::ALL));

        if rng.next_u64() % 3 == 0 {
            let avatar = sim.avatar().pos();
            let adjacent: Vec<_> = sim
                .actors()
                .filter(|actor| actor.pos().manhattan(avatar) <= 1)
                .map(|actor| actor.id())
                .collect();
            for id in adjacent {
                sim.queue_damage(Target::Actor(id), Some(Target::Avatar), args.strike);
            }
        }

        let report = sim.tick();
        kills += report.killed.len();
        hits += report.combat.hits.len();
        damage_dealt += report.combat.damage_dealt();
        if report.avatar_died {
            avatar_deaths += 1;
        }

        if sim.avatar().is_defeated() {
            info!(tick = report.tick, "avatar defeated");
            break;
        }
    }

    println!("Ticks: {}", sim.tick_count());
    println!("Actors left: {} ({} killed)", sim.actor_count(), kills);
    println!("Hits resolved: {hits} ({damage_dealt} damage)");
    println!("Avatar deaths: {avatar_deaths}, lives left: {}", sim.avatar().lives());

    Ok(())
}
