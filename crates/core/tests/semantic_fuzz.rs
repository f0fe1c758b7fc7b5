use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use undercroft_core::{Direction, Simulation, Target, WorldConfig};

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

fn run_fuzz_simulation(world_seed: i64, walk_seed: u64, max_ticks: u32) -> Result<(), String> {
    let mut sim = Simulation::new(world_seed, &WorldConfig::default())
        .map_err(|err| format!("world setup failed: {err}"))?;
    let mut rng = ChaCha8Rng::seed_from_u64(walk_seed);
    let mut previous_actor_count = sim.actor_count();
    let mut previous_lives = sim.avatar().lives();

    for _ in 0..max_ticks {
        if sim.avatar().is_defeated() {
            break;
        }
        sim.try_move_avatar(choose(&mut rng, &Direction::ALL));

        // Occasionally swing at whatever stands next to the avatar.
        if rng.next_u64() % 4 == 0 {
            let avatar = sim.avatar().pos();
            let adjacent: Vec<_> = sim
                .actors()
                .filter(|actor| actor.pos().manhattan(avatar) <= 1)
                .map(|actor| actor.id())
                .collect();
            for id in adjacent {
                sim.queue_damage(Target::Actor(id), Some(Target::Avatar), 2);
            }
        }

        let report = sim.tick();

        if sim.actor_count() + report.killed.len() != previous_actor_count {
            return Err(format!("actor bookkeeping drifted on world_seed {world_seed}"));
        }
        previous_actor_count = sim.actor_count();

        let lives = sim.avatar().lives();
        if lives > previous_lives || (report.avatar_died && lives + 1 != previous_lives) {
            return Err(format!("lives changed unexpectedly on world_seed {world_seed}"));
        }
        previous_lives = lives;

        if !sim.grid().is_floor(sim.avatar().pos()) {
            return Err(format!("avatar left the floor on world_seed {world_seed}"));
        }
        for actor in sim.actors() {
            if actor.health().current() > actor.health().max() || actor.health().is_depleted() {
                return Err(format!("actor health out of range on world_seed {world_seed}"));
            }
            if !sim.grid().is_floor(actor.pos()) {
                return Err(format!("actor inside a wall on world_seed {world_seed}"));
            }
        }
    }

    Ok(())
}

#[test]
fn test_fuzz_world_simulation() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(16));
    let seeds = (any::<i64>(), any::<u64>());

    runner
        .run(&seeds, |(world_seed, walk_seed)| {
            run_fuzz_simulation(world_seed, walk_seed, 400).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("semantic fuzz simulation should preserve invariants");
}
