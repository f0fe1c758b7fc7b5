use proptest::prelude::*;
use undercroft_core::mapgen::{all_floors_connected, flood_floor};
use undercroft_core::{Dungeon, GeneratorConfig, TileKind, generate};

fn assert_rooms_keep_clearance(dungeon: &Dungeon, config: &GeneratorConfig) {
    for (index, room) in dungeon.rooms.iter().enumerate() {
        for other in &dungeon.rooms[index + 1..] {
            assert!(
                !room.overlaps_with_clearance(
                    other,
                    config.clearance_horizontal,
                    config.clearance_vertical
                ),
                "{room:?} crowds {other:?}"
            );
        }
    }
}

#[test]
fn seed_42_hits_the_fill_target_and_is_connected() {
    let config = GeneratorConfig::default();
    let dungeon = generate(42);

    assert_eq!(dungeon.grid.width(), 80);
    assert_eq!(dungeon.grid.height(), 40);
    let coverage = dungeon.grid.floor_ratio();
    assert!(
        (config.target_fill_ratio - 0.10..=config.target_fill_ratio + 0.10).contains(&coverage),
        "coverage {coverage} outside target band"
    );
    assert!(dungeon.connected, "seed 42 should validate within {} attempts", dungeon.attempts);
    assert!(all_floors_connected(&dungeon.grid));
    assert!((1..=config.generation_attempts).contains(&dungeon.attempts));
}

#[test]
fn rooms_are_sized_within_configured_bounds() {
    let dungeon = generate(1_337);
    assert!(!dungeon.rooms.is_empty());
    for room in &dungeon.rooms {
        assert!((8..=16).contains(&room.width), "{room:?}");
        assert!((8..=16).contains(&room.height), "{room:?}");
    }
    assert_rooms_keep_clearance(&dungeon, &GeneratorConfig::default());
}

#[test]
fn wall_dressing_lays_walls_around_generated_floor() {
    let dungeon = generate(2_718);
    let grid = &dungeon.grid;
    let mut walls = 0;
    for pos in grid.positions() {
        match grid.tile_at(pos) {
            TileKind::SideWall | TileKind::TopWall => walls += 1,
            TileKind::Nothing | TileKind::Floor => {}
        }
    }
    assert!(walls > 0, "dressing should lay at least one wall course");
}

#[test]
fn ascii_rendering_has_one_line_per_row() {
    let dungeon = generate(5);
    let rendered = dungeon.grid.to_string();
    assert_eq!(rendered.lines().count(), 40);
    assert!(rendered.contains('.'));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn connected_flag_matches_flood_fill(seed in any::<i64>()) {
        let dungeon = generate(seed);
        let flood = flood_floor(&dungeon.grid);
        prop_assert_eq!(dungeon.connected, flood.is_connected());
        if dungeon.connected {
            prop_assert_eq!(flood.reached, dungeon.grid.floor_count());
        }
    }

    #[test]
    fn accepted_rooms_never_violate_clearance(seed in any::<i64>()) {
        let dungeon = generate(seed);
        assert_rooms_keep_clearance(&dungeon, &GeneratorConfig::default());
    }

    #[test]
    fn tiles_are_always_one_of_the_four_kinds(seed in any::<i64>()) {
        let dungeon = generate(seed);
        let bytes = dungeon.grid.canonical_bytes();
        prop_assert!(bytes[8..].iter().all(|&tile| tile <= 3));
        prop_assert_eq!(bytes.len(), 8 + 80 * 40);
    }
}
