//! Integration tests for the transition rule and lifecycle metadata
//!
//! These tests drive the public `World` API only:
//! - Toroidal addressing
//! - Neighbour counting
//! - Classic oscillators and spaceships
//! - Meta-state derivation across generations

use proptest::prelude::*;
use torus_life::world::{find_pattern, MetaState, World};

fn alive(world: &World) -> Vec<(u32, u32)> {
    world.alive_cells().map(|(x, y, _)| (x, y)).collect()
}

#[test]
fn test_single_cell_neighbor_field() {
    let mut world = World::new(7, 7);
    world.set(3, 3, true);

    for x in 0..7 {
        for y in 0..7 {
            let is_neighbor = (x, y) != (3, 3) && (x - 3i32).abs() <= 1 && (y - 3i32).abs() <= 1;
            let expected = if is_neighbor { 1 } else { 0 };
            assert_eq!(
                world.count_alive_neighbors(x, y),
                expected,
                "neighbour count at ({}, {})",
                x,
                y
            );
        }
    }
}

#[test]
fn test_all_dead_3x3_stays_dead() {
    let mut world = World::new(3, 3);
    world.advance_generation();
    assert!(alive(&world).is_empty());
}

#[test]
fn test_blinker_period_two() {
    let mut world = World::new(5, 5);
    world.set_many([(1, 2), (2, 2), (3, 2)], true);

    world.advance_generation();
    assert_eq!(alive(&world), vec![(2, 1), (2, 2), (2, 3)]);

    world.advance_generation();
    assert_eq!(alive(&world), vec![(1, 2), (2, 2), (3, 2)]);
}

#[test]
fn test_blinker_across_the_seam() {
    let mut world = World::new(6, 6);
    world.set_many([(-1, 0), (0, 0), (1, 0)], true);

    world.advance_generation();
    assert_eq!(alive(&world), vec![(0, 0), (0, 1), (0, 5)]);
}

#[test]
fn test_glider_circumnavigates_torus() {
    let mut world = World::new(10, 10);
    find_pattern("glider").unwrap().stamp(&mut world, (0, 0));
    let start = alive(&world);

    for _ in 0..4 {
        world.advance_generation();
    }
    let shifted: Vec<(u32, u32)> = start.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
    assert_eq!(alive(&world), shifted);

    for _ in 4..40 {
        world.advance_generation();
    }
    assert_eq!(alive(&world), start);
    assert_eq!(world.generation(), 40);
}

#[test]
fn test_just_born_then_short_lived() {
    let mut world = World::new(7, 7);
    world.set_many([(1, 2), (2, 2), (3, 2)], true);
    world.advance_generation();

    // Tips of the vertical bar have a single neighbour: born and doomed
    assert_eq!(world.meta_state(world.get(2, 1)), Some(MetaState::ShortLived));

    let mut world = World::new(7, 7);
    world.set_many([(1, 1), (2, 1), (1, 2)], true);
    world.advance_generation();
    assert_eq!(world.meta_state(world.get(2, 2)), Some(MetaState::JustBorn));
}

#[test]
fn test_will_die_for_aged_cell() {
    let mut world = World::new(8, 8);
    // Two flanking cells crowd the block; the one that survives is left stranded
    world.set_many([(2, 2), (3, 2), (2, 3), (3, 3)], true);
    world.advance_generation();
    world.set_many([(4, 1), (4, 3)], true);
    world.advance_generation();

    let doomed: Vec<(u32, u32)> = world
        .alive_cells()
        .filter(|(_, _, c)| c.meta_state() == Some(MetaState::WillDie))
        .map(|(x, y, _)| (x, y))
        .collect();
    assert!(!doomed.is_empty());
    for (x, y) in doomed {
        let n = world.count_alive_neighbors(x as i32, y as i32);
        assert!(!(2..=3).contains(&n), "({}, {}) has {} neighbours", x, y, n);
    }
}

#[test]
fn test_dead_cells_have_no_meta_state() {
    let mut world = World::new(4, 4);
    world.set(0, 0, true);
    world.set(0, 0, false);
    assert_eq!(world.meta_state_at(0, 0), None);
}

proptest! {
    #[test]
    fn prop_toroidal_identity(
        x in -1000i32..1000,
        y in -1000i32..1000,
        k in -50i32..50,
        m in -50i32..50,
        width in 1u32..40,
        height in 1u32..40,
    ) {
        let mut world = World::new(width, height);
        world.set(x, y, true);
        let wx = x + k * width as i32;
        let wy = y + m * height as i32;
        prop_assert!(std::ptr::eq(world.get(x, y), world.get(wx, wy)));
        prop_assert!(world.get(wx, wy).is_alive());
        prop_assert_eq!(world.population(), 1);
    }

    #[test]
    fn prop_neighbor_count_bounded(cells in prop::collection::vec((0i32..12, 0i32..12), 0..80)) {
        let mut world = World::new(12, 12);
        world.set_many(cells, true);
        for x in 0..12 {
            for y in 0..12 {
                prop_assert!(world.count_alive_neighbors(x, y) <= 8);
            }
        }
    }
}
