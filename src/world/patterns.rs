//! Named starting patterns and the seeds used by `begin` / `restart`

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::grid::World;
use crate::core::error::{LifeError, Result};

/// A named set of alive cells, relative to the pattern's top-left corner
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

#[rustfmt::skip]
pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Acorn",
        cells: &[(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (24, 0),
            (22, 1), (24, 1),
            (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
            (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
            (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
            (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
            (10, 6), (16, 6), (24, 6),
            (11, 7), (15, 7),
            (12, 8), (13, 8),
        ],
    },
];

impl Pattern {
    /// Bounding box size (width, height)
    pub fn extent(&self) -> (i32, i32) {
        let width = self.cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
        let height = self.cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);
        (width, height)
    }

    /// Set the pattern alive with its top-left corner at `origin`
    pub fn stamp(&self, world: &mut World, origin: (i32, i32)) {
        world.set_many(
            self.cells.iter().map(|&(x, y)| (origin.0 + x, origin.1 + y)),
            true,
        );
    }

    /// Set the pattern alive centred on the world
    pub fn stamp_centered(&self, world: &mut World) {
        let (width, height) = self.extent();
        let origin = (
            world.width() as i32 / 2 - width / 2,
            world.height() as i32 / 2 - height / 2,
        );
        self.stamp(world, origin);
    }
}

/// Lookup ignoring case, spaces, dashes and underscores
pub fn find_pattern(name: &str) -> Option<&'static Pattern> {
    let key = normalize_name(name);
    PATTERNS.iter().find(|p| normalize_name(p.name) == key)
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Initial world state
#[derive(Debug, Clone, PartialEq)]
pub enum Seed {
    Empty,
    Pattern { name: String },
    /// Deterministic random soup
    Random { density: f64, seed: u64 },
}

impl Seed {
    /// Clear the world and populate it. The world is left cleared if the
    /// pattern name is unknown.
    pub fn apply(&self, world: &mut World) -> Result<()> {
        world.clear();
        match self {
            Seed::Empty => {}
            Seed::Pattern { name } => {
                let pattern =
                    find_pattern(name).ok_or_else(|| LifeError::UnknownPattern(name.clone()))?;
                pattern.stamp_centered(world);
            }
            Seed::Random { density, seed } => {
                let density = if density.is_finite() {
                    density.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let mut rng = ChaCha8Rng::seed_from_u64(*seed);
                for x in 0..world.width() as i32 {
                    for y in 0..world.height() as i32 {
                        if rng.gen_bool(density) {
                            world.set(x, y, true);
                        }
                    }
                }
            }
        }

        tracing::info!(seed = ?self, population = world.population(), "Seeded world");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_pattern_is_lenient() {
        assert_eq!(find_pattern("glider").map(|p| p.name), Some("Glider"));
        assert_eq!(
            find_pattern("gosper-glider-gun").map(|p| p.name),
            Some("Gosper Glider Gun")
        );
        assert_eq!(find_pattern("r_pentomino").map(|p| p.name), Some("R-pentomino"));
        assert!(find_pattern("spaceship").is_none());
    }

    #[test]
    fn test_pattern_cells_are_unique() {
        for pattern in PATTERNS {
            let mut cells = pattern.cells.to_vec();
            cells.sort();
            cells.dedup();
            assert_eq!(cells.len(), pattern.cells.len(), "{} has duplicates", pattern.name);
        }
    }

    #[test]
    fn test_extent() {
        let gun = find_pattern("gosper glider gun").unwrap();
        assert_eq!(gun.extent(), (36, 9));
        assert_eq!(gun.cells.len(), 36);
        assert_eq!(find_pattern("pulsar").unwrap().extent(), (13, 13));
    }

    #[test]
    fn test_stamp_centered() {
        let mut world = World::new(11, 11);
        find_pattern("blinker").unwrap().stamp_centered(&mut world);
        let alive: Vec<(u32, u32)> = world.alive_cells().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(alive, vec![(4, 5), (5, 5), (6, 5)]);
    }

    #[test]
    fn test_pulsar_has_period_three() {
        let mut world = World::new(21, 21);
        find_pattern("pulsar").unwrap().stamp_centered(&mut world);
        let before: Vec<(u32, u32)> = world.alive_cells().map(|(x, y, _)| (x, y)).collect();

        for _ in 0..3 {
            world.advance_generation();
        }

        let after: Vec<(u32, u32)> = world.alive_cells().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_unknown_pattern_is_error() {
        let mut world = World::new(8, 8);
        world.set(1, 1, true);
        let err = Seed::Pattern {
            name: "nope".into(),
        }
        .apply(&mut world)
        .unwrap_err();
        assert!(matches!(err, LifeError::UnknownPattern(name) if name == "nope"));
        assert_eq!(world.population(), 0);
    }

    #[test]
    fn test_random_seed_is_deterministic() {
        let seed = Seed::Random {
            density: 0.3,
            seed: 7,
        };
        let mut a = World::new(32, 32);
        let mut b = World::new(32, 32);
        seed.apply(&mut a).unwrap();
        seed.apply(&mut b).unwrap();

        let cells_a: Vec<(u32, u32)> = a.alive_cells().map(|(x, y, _)| (x, y)).collect();
        let cells_b: Vec<(u32, u32)> = b.alive_cells().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(cells_a, cells_b);
        assert!(!cells_a.is_empty());
    }

    #[test]
    fn test_random_density_extremes() {
        let mut world = World::new(10, 10);
        Seed::Random {
            density: 1.0,
            seed: 1,
        }
        .apply(&mut world)
        .unwrap();
        assert_eq!(world.population(), 100);

        Seed::Random {
            density: f64::NAN,
            seed: 1,
        }
        .apply(&mut world)
        .unwrap();
        assert_eq!(world.population(), 0);
    }
}
