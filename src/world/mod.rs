//! The simulated world: cells, the toroidal grid and starting patterns

pub mod cell;
pub mod grid;
pub mod patterns;

pub use cell::{Cell, MetaState};
pub use grid::World;
pub use patterns::{find_pattern, Pattern, Seed, PATTERNS};
