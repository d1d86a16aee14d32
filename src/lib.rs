//! Torus Life - toroidal Game of Life with cell-age metadata

pub mod core;
pub mod render;
pub mod simulation;
pub mod ui;
pub mod world;
