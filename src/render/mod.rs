//! Render snapshot of the visible window
//!
//! Reads the world through a viewport and produces flat, owned draw
//! commands. This module never modifies simulation state.

pub mod colors;
pub mod viewport;

pub use colors::{meta_color, Color, BACKGROUND};
pub use viewport::{Frame, PixelRect, Viewport};

use crate::world::{MetaState, World};

/// One alive cell to paint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCell {
    pub rect: PixelRect,
    pub meta: MetaState,
}

/// Collect the alive cells of the viewport's current frame into a reusable
/// buffer. Call `Viewport::recompute_frame` first; dead cells are skipped.
pub fn collect_visible_cells(world: &World, viewport: &Viewport, buffer: &mut Vec<RenderCell>) {
    buffer.clear();

    let frame = viewport.frame();
    for sx in 0..frame.visible_cells.x {
        for sy in 0..frame.visible_cells.y {
            let cell = viewport.screen_cell_to_world(sx, sy);
            if let Some(meta) = world.meta_state_at(cell.x as i32, cell.y as i32) {
                buffer.push(RenderCell {
                    rect: viewport.cell_rect(sx, sy),
                    meta,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_skips_dead_cells() {
        let mut world = World::new(8, 8);
        world.set(4, 4, true);

        let mut viewport = Viewport::for_world(&world);
        viewport.resize(80, 80);
        viewport.recompute_frame();

        let mut buffer = Vec::new();
        collect_visible_cells(&world, &viewport, &mut buffer);

        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer[0].meta, MetaState::JustBorn);
        assert_eq!(
            buffer[0].rect,
            PixelRect {
                x: 40,
                y: 40,
                width: 10,
                height: 10
            }
        );
    }

    #[test]
    fn test_collect_reuses_buffer() {
        let world = World::new(4, 4);
        let mut viewport = Viewport::for_world(&world);
        viewport.recompute_frame();

        let mut buffer = vec![RenderCell {
            rect: viewport.cell_rect(0, 0),
            meta: MetaState::LongLived,
        }];
        collect_visible_cells(&world, &viewport, &mut buffer);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_collect_wraps_window() {
        let mut world = World::new(10, 10);
        world.set(0, 0, true);

        let mut viewport = Viewport::for_world(&world);
        viewport.resize(50, 50);
        viewport.set_zoom(200.0);
        viewport.set_camera(9, 9);
        let frame = viewport.recompute_frame();
        assert_eq!(frame.top_left.x, 7);

        let mut buffer = Vec::new();
        collect_visible_cells(&world, &viewport, &mut buffer);

        // World (0, 0) sits three cells right of the top-left (7, 7)
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer[0].rect.x, 30);
        assert_eq!(buffer[0].rect.y, 30);
    }
}
