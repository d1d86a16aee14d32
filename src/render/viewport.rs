//! Camera and zoom mapping between world cells and screen pixels
//!
//! The camera center lives in world-cell units and always lies on the torus
//! (`0..width`, `0..height`). Zoom is a factor of at least
//! `MIN_ZOOM_FACTOR`: at 1.0 every grid column fits on screen, at 2.0 half of
//! them do.

use glam::{IVec2, UVec2};

use crate::world::World;

/// Zoom cannot go below 100%: the whole grid is the widest possible view.
pub const MIN_ZOOM_FACTOR: f64 = 1.0;

/// Visible cells per pan stride unit
pub const PAN_DIVISOR: u32 = 20;

/// Axis-aligned pixel rectangle on the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && py >= self.y
            && px - self.x < self.width
            && py - self.y < self.height
    }
}

/// Values derived once per render pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Cells visible along each axis, at least 1
    pub visible_cells: UVec2,
    /// Pixel size of one cell, at least 1
    pub cell_pixels: UVec2,
    /// World cell drawn at the top-left screen cell, not wrapped
    pub top_left: IVec2,
}

#[derive(Debug, Clone)]
pub struct Viewport {
    world_size: UVec2,
    pixel_size: UVec2,
    camera: IVec2,
    zoom_factor: f64,
    frame: Frame,
}

impl Viewport {
    /// Viewport over a world of the given size, centered, at 100% zoom
    ///
    /// Grid dimensions are fixed for the lifetime of a world, so they are
    /// captured here rather than re-read every frame.
    pub fn new(world_width: u32, world_height: u32) -> Self {
        let mut viewport = Self {
            world_size: UVec2::new(world_width.max(1), world_height.max(1)),
            pixel_size: UVec2::ZERO,
            camera: IVec2::ZERO,
            zoom_factor: MIN_ZOOM_FACTOR,
            frame: Frame {
                visible_cells: UVec2::ONE,
                cell_pixels: UVec2::ONE,
                top_left: IVec2::ZERO,
            },
        };
        viewport.center_on_world();
        viewport.recompute_frame();
        viewport
    }

    pub fn for_world(world: &World) -> Self {
        Self::new(world.width(), world.height())
    }

    pub fn world_size(&self) -> UVec2 {
        self.world_size
    }

    pub fn pixel_size(&self) -> UVec2 {
        self.pixel_size
    }

    /// Set the rendering surface size in pixels
    pub fn resize(&mut self, pixel_width: u32, pixel_height: u32) {
        self.pixel_size = UVec2::new(pixel_width, pixel_height);
    }

    /// Zoom in percent
    pub fn zoom(&self) -> f64 {
        self.zoom_factor * 100.0
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    /// Set zoom in percent, floored at 100%. NaN resets to the floor.
    pub fn set_zoom(&mut self, percentage: f64) {
        let factor = percentage / 100.0;
        self.zoom_factor = if factor >= MIN_ZOOM_FACTOR {
            factor
        } else {
            MIN_ZOOM_FACTOR
        };
    }

    /// Multiplicative zoom step; called every tick while a zoom key is held
    pub fn adjust_zoom(&mut self, delta: f64) {
        self.set_zoom(self.zoom() * (1.0 + delta / 5.0));
    }

    pub fn camera(&self) -> IVec2 {
        self.camera
    }

    /// Center the camera on a world cell, wrapped onto the torus
    pub fn set_camera(&mut self, x: i32, y: i32) {
        self.camera = self.wrap(x as i64, y as i64);
    }

    /// Pan by `(dx, dy)` strides
    ///
    /// A stride is `visible / PAN_DIVISOR` cells (at least one), so a held
    /// pan key crosses the screen at the same speed whatever the zoom.
    pub fn translate_camera(&mut self, dx: i32, dy: i32) {
        let stride = (self.visible_cells() / PAN_DIVISOR).max(UVec2::ONE);
        self.camera = self.wrap(
            self.camera.x as i64 + dx as i64 * stride.x as i64,
            self.camera.y as i64 + dy as i64 * stride.y as i64,
        );
    }

    pub fn center_on_world(&mut self) {
        self.camera = (self.world_size / 2).as_ivec2();
    }

    /// Visible cell counts at the current zoom
    pub fn visible_cells(&self) -> UVec2 {
        let visible = |cells: u32| ((cells as f64 / self.zoom_factor).floor() as u32).max(1);
        UVec2::new(visible(self.world_size.x), visible(self.world_size.y))
    }

    /// Derive this pass's window and cell size. Call once per render pass.
    pub fn recompute_frame(&mut self) -> Frame {
        let visible_cells = self.visible_cells();
        let cell_pixels = UVec2::new(
            self.pixel_size.x.div_ceil(visible_cells.x),
            self.pixel_size.y.div_ceil(visible_cells.y),
        )
        .max(UVec2::ONE);
        let top_left = self.camera - (visible_cells / 2).as_ivec2();

        self.frame = Frame {
            visible_cells,
            cell_pixels,
            top_left,
        };
        self.frame
    }

    /// The frame computed by the last `recompute_frame`
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Pixel rectangle covered by a screen cell
    pub fn cell_rect(&self, sx: u32, sy: u32) -> PixelRect {
        let cell = self.frame.cell_pixels;
        PixelRect {
            x: sx.saturating_mul(cell.x),
            y: sy.saturating_mul(cell.y),
            width: cell.x,
            height: cell.y,
        }
    }

    /// World cell shown at a screen cell
    pub fn screen_cell_to_world(&self, sx: u32, sy: u32) -> UVec2 {
        let top_left = self.frame.top_left;
        self.wrap_unsigned(
            top_left.x as i64 + sx as i64,
            top_left.y as i64 + sy as i64,
        )
    }

    /// World cell under a pixel
    pub fn screen_to_world(&self, px: u32, py: u32) -> UVec2 {
        let cell = self.frame.cell_pixels;
        self.screen_cell_to_world(px / cell.x, py / cell.y)
    }

    fn wrap_unsigned(&self, x: i64, y: i64) -> UVec2 {
        UVec2::new(
            x.rem_euclid(self.world_size.x as i64) as u32,
            y.rem_euclid(self.world_size.y as i64) as u32,
        )
    }

    fn wrap(&self, x: i64, y: i64) -> IVec2 {
        self.wrap_unsigned(x, y).as_ivec2()
    }
}
