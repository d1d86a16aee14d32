//! Terminal surface: one character cell is one pixel

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color as TermColor;
use ratatui::widgets::Widget;

use crate::render::{meta_color, Color, RenderCell, BACKGROUND};
use crate::simulation::{ClockState, Simulation};

fn term_color(color: Color) -> TermColor {
    let (r, g, b) = color.to_rgb8();
    TermColor::Rgb(r, g, b)
}

/// Paints a render snapshot, clipped to the widget area
pub struct WorldView<'a> {
    cells: &'a [RenderCell],
}

impl<'a> WorldView<'a> {
    pub fn new(cells: &'a [RenderCell]) -> Self {
        Self { cells }
    }
}

impl Widget for WorldView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = term_color(BACKGROUND);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                buf.get_mut(x, y).set_symbol(" ").set_bg(background);
            }
        }

        for cell in self.cells {
            let color = term_color(meta_color(cell.meta));
            let rect = cell.rect;
            let x_end = rect.x.saturating_add(rect.width).min(area.width as u32);
            let y_end = rect.y.saturating_add(rect.height).min(area.height as u32);

            for py in rect.y..y_end {
                for px in rect.x..x_end {
                    buf.get_mut(area.x + px as u16, area.y + py as u16)
                        .set_bg(color);
                }
            }
        }
    }
}

/// One-line summary for the status bar
pub fn status_text(sim: &Simulation) -> String {
    let state = match sim.clock.state() {
        ClockState::Playing => "playing",
        ClockState::Paused => "paused",
        ClockState::Stopped => "stopped",
    };
    let camera = sim.viewport.camera();
    format!(
        " {} | gen {} | pop {} | {}ms | zoom {:.0}% | cam {},{} | space play/pause  s stop  b begin  r restart  [ ] speed  q quit",
        state,
        sim.world.generation(),
        sim.world.population(),
        sim.clock.interval(),
        sim.viewport.zoom(),
        camera.x,
        camera.y,
    )
}
