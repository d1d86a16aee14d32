//! Input layer: raw terminal events become held flags and discrete commands
//!
//! Continuous actions (pan, zoom, freehand painting) are not applied when the
//! event arrives. The event pump only flips flags; `InputState::apply` runs
//! once per tick so the action repeats at tick cadence.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::core::config::ViewConfig;
use crate::core::error::Result;
use crate::simulation::Simulation;

/// Milliseconds added or removed per interval key press
pub const INTERVAL_STEP_MS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    Draw,
    Erase,
}

/// One-shot actions triggered by a single event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePlay,
    Stop,
    Begin,
    Restart,
    AdjustInterval(i64),
    CenterCamera,
    ZoomBy(f64),
    Quit,
}

impl Command {
    /// `Quit` is left to the caller
    pub fn apply(self, sim: &mut Simulation) -> Result<()> {
        match self {
            Command::TogglePlay => sim.clock.toggle(),
            Command::Stop => sim.stop(),
            Command::Begin => sim.begin()?,
            Command::Restart => sim.restart()?,
            Command::AdjustInterval(delta) => sim.clock.adjust_interval(delta),
            Command::CenterCamera => sim.viewport.center_on_world(),
            Command::ZoomBy(delta) => sim.viewport.adjust_zoom(delta),
            Command::Quit => {}
        }
        Ok(())
    }
}

/// Currently held inputs, polled once per tick
#[derive(Debug, Clone)]
pub struct InputState {
    pub pan_left: bool,
    pub pan_right: bool,
    pub pan_up: bool,
    pub pan_down: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub paint: Option<PaintMode>,
    /// Pointer position in surface pixels
    pub pointer: (u32, u32),
    /// Whether the terminal reports key releases; if not, key flags only
    /// last for the tick that observed them
    pub key_release_events: bool,
    zoom_rate: f64,
    pan_speed: i32,
}

impl InputState {
    pub fn new(view: &ViewConfig) -> Self {
        Self {
            pan_left: false,
            pan_right: false,
            pan_up: false,
            pan_down: false,
            zoom_in: false,
            zoom_out: false,
            paint: None,
            pointer: (0, 0),
            key_release_events: false,
            zoom_rate: view.zoom_rate,
            pan_speed: view.pan_speed,
        }
    }

    /// Update held flags; returns a command for one-shot keys
    pub fn handle_key(&mut self, event: KeyEvent) -> Option<Command> {
        let pressed = match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => true,
            KeyEventKind::Release => {
                self.key_release_events = true;
                false
            }
        };

        let held = match event.code {
            KeyCode::Left | KeyCode::Char('h') => Some(&mut self.pan_left),
            KeyCode::Right | KeyCode::Char('l') => Some(&mut self.pan_right),
            KeyCode::Up | KeyCode::Char('k') => Some(&mut self.pan_up),
            KeyCode::Down | KeyCode::Char('j') => Some(&mut self.pan_down),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(&mut self.zoom_in),
            KeyCode::Char('-') => Some(&mut self.zoom_out),
            _ => None,
        };
        if let Some(flag) = held {
            *flag = pressed;
            return None;
        }

        if !pressed {
            return None;
        }

        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char(' ') => Some(Command::TogglePlay),
            KeyCode::Char('s') => Some(Command::Stop),
            KeyCode::Char('b') => Some(Command::Begin),
            KeyCode::Char('r') => Some(Command::Restart),
            KeyCode::Char('[') => Some(Command::AdjustInterval(-INTERVAL_STEP_MS)),
            KeyCode::Char(']') => Some(Command::AdjustInterval(INTERVAL_STEP_MS)),
            KeyCode::Char('c') => Some(Command::CenterCamera),
            _ => None,
        }
    }

    /// Track the pointer relative to the surface origin (in terminal cells)
    pub fn handle_mouse(&mut self, event: MouseEvent, origin: (u16, u16)) -> Option<Command> {
        self.pointer = (
            event.column.saturating_sub(origin.0) as u32,
            event.row.saturating_sub(origin.1) as u32,
        );

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                self.paint = Some(PaintMode::Draw);
            }
            MouseEventKind::Down(MouseButton::Right)
            | MouseEventKind::Drag(MouseButton::Right) => {
                self.paint = Some(PaintMode::Erase);
            }
            MouseEventKind::Up(_) => self.paint = None,
            MouseEventKind::ScrollUp => return Some(Command::ZoomBy(self.zoom_rate)),
            MouseEventKind::ScrollDown => return Some(Command::ZoomBy(-self.zoom_rate)),
            _ => {}
        }
        None
    }

    /// Apply held inputs to the simulation for this tick
    pub fn apply(&self, sim: &mut Simulation) {
        let dx = (self.pan_right as i32 - self.pan_left as i32) * self.pan_speed;
        let dy = (self.pan_down as i32 - self.pan_up as i32) * self.pan_speed;
        if dx != 0 || dy != 0 {
            sim.viewport.translate_camera(dx, dy);
        }

        match (self.zoom_in, self.zoom_out) {
            (true, false) => sim.viewport.adjust_zoom(self.zoom_rate),
            (false, true) => sim.viewport.adjust_zoom(-self.zoom_rate),
            _ => {}
        }

        if let Some(mode) = self.paint {
            sim.paint(self.pointer.0, self.pointer.1, mode == PaintMode::Draw);
        }
    }

    /// Drop key flags on terminals that never report releases
    pub fn end_tick(&mut self) {
        if !self.key_release_events {
            self.release_keys();
        }
    }

    pub fn release_keys(&mut self) {
        self.pan_left = false;
        self.pan_right = false;
        self.pan_up = false;
        self.pan_down = false;
        self.zoom_in = false;
        self.zoom_out = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Seed;
    use glam::IVec2;

    fn input() -> InputState {
        InputState::new(&ViewConfig::default())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn sim() -> Simulation {
        let mut sim = Simulation::new(200, 100, 100, Seed::Empty);
        sim.viewport.resize(200, 100);
        sim.tick(0.0, |_, _| {});
        sim
    }

    #[test]
    fn test_held_keys_set_flags_not_commands() {
        let mut input = input();
        assert_eq!(input.handle_key(press(KeyCode::Left)), None);
        assert!(input.pan_left);
        assert_eq!(input.handle_key(press(KeyCode::Char('+'))), None);
        assert!(input.zoom_in);
    }

    #[test]
    fn test_release_clears_flag_and_is_remembered() {
        let mut input = input();
        input.handle_key(press(KeyCode::Up));
        input.handle_key(release(KeyCode::Up));
        assert!(!input.pan_up);
        assert!(input.key_release_events);

        input.handle_key(press(KeyCode::Up));
        input.end_tick();
        assert!(input.pan_up, "flags persist when releases are reported");
    }

    #[test]
    fn test_end_tick_without_release_events() {
        let mut input = input();
        input.handle_key(press(KeyCode::Right));
        input.end_tick();
        assert!(!input.pan_right);
    }

    #[test]
    fn test_command_keys() {
        let mut input = input();
        assert_eq!(input.handle_key(press(KeyCode::Char(' '))), Some(Command::TogglePlay));
        assert_eq!(input.handle_key(press(KeyCode::Char('s'))), Some(Command::Stop));
        assert_eq!(
            input.handle_key(press(KeyCode::Char(']'))),
            Some(Command::AdjustInterval(INTERVAL_STEP_MS))
        );
        assert_eq!(input.handle_key(press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            input.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(input.handle_key(press(KeyCode::Char('c'))), Some(Command::CenterCamera));
        assert_eq!(input.handle_key(release(KeyCode::Char(' '))), None);
    }

    #[test]
    fn test_apply_pans_and_zooms() {
        let mut sim = sim();
        let mut input = input();
        let start = sim.viewport.camera();

        input.pan_right = true;
        input.pan_up = true;
        input.zoom_in = true;
        input.apply(&mut sim);

        // Stride at 100% is visible / 20 = (10, 5) cells
        assert_eq!(sim.viewport.camera(), start + IVec2::new(10, -5));
        assert!((sim.viewport.zoom() - 102.0).abs() < 1e-9);
    }

    #[test]
    fn test_opposing_zoom_keys_cancel() {
        let mut sim = sim();
        let mut input = input();
        input.zoom_in = true;
        input.zoom_out = true;
        input.apply(&mut sim);
        assert_eq!(sim.viewport.zoom(), 100.0);
    }

    #[test]
    fn test_mouse_paint_and_erase() {
        let mut sim = sim();
        let mut input = input();

        input.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 12, 8), (2, 1));
        assert_eq!(input.pointer, (10, 7));
        input.apply(&mut sim);
        assert!(sim.world.get(10, 7).is_alive());

        input.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Right), 12, 8), (2, 1));
        input.apply(&mut sim);
        assert!(sim.world.get(10, 7).is_dead());

        input.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Right), 12, 8), (2, 1));
        assert_eq!(input.paint, None);
    }

    #[test]
    fn test_scroll_returns_zoom_command() {
        let mut input = input();
        let cmd = input.handle_mouse(mouse(MouseEventKind::ScrollUp, 0, 0), (0, 0));
        assert_eq!(cmd, Some(Command::ZoomBy(0.1)));
    }

    #[test]
    fn test_commands_drive_simulation() {
        let mut sim = Simulation::new(
            9,
            9,
            100,
            Seed::Pattern {
                name: "blinker".into(),
            },
        );
        Command::Restart.apply(&mut sim).unwrap();
        assert!(sim.clock.is_playing());
        assert_eq!(sim.world.population(), 3);

        Command::TogglePlay.apply(&mut sim).unwrap();
        assert!(!sim.clock.is_playing());

        Command::AdjustInterval(-150).apply(&mut sim).unwrap();
        assert_eq!(sim.clock.interval(), 0);

        Command::Stop.apply(&mut sim).unwrap();
        assert_eq!(sim.world.population(), 0);
    }
}
