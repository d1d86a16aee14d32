//! Terminal front-end pieces: input polling and the world widget

pub mod input;
pub mod widget;

pub use input::{Command, InputState, PaintMode};
pub use widget::{status_text, WorldView};
