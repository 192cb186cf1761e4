pub mod input_source;
pub mod keyboard;
pub mod pointer;

pub use input_source::DomInputSource;
pub use keyboard::wire_app_keydown;
pub use pointer::{wire_cursor_tracking, wire_marker_click, CursorState};
