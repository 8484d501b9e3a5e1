//! TUI Module
//!
//! - event_loop: entry point, timers and event handling
//! - input: key and mouse decoding
//! - layout: panel grid
//! - render: drawing
//! - utils: palette and node conversion

mod event_loop;
mod input;
pub mod layout;
mod render;
mod utils;

pub use event_loop::{drain_messages, run, Timers, TuiMessage};
pub use input::{decode_key, decode_mouse};
pub use render::draw_ui;
