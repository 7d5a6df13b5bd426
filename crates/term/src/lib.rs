//! Terminal game renderer.
//!
//! Views paint a game snapshot into a [`Canvas`] of styled glyphs; the
//! [`TerminalRenderer`] flushes canvases to the terminal, re-sending only the
//! glyph runs that changed since the previous frame.
//!
//! Board cells are drawn two columns wide (six for 2048 tiles) so the grid
//! keeps a roughly square aspect ratio.

pub mod canvas;
pub mod renderer;
pub mod view;

pub use grid_arcade_core as core;
pub use grid_arcade_types as types;

pub use canvas::{Canvas, Glyph, Rgb, Style};
pub use renderer::{changed_runs, encode_diff, encode_full, TerminalRenderer};
pub use view::{ArcadeView, Frame, Viewport};
