//! Terminal frontend
//!
//! crossterm-based input and output around the core: key events become
//! `TickInput` snapshots, canvases become half-block cell frames.

pub mod frame;
pub mod keyboard;
pub mod presenter;

pub use frame::{Cell, CellFrame};
pub use keyboard::{GameKey, Keyboard, map_key};
pub use presenter::TerminalPresenter;
