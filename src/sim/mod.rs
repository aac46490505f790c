//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only enters through the `dt`/`now_ms` arguments of `tick`
//! - Seeded RNG only
//! - Stable platform storage (handles never move)
//! - No rendering or terminal dependencies

pub mod platform;
pub mod player;
pub mod rect;
pub mod rng;
pub mod state;
pub mod sweep;
pub mod tick;

pub use platform::{Platform, PlatformField, PlatformHandle};
pub use player::{Contact, MoveInput, Player};
pub use rect::PixelRect;
pub use rng::FieldRng;
pub use state::{GameEvent, GamePhase, GameState};
pub use sweep::{crossed_hazard, crossed_platform_top, near_surface, overlaps_horizontally};
pub use tick::{TickInput, tick};
