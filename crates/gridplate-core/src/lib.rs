//! **gridplate-core** — core types for the gridplate tile-grid game template.
//!
//! This crate provides the backend-independent pieces: geometry primitives,
//! colours, input messages and per-tick input snapshots, the draw-command
//! [`Scene`], digit-atlas number layout, and the frame-driven application
//! loop.

pub mod app;
pub mod digits;
pub mod geom;
pub mod messages;
pub mod scene;
pub mod style;

pub use app::{AppRunner, Effect, EventLoopDriver, Model};
pub use digits::{DigitAlign, DigitAtlas};
pub use geom::{Point, Range, Rect, Vec2};
pub use messages::*;
pub use scene::{DrawCmd, Scene, TextAlign, TextureId};
pub use style::Color;
