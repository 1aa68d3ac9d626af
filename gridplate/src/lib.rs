//! gridplate — a starter template for grid-based 2D games.
//!
//! A fixed grid of tiles is drawn inside a bordered area; releasing the left
//! mouse button over a cell hands that cell to a [`Gameplay`] implementation,
//! and once gameplay declares the session over, a game-over overlay shows the
//! play time until the restart key is pressed.

pub mod assets;
pub mod cell;
pub mod config;
pub mod grid;
pub mod hud;
pub mod layout;
pub mod model;
pub mod session;
pub mod view;

pub use assets::{AssetError, Atlases};
pub use cell::Cell;
pub use config::GameConfig;
pub use grid::Grid;
pub use model::GridModel;
pub use session::{GameState, Gameplay, Placeholder, Session, Verdict};
