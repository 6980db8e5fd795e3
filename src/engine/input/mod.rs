// Input handling system
//
// - `action`: game actions and default bindings
// - `config`: binding configuration and remapping
// - `drag`: drag-and-drop gesture tracking against per-frame hit zones
// - `manager`: turns winit events into `InputEvent`s for the game

pub mod action;
pub mod config;
pub mod drag;
pub mod manager;

pub use action::Action;
pub use drag::{DragSource, DropZones};
pub use manager::{InputEvent, InputManager};
