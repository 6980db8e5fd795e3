// Game logic
//
// - `session`: shape progression and match checking
// - `feedback`: name reveal and cue-driven (or timed) advance after a match
// - `layout`: where the outline and target sit on screen
// - `app`: ties the above to input events and produces a `Scene` per frame

pub mod app;
pub mod feedback;
pub mod layout;
pub mod session;

pub use app::{Scene, ShapeGame};
pub use session::MatchSession;
