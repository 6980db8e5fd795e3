// Game action definitions and mappings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Pick up (press) or drop (release) the outline
    Grab,
    /// Restart from the first shape once every shape is matched
    PlayAgain,
    /// Quit the game
    Exit,
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::mouse(MouseButton::Left), Action::Grab),
        (InputSource::key(KeyCode::Enter), Action::PlayAgain),
        (InputSource::key(KeyCode::NumpadEnter), Action::PlayAgain),
        (InputSource::key(KeyCode::Space), Action::PlayAgain),
        (InputSource::key(KeyCode::Escape), Action::Exit),
    ]
}
