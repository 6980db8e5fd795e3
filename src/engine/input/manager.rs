// Input manager - translates window events into game events

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::drag::{DragOutcome, DragTracker, DropZones};
use glam::Vec2;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Game-level input, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Action(Action),
    DragStarted(String),
    Dropped(String),
    DragCancelled,
}

pub struct InputManager {
    config: InputConfig,
    drag: DragTracker,
    cursor: Vec2,
    events: Vec<InputEvent>,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            drag: DragTracker::new(),
            cursor: Vec2::ZERO,
            events: Vec::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent, zones: &DropZones) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            // Key repeat must not retrigger actions
            if event.repeat {
                return;
            }
            self.process_source(InputSource::key(key_code), event.state, zones);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        zones: &DropZones,
    ) {
        self.process_source(InputSource::mouse(button), state, zones);
    }

    /// Cursor position in physical pixels, top-left origin
    pub fn process_cursor_moved(&mut self, position: Vec2) {
        self.cursor = position;
        self.drag.motion(position);
    }

    /// Cursor left the window; an in-flight drag is abandoned
    pub fn process_cursor_left(&mut self) {
        if self.drag.is_dragging() {
            self.drag.cancel();
            self.events.push(InputEvent::DragCancelled);
        }
    }

    fn process_source(&mut self, source: InputSource, state: ElementState, zones: &DropZones) {
        let Some(action) = self.config.get_action(source) else {
            return;
        };

        match (action, state) {
            (Action::Grab, ElementState::Pressed) => {
                if let Some(payload) = self.drag.press(self.cursor, zones) {
                    self.events.push(InputEvent::DragStarted(payload.to_string()));
                }
            }
            (Action::Grab, ElementState::Released) => {
                match self.drag.release(self.cursor, zones) {
                    Some(DragOutcome::Dropped(payload)) => {
                        self.events.push(InputEvent::Dropped(payload))
                    }
                    Some(DragOutcome::Cancelled) => self.events.push(InputEvent::DragCancelled),
                    None => {}
                }
            }
            (_, ElementState::Pressed) => self.events.push(InputEvent::Action(action)),
            (_, ElementState::Released) => {}
        }
    }

    /// Take every event gathered since the last call
    pub fn drain_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn drag(&self) -> &DragTracker {
        &self.drag
    }
}

impl Default for InputManager {
    fn default() -> Self {
        let mut config = InputConfig::new();
        config.reset_to_defaults();
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Rect;
    use crate::engine::input::DragSource;
    use winit::keyboard::KeyCode;

    fn zones() -> DropZones {
        DropZones {
            source: Some(DragSource {
                rect: Rect::new(Vec2::ZERO, Vec2::splat(100.0)),
                payload: "square".to_string(),
            }),
            target: Some(Rect::new(Vec2::new(0.0, 200.0), Vec2::splat(100.0))),
        }
    }

    #[test]
    fn test_key_press_emits_action() {
        let mut manager = InputManager::default();
        manager.process_source(
            InputSource::key(KeyCode::Escape),
            ElementState::Pressed,
            &zones(),
        );
        manager.process_source(
            InputSource::key(KeyCode::Escape),
            ElementState::Released,
            &zones(),
        );

        assert_eq!(manager.drain_events(), vec![InputEvent::Action(Action::Exit)]);
        assert!(manager.drain_events().is_empty());
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut manager = InputManager::default();
        manager.process_source(InputSource::key(KeyCode::KeyZ), ElementState::Pressed, &zones());
        assert!(manager.drain_events().is_empty());
    }

    #[test]
    fn test_full_drag_gesture() {
        let mut manager = InputManager::default();
        manager.process_cursor_moved(Vec2::new(50.0, 50.0));
        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed, &zones());
        manager.process_cursor_moved(Vec2::new(60.0, 250.0));
        assert_eq!(manager.drag().position(), Some(Vec2::new(60.0, 250.0)));
        manager.process_mouse_button(MouseButton::Left, ElementState::Released, &zones());

        assert_eq!(
            manager.drain_events(),
            vec![
                InputEvent::DragStarted("square".to_string()),
                InputEvent::Dropped("square".to_string()),
            ]
        );
    }

    #[test]
    fn test_click_off_source_starts_nothing() {
        let mut manager = InputManager::default();
        manager.process_cursor_moved(Vec2::new(400.0, 400.0));
        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed, &zones());
        manager.process_mouse_button(MouseButton::Left, ElementState::Released, &zones());
        assert!(manager.drain_events().is_empty());
    }

    #[test]
    fn test_cursor_leaving_cancels_drag() {
        let mut manager = InputManager::default();
        manager.process_cursor_moved(Vec2::new(10.0, 10.0));
        manager.process_mouse_button(MouseButton::Left, ElementState::Pressed, &zones());
        manager.process_cursor_left();

        let events = manager.drain_events();
        assert_eq!(events.last(), Some(&InputEvent::DragCancelled));
        assert!(!manager.drag().is_dragging());
    }
}
