// Game host state: session, feedback, and what to draw each frame

use super::feedback::{Feedback, FeedbackTiming};
use super::layout::{fit_in_box, Layout, LayoutConfig};
use super::session::{CurrentView, MatchSession, SessionState};
use crate::config::GameConfig;
use crate::core::math::Rect;
use crate::engine::assets::{ImageHandle, ShapeBundle};
use crate::engine::audio::CuePlayer;
use crate::engine::input::{Action, DragSource, DropZones, InputEvent};
use glam::Vec2;
use log::{debug, info};
use std::time::Duration;

/// One image to draw, in screen pixels
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSprite {
    pub image: ImageHandle,
    pub rect: Rect,
    /// 0.0 transparent .. 1.0 opaque
    pub alpha: f32,
}

/// Everything the renderer and window need for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Progress line, shown as the window title
    pub caption: String,
    /// Revealed shape name, while feedback is running
    pub name_label: Option<String>,
    pub background: Option<ImageHandle>,
    /// Back to front
    pub sprites: Vec<SceneSprite>,
    /// Play Again / Exit are available
    pub show_end_options: bool,
}

impl Scene {
    /// Title text combining the caption, revealed name and end options
    pub fn window_title(&self) -> String {
        let mut title = self.caption.clone();
        if let Some(name) = &self.name_label {
            title.push_str(&format!("  ★ {name} ★"));
        }
        if self.show_end_options {
            title.push_str("  —  Enter: Play Again, Esc: Exit");
        }
        title
    }
}

/// Game state driven by input events and frame time
///
/// The session owns progression; this type only adds the feedback phase
/// and turns state into a `Scene`. Nothing here is cached between frames.
pub struct ShapeGame<P> {
    session: MatchSession,
    feedback: Option<Feedback>,
    player: P,
    timing: FeedbackTiming,
    layout_config: LayoutConfig,
    window: Vec2,
    scale: f32,
    background: Option<ImageHandle>,
    exit_requested: bool,
}

impl<P: CuePlayer> ShapeGame<P> {
    pub fn new(session: MatchSession, player: P, config: &GameConfig) -> Self {
        Self {
            session,
            feedback: None,
            player,
            timing: FeedbackTiming {
                celebration: config.celebration(),
                fallback_grace: config.audio_fallback(),
            },
            layout_config: LayoutConfig {
                outline_size: config.outline_size,
                target_size: config.target_size,
                spacing: config.spacing,
            },
            window: Vec2::new(config.window_width as f32, config.window_height as f32),
            scale: 1.0,
            background: None,
            exit_requested: false,
        }
    }

    pub fn with_background(mut self, background: Option<ImageHandle>) -> Self {
        self.background = background;
        self
    }

    /// Window size in physical pixels plus the DPI scale factor
    pub fn set_viewport(&mut self, window: Vec2, scale: f32) {
        self.window = window;
        self.scale = scale;
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Dropped(candidate) => self.handle_drop(&candidate),
            InputEvent::Action(Action::PlayAgain) => self.play_again(),
            InputEvent::Action(Action::Exit) => {
                info!("Exit requested");
                self.exit_requested = true;
            }
            InputEvent::Action(Action::Grab) => {}
            InputEvent::DragStarted(payload) => debug!("Dragging '{}'", payload),
            InputEvent::DragCancelled => debug!("Drag cancelled"),
        }
    }

    fn handle_drop(&mut self, candidate: &str) {
        // one advance in flight per shape
        if self.feedback.is_some() {
            debug!("Drop of '{}' ignored during feedback", candidate);
            return;
        }
        let Some(shape) = self.session.current_shape().cloned() else {
            return;
        };
        if self.session.submit_match(candidate).is_accepted() {
            if let CurrentView::Playing { remaining, .. } = self.session.current() {
                debug!("{} shapes to go", remaining);
            }
            self.feedback = Some(Feedback::start(shape, self.timing, &mut self.player));
        }
    }

    fn play_again(&mut self) {
        if self.feedback.is_some() || self.session.state() != SessionState::Complete {
            return;
        }
        self.session.reset();
    }

    /// Advance timers by one frame
    pub fn update(&mut self, dt: Duration) {
        let Some(feedback) = &mut self.feedback else {
            return;
        };
        if let Some(end) = feedback.update(dt, &mut self.player) {
            debug!("Feedback for '{}' ended: {:?}", feedback.shape().name(), end);
            self.feedback = None;
        }
    }

    fn layout(&self) -> Layout {
        Layout::compute(self.window, self.scale, &self.layout_config)
    }

    fn outline_rect(&self, layout: &Layout, shape: &ShapeBundle) -> Rect {
        let (w, h) = shape.outline_image().get().dimensions();
        fit_in_box(layout.outline_box, w, h)
    }

    fn target_rect(&self, layout: &Layout, shape: &ShapeBundle) -> Rect {
        let (w, h) = shape.filled_image().get().dimensions();
        fit_in_box(layout.target_box, w, h)
    }

    /// Hit areas for drag-and-drop; inert while feedback runs or after completion
    pub fn drop_zones(&self) -> DropZones {
        if self.feedback.is_some() {
            return DropZones::default();
        }
        let Some(shape) = self.session.current_shape() else {
            return DropZones::default();
        };
        let layout = self.layout();
        DropZones {
            source: Some(DragSource {
                rect: self.outline_rect(&layout, shape),
                payload: shape.name().to_string(),
            }),
            target: Some(self.target_rect(&layout, shape)),
        }
    }

    /// Build the frame; `drag_position` centers the outline under the cursor
    pub fn scene(&self, drag_position: Option<Vec2>) -> Scene {
        let layout = self.layout();
        let mut sprites = Vec::new();

        let (caption, name_label, shown) = match (&self.feedback, self.session.current()) {
            (Some(feedback), _) => {
                let caption = format!(
                    "Match #{} of {} — Correct: {}",
                    self.session.current_index(),
                    self.session.len(),
                    self.session.correct_count()
                );
                let shape = feedback.shape();
                (caption, Some(shape.name().to_string()), Some((shape, false)))
            }
            (None, CurrentView::Playing {
                shape,
                position,
                total,
                correct,
                ..
            }) => (
                format!("Match #{position} of {total} — Correct: {correct}"),
                None,
                Some((shape, true)),
            ),
            (None, CurrentView::Complete { correct, total }) => (
                format!("All done! Correct matches: {correct} / {total}"),
                None,
                None,
            ),
        };

        if let Some((shape, draggable)) = shown {
            sprites.push(SceneSprite {
                image: shape.filled_image().clone(),
                rect: self.target_rect(&layout, shape),
                alpha: 1.0,
            });

            let mut outline = self.outline_rect(&layout, shape);
            let mut alpha = 1.0;
            if draggable {
                if let Some(position) = drag_position {
                    outline = outline.moved_to(position);
                    alpha = 0.8;
                }
            }
            sprites.push(SceneSprite {
                image: shape.outline_image().clone(),
                rect: outline,
                alpha,
            });
        }

        Scene {
            caption,
            name_label,
            background: self.background.clone(),
            sprites,
            show_end_options: self.feedback.is_none()
                && self.session.state() == SessionState::Complete,
        }
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    #[cfg(test)]
    pub fn is_showing_feedback(&self) -> bool {
        self.feedback.is_some()
    }

    pub fn session(&self) -> &MatchSession {
        &self.session
    }
}
