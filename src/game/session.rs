// Match session: progression through the shape list

use crate::engine::assets::ShapeBundle;
use log::{debug, info};

/// Where a play-through stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    Complete,
}

/// Result of proposing a match for the current shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Accepted,
    Rejected,
}

impl MatchOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// What the renderer needs each frame
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentView<'a> {
    Playing {
        shape: &'a ShapeBundle,
        /// 1-based
        position: usize,
        total: usize,
        remaining: usize,
        correct: usize,
    },
    Complete {
        correct: usize,
        total: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("A match session needs at least one shape")]
pub struct EmptySession;

/// One play-through over a fixed, non-empty shape list
///
/// Only accepted matches move `current_index`, so `correct_count` always
/// equals it.
#[derive(Debug)]
pub struct MatchSession {
    shapes: Vec<ShapeBundle>,
    current_index: usize,
    correct_count: usize,
}

impl MatchSession {
    pub fn new(shapes: Vec<ShapeBundle>) -> Result<Self, EmptySession> {
        if shapes.is_empty() {
            return Err(EmptySession);
        }
        Ok(Self {
            shapes,
            current_index: 0,
            correct_count: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        if self.current_index < self.shapes.len() {
            SessionState::Playing
        } else {
            SessionState::Complete
        }
    }

    pub fn current(&self) -> CurrentView<'_> {
        let total = self.shapes.len();
        match self.shapes.get(self.current_index) {
            Some(shape) => CurrentView::Playing {
                shape,
                position: self.current_index + 1,
                total,
                remaining: total - self.current_index,
                correct: self.correct_count,
            },
            None => CurrentView::Complete {
                correct: self.correct_count,
                total,
            },
        }
    }

    /// The shape waiting to be matched, if any
    pub fn current_shape(&self) -> Option<&ShapeBundle> {
        self.shapes.get(self.current_index)
    }

    /// Check a dropped name against the current shape, advancing on a match
    ///
    /// Wrong names (including empty ones) and drops after completion are
    /// rejected without any state change.
    pub fn submit_match(&mut self, candidate: &str) -> MatchOutcome {
        let Some(shape) = self.shapes.get(self.current_index) else {
            debug!("Drop of '{}' ignored, session complete", candidate);
            return MatchOutcome::Rejected;
        };

        if shape.name() != candidate {
            debug!("'{}' does not match '{}'", candidate, shape.name());
            return MatchOutcome::Rejected;
        }

        self.correct_count += 1;
        self.current_index += 1;
        info!(
            "Matched '{}' ({}/{})",
            candidate,
            self.current_index,
            self.shapes.len()
        );
        if self.state() == SessionState::Complete {
            info!(
                "All shapes matched: {} / {}",
                self.correct_count,
                self.shapes.len()
            );
        }
        MatchOutcome::Accepted
    }

    /// Back to the first shape; shapes are not reloaded
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.correct_count = 0;
        info!("Session reset");
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn shapes(&self) -> &[ShapeBundle] {
        &self.shapes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::registry_test_support::bundles;

    fn session(names: &[&str]) -> MatchSession {
        MatchSession::new(bundles(names)).unwrap()
    }

    fn assert_invariants(s: &MatchSession) {
        assert!(s.current_index() <= s.len());
        assert_eq!(s.correct_count(), s.current_index());
    }

    #[test]
    fn test_empty_session_rejected() {
        assert_eq!(MatchSession::new(Vec::new()).unwrap_err(), EmptySession);
    }

    #[test]
    fn test_fresh_session() {
        let s = session(&["triangle", "square"]);
        assert_eq!(s.state(), SessionState::Playing);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.correct_count(), 0);

        match s.current() {
            CurrentView::Playing {
                shape,
                position,
                total,
                remaining,
                correct,
            } => {
                assert_eq!(shape.name(), "triangle");
                assert_eq!((position, total, remaining, correct), (1, 2, 2, 0));
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[test]
    fn test_correct_submission_advances_by_one() {
        let mut s = session(&["triangle", "square"]);
        assert_eq!(s.submit_match("triangle"), MatchOutcome::Accepted);
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.correct_count(), 1);
        assert_eq!(s.current_shape().map(|b| b.name()), Some("square"));
    }

    #[test]
    fn test_wrong_and_empty_names_rejected() {
        let mut s = session(&["triangle", "square"]);
        for candidate in ["square", "", "Triangle", "triangle "] {
            assert_eq!(s.submit_match(candidate), MatchOutcome::Rejected);
            assert_eq!(s.current_index(), 0);
            assert_eq!(s.correct_count(), 0);
        }
    }

    #[test]
    fn test_scenario_walkthrough() {
        let mut s = session(&["triangle", "square", "circle"]);

        assert!(!s.submit_match("square").is_accepted());
        assert_eq!(s.current_index(), 0);

        assert!(s.submit_match("triangle").is_accepted());
        assert_eq!(s.current_index(), 1);

        assert!(!s.submit_match("circle").is_accepted());
        assert_eq!(s.current_index(), 1);

        assert!(s.submit_match("square").is_accepted());
        assert_eq!(s.current_index(), 2);

        assert!(s.submit_match("circle").is_accepted());
        assert_eq!(s.current_index(), 3);
        assert_eq!(s.state(), SessionState::Complete);
        assert_eq!(s.current(), CurrentView::Complete { correct: 3, total: 3 });
        assert_invariants(&s);
    }

    #[test]
    fn test_submissions_after_completion_rejected() {
        let mut s = session(&["oval"]);
        assert!(s.submit_match("oval").is_accepted());
        assert_eq!(s.submit_match("oval"), MatchOutcome::Rejected);
        assert_eq!(s.current_index(), 1);
        assert_invariants(&s);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut s = session(&["triangle", "square"]);
        s.reset();
        assert_eq!(s.current_index(), 0);

        s.submit_match("triangle");
        s.reset();
        assert_eq!((s.current_index(), s.correct_count()), (0, 0));
        assert_eq!(s.state(), SessionState::Playing);

        s.submit_match("triangle");
        s.submit_match("square");
        assert_eq!(s.state(), SessionState::Complete);
        s.reset();
        assert_eq!((s.current_index(), s.correct_count()), (0, 0));
        assert_eq!(s.current_shape().map(|b| b.name()), Some("triangle"));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_invariant_holds_over_mixed_sequence() {
        let mut s = session(&["triangle", "square", "circle"]);
        let attempts = [
            "circle", "triangle", "triangle", "", "square", "hexagon", "circle", "circle",
        ];
        for candidate in attempts {
            s.submit_match(candidate);
            assert_invariants(&s);
        }
        assert_eq!(s.state(), SessionState::Complete);
    }
}
