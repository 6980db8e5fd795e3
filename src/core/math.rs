// Screen-space geometry helpers

use glam::Vec2;

/// Axis-aligned rectangle in screen pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Create a rectangle centered on a point
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Check if a point lies inside the rectangle (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x <= max.x && point.y >= self.min.y && point.y <= max.y
    }

    /// Same size, new center
    pub fn moved_to(&self, center: Vec2) -> Self {
        Self::centered(center, self.size)
    }
}

/// Largest size with the image's aspect ratio that fits in a `bound` x `bound` box
pub fn fit_within(width: u32, height: u32, bound: f32) -> Vec2 {
    if width == 0 || height == 0 {
        return Vec2::splat(bound);
    }
    let (w, h) = (width as f32, height as f32);
    let scale = bound / w.max(h);
    Vec2::new(w * scale, h * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(30.0, 30.0)));
        assert!(rect.contains(Vec2::new(20.0, 15.0)));
        assert!(!rect.contains(Vec2::new(9.9, 15.0)));
        assert!(!rect.contains(Vec2::new(15.0, 31.0)));
    }

    #[test]
    fn test_rect_centered() {
        let rect = Rect::centered(Vec2::new(100.0, 50.0), Vec2::new(40.0, 20.0));
        assert_eq!(rect.min, Vec2::new(80.0, 40.0));
        assert_eq!(rect.center(), Vec2::new(100.0, 50.0));

        let moved = rect.moved_to(Vec2::ZERO);
        assert_eq!(moved.size, rect.size);
        assert_eq!(moved.center(), Vec2::ZERO);
    }

    #[test]
    fn test_fit_within_preserves_aspect() {
        let wide = fit_within(400, 200, 150.0);
        assert_relative_eq!(wide.x, 150.0);
        assert_relative_eq!(wide.y, 75.0);

        let tall = fit_within(100, 300, 150.0);
        assert_relative_eq!(tall.x, 50.0);
        assert_relative_eq!(tall.y, 150.0);
    }

    #[test]
    fn test_fit_within_degenerate_image() {
        assert_eq!(fit_within(0, 10, 200.0), Vec2::splat(200.0));
    }
}
