// Screen layout: a centered vertical stack of outline over target

use crate::core::math::{fit_within, Rect};
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub outline_size: f32,
    pub target_size: f32,
    pub spacing: f32,
}

/// Square boxes the two images are fitted into, in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub outline_box: Rect,
    pub target_box: Rect,
}

impl Layout {
    /// Stack outline and target, centered in the window
    pub fn compute(window: Vec2, scale: f32, config: &LayoutConfig) -> Self {
        let outline = config.outline_size * scale;
        let target = config.target_size * scale;
        let spacing = config.spacing * scale;

        let stack_height = outline + spacing + target;
        let top = (window.y - stack_height) * 0.5;
        let center_x = window.x * 0.5;

        Self {
            outline_box: Rect::new(
                Vec2::new(center_x - outline * 0.5, top),
                Vec2::splat(outline),
            ),
            target_box: Rect::new(
                Vec2::new(center_x - target * 0.5, top + outline + spacing),
                Vec2::splat(target),
            ),
        }
    }
}

/// Rect of an image fitted (aspect kept) and centered in a square box
pub fn fit_in_box(bounds: Rect, width: u32, height: u32) -> Rect {
    let size = fit_within(width, height, bounds.size.x.min(bounds.size.y));
    Rect::centered(bounds.center(), size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config() -> LayoutConfig {
        LayoutConfig {
            outline_size: 150.0,
            target_size: 200.0,
            spacing: 20.0,
        }
    }

    #[test]
    fn test_stack_is_centered() {
        let layout = Layout::compute(Vec2::new(800.0, 600.0), 1.0, &config());

        // 150 + 20 + 200 = 370 tall, so the stack starts at (600 - 370) / 2
        assert_relative_eq!(layout.outline_box.min.y, 115.0);
        assert_relative_eq!(layout.outline_box.center().x, 400.0);
        assert_relative_eq!(layout.target_box.min.y, 285.0);
        assert_relative_eq!(layout.target_box.max().y, 485.0);
        assert_relative_eq!(layout.target_box.center().x, 400.0);
    }

    #[test]
    fn test_scale_factor_applies() {
        let layout = Layout::compute(Vec2::new(1600.0, 1200.0), 2.0, &config());
        assert_relative_eq!(layout.outline_box.size.x, 300.0);
        assert_relative_eq!(layout.target_box.size.y, 400.0);
    }

    #[test]
    fn test_boxes_do_not_overlap() {
        let layout = Layout::compute(Vec2::new(800.0, 600.0), 1.0, &config());
        assert!(layout.outline_box.max().y < layout.target_box.min.y);
    }

    #[test]
    fn test_fit_in_box() {
        let bounds = Rect::new(Vec2::ZERO, Vec2::splat(200.0));
        let rect = fit_in_box(bounds, 400, 100);
        assert_relative_eq!(rect.size.x, 200.0);
        assert_relative_eq!(rect.size.y, 50.0);
        assert_eq!(rect.center(), bounds.center());
    }
}
