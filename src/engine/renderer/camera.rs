// Screen-space camera: one unit is one physical pixel, origin top-left

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

#[derive(Debug, Clone)]
pub struct Camera {
    viewport_width: f32,
    viewport_height: f32,
    view_proj: Mat4,
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            viewport_width,
            viewport_height,
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    fn update_view_proj(&mut self) {
        // y grows downward to match window/cursor coordinates
        self.view_proj = Mat4::orthographic_rh(
            0.0,
            self.viewport_width.max(1.0),
            self.viewport_height.max(1.0),
            0.0,
            -1.0,
            1.0,
        );
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.update_view_proj();
    }

    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_proj_matrix().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::{Vec2, Vec4};

    /// Screen pixel -> normalized device coordinates
    fn to_ndc(camera: &Camera, screen_pos: Vec2) -> Vec2 {
        let clip = camera.view_proj_matrix() * Vec4::new(screen_pos.x, screen_pos.y, 0.0, 1.0);
        Vec2::new(clip.x, clip.y)
    }

    #[test]
    fn test_corners_map_to_ndc() {
        let camera = Camera::new(800.0, 600.0);

        let top_left = to_ndc(&camera, Vec2::ZERO);
        assert_relative_eq!(top_left.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(top_left.y, 1.0, epsilon = 1e-5);

        let bottom_right = to_ndc(&camera, Vec2::new(800.0, 600.0));
        assert_relative_eq!(bottom_right.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(bottom_right.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_resize_recenters() {
        let mut camera = Camera::new(800.0, 600.0);
        camera.resize(1000.0, 500.0);
        let center = to_ndc(&camera, Vec2::new(500.0, 250.0));
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-5);
    }
}
