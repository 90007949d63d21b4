// Screen-space camera: world units are logical pixels, origin top-left

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Fixed 2D camera looking at the arena
#[derive(Debug, Clone)]
pub struct Camera {
    /// Surface width in physical pixels
    viewport_width: f32,
    /// Surface height in physical pixels
    viewport_height: f32,
    /// Physical pixels per logical pixel
    scale_factor: f32,
    /// View-projection matrix
    view_proj: Mat4,
}

impl Camera {
    /// Create a new camera for a surface of the given physical size
    pub fn new(viewport_width: f32, viewport_height: f32, scale_factor: f32) -> Self {
        let mut camera = Self {
            viewport_width,
            viewport_height,
            scale_factor: scale_factor.max(f32::EPSILON),
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    /// Update the view-projection matrix
    fn update_view_proj(&mut self) {
        let size = self.world_size();

        // y grows downward, so bottom is the full height and top is zero
        self.view_proj = Mat4::orthographic_rh(0.0, size.x, size.y, 0.0, -1.0, 1.0);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.update_view_proj();
    }

    /// Change the HiDPI scale factor
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor.max(f32::EPSILON);
        self.update_view_proj();
    }

    /// Get the view-projection matrix
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Visible area in world units
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height) / self.scale_factor
    }

    /// Convert physical window coordinates to world coordinates
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        screen_pos / self.scale_factor
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    /// Create a new camera uniform from a camera
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
    use glam::Vec4;

    fn project(camera: &Camera, x: f32, y: f32) -> Vec4 {
        camera.view_proj_matrix() * Vec4::new(x, y, 0.0, 1.0)
    }

    #[test]
    fn test_top_left_maps_to_clip_corner() {
        let camera = Camera::new(300.0, 300.0, 1.0);
        let clip = project(&camera, 0.0, 0.0);
        assert_relative_eq!(clip.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_bottom_right_maps_to_clip_corner() {
        let camera = Camera::new(300.0, 300.0, 1.0);
        let clip = project(&camera, 300.0, 300.0);
        assert_relative_eq!(clip.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_hidpi_keeps_world_size() {
        let camera = Camera::new(600.0, 600.0, 2.0);
        assert_eq!(camera.world_size(), Vec2::new(300.0, 300.0));
        assert_eq!(
            camera.screen_to_world(Vec2::new(100.0, 40.0)),
            Vec2::new(50.0, 20.0)
        );
    }

    #[test]
    fn test_resize_updates_projection() {
        let mut camera = Camera::new(300.0, 300.0, 1.0);
        camera.resize(600.0, 300.0);
        let clip = project(&camera, 300.0, 150.0);
        assert_relative_eq!(clip.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y, 0.0, epsilon = 1e-5);
    }
}
