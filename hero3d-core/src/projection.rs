/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

/// Vertical field of view of the hero camera, in degrees
pub const HERO_FOV_DEGREES: f32 = 42.0;

/// Perspective camera for the hero scene
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Matrix4<f32>,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: Point3::new(0.0, 0.0, 8.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: HERO_FOV_DEGREES.to_radians(),
            aspect: aspect_ratio(width, height).unwrap_or(1.0),
            near: 0.1,
            far: 100.0,
            projection: Matrix4::identity(),
        };
        camera.update_projection_matrix();
        camera
    }

    /// Change the aspect ratio and rebuild the cached projection.
    /// A zero-sized viewport keeps the previous aspect.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if let Some(aspect) = aspect_ratio(width, height) {
            self.aspect = aspect;
            self.update_projection_matrix();
        }
    }

    /// Recompute the projection after `fov`, `aspect`, `near` or `far` changed
    pub fn update_projection_matrix(&mut self) {
        self.projection = Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far);
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// The projection as of the last `update_projection_matrix`
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view_matrix()
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `(x, y, depth)` with depth in NDC, or `None` when the point is
    /// behind the camera or outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.view_projection() * model_matrix;
        let clip: Vector4<f32> = mvp * point.to_homogeneous();

        if clip.w <= 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) || depth > 1.0 {
            return None;
        }

        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

fn aspect_ratio(width: u32, height: u32) -> Option<f32> {
    (width > 0 && height > 0).then(|| width as f32 / height as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((camera.fov - 42.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.position, Point3::new(0.0, 0.0, 8.0));
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_set_viewport_refreshes_projection() {
        let mut camera = Camera::new(800, 600);
        let before = camera.projection_matrix();
        camera.set_viewport(1920, 1080);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        let expected = Matrix4::new_perspective(1920.0 / 1080.0, camera.fov, 0.1, 100.0);
        assert!((camera.projection_matrix() - expected).norm() < 1e-6);
        assert!((camera.projection_matrix() - before).norm() > 0.0);
    }

    #[test]
    fn test_zero_viewport_keeps_aspect() {
        let mut camera = Camera::new(800, 600);
        camera.set_viewport(0, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_origin_projects_to_screen_center() {
        let camera = Camera::new(800, 600);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 800, 600)
            .unwrap();
        assert!((x - 400.0).abs() < 1e-3);
        assert!((y - 300.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_point_behind_camera_is_rejected() {
        let camera = Camera::new(800, 600);
        let behind = Point3::new(0.0, 0.0, 20.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 800, 600)
            .is_none());
    }
}
