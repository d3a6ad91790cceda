/// Keeps renderer size and camera aspect in step with the hero container
use crate::projection::Camera;
use crate::renderer::SceneRenderer;

/// Resize the renderer and camera to the container's content box.
///
/// Returns `false` (and changes nothing) for a zero-sized box, which the
/// browser reports while the element is hidden.
pub fn sync_viewport<R: SceneRenderer>(
    width: u32,
    height: u32,
    camera: &mut Camera,
    renderer: &mut R,
) -> bool {
    if width == 0 || height == 0 {
        return false;
    }
    renderer.set_size(width, height);
    camera.set_viewport(width, height);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::HeroScene;
    use nalgebra::Matrix4;

    #[derive(Default)]
    struct SizeOnly {
        size: (u32, u32),
        resizes: usize,
    }

    impl SceneRenderer for SizeOnly {
        type Error = ();

        fn set_size(&mut self, width: u32, height: u32) {
            self.size = (width, height);
            self.resizes += 1;
        }

        fn size(&self) -> (u32, u32) {
            self.size
        }

        fn render(&mut self, _scene: &HeroScene, _camera: &Camera) -> Result<(), ()> {
            Ok(())
        }
    }

    #[test]
    fn viewport_800_by_600() {
        let mut camera = Camera::new(1, 1);
        let mut renderer = SizeOnly::default();
        assert!(sync_viewport(800, 600, &mut camera, &mut renderer));
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(renderer.size(), (800, 600));
    }

    #[test]
    fn any_positive_size_matches_aspect_and_buffer() {
        let mut camera = Camera::new(1, 1);
        let mut renderer = SizeOnly::default();
        for (w, h) in [(1, 1), (320, 1080), (2560, 400), (7, 3)] {
            sync_viewport(w, h, &mut camera, &mut renderer);
            assert!((camera.aspect - w as f32 / h as f32).abs() < 1e-6);
            assert_eq!(renderer.size(), (w, h));
            let expected = Matrix4::new_perspective(camera.aspect, camera.fov, camera.near, camera.far);
            assert!((camera.projection_matrix() - expected).norm() < 1e-6);
        }
    }

    #[test]
    fn redundant_sync_is_a_no_op_in_effect() {
        let mut camera = Camera::new(1, 1);
        let mut renderer = SizeOnly::default();
        sync_viewport(1024, 768, &mut camera, &mut renderer);
        let projection = camera.projection_matrix();
        sync_viewport(1024, 768, &mut camera, &mut renderer);
        assert_eq!(camera.projection_matrix(), projection);
        assert_eq!(renderer.size(), (1024, 768));
    }

    #[test]
    fn zero_sized_box_is_skipped() {
        let mut camera = Camera::new(800, 600);
        let mut renderer = SizeOnly::default();
        assert!(!sync_viewport(0, 600, &mut camera, &mut renderer));
        assert_eq!(renderer.resizes, 0);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }
}
