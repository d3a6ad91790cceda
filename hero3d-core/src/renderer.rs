/// Seam between the animated scene and whatever draws it
use crate::projection::Camera;
use crate::scene::HeroScene;

pub trait SceneRenderer {
    type Error;

    /// Resize the backing buffer to a logical `width` x `height`
    fn set_size(&mut self, width: u32, height: u32);

    /// Logical size as of the last `set_size`
    fn size(&self) -> (u32, u32);

    /// Draw the scene as seen from `camera`
    fn render(&mut self, scene: &HeroScene, camera: &Camera) -> Result<(), Self::Error>;
}
