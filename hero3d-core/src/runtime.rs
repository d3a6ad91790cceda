/// The animated hero: scene, camera, orbit controls and animator together
use rand::Rng;

use crate::animation::Animator;
use crate::config::HeroConfig;
use crate::controls::OrbitControls;
use crate::input::InputState;
use crate::projection::Camera;
use crate::renderer::SceneRenderer;
use crate::scene::HeroScene;
use crate::viewport::sync_viewport;

pub struct HeroRuntime {
    pub scene: HeroScene,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub animator: Animator,
}

impl HeroRuntime {
    pub fn new<R: Rng>(config: &HeroConfig, rng: &mut R, width: u32, height: u32) -> Self {
        Self {
            scene: HeroScene::assemble(config, rng),
            camera: Camera::new(width, height),
            controls: OrbitControls::new(config),
            animator: Animator::new(config),
        }
    }

    /// One frame after the clock was read: animate, update controls, render
    pub fn frame<R: SceneRenderer>(
        &mut self,
        elapsed: f32,
        input: &mut InputState,
        renderer: &mut R,
    ) -> Result<(), R::Error> {
        self.animator.animate(&mut self.scene, input, elapsed);

        // Holding the scene suspends the orbit until release
        self.controls.auto_rotate = input.motion.auto_rotate() && !input.drag.is_dragging();
        let (dx, dy) = input.drag.drain();
        if dx != 0.0 || dy != 0.0 {
            self.controls.drag(dx, dy, renderer.size().1 as f32);
        }
        self.controls.update(&mut self.camera);

        renderer.render(&self.scene, &self.camera)
    }

    pub fn resize<R: SceneRenderer>(&mut self, width: u32, height: u32, renderer: &mut R) -> bool {
        sync_viewport(width, height, &mut self.camera, renderer)
    }
}
