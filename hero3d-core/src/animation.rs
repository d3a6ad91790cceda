/// Per-frame animation state of the hero scene
use nalgebra::Vector2;

use crate::config::HeroConfig;
use crate::input::InputState;
use crate::scene::{HeroScene, NodeId};

const SHELL_BASE_OPACITY: f32 = 0.28;
const SHELL_OPACITY_SWING: f32 = 0.05;

/// Fixed per-frame increments, radians
const CORE_SPIN: (f32, f32) = (0.0018, 0.0025);
const WIREFRAME_SPIN_Y: f32 = -0.0012;
const SWIRL_SPIN: (f32, f32) = (0.0005, 0.0008);
const NOISE_SPIN_Z: f32 = 0.0007;
const STARS_SPIN_Y: f32 = 0.0003;

/// Move `current` toward `target` by `factor` of the remaining distance
pub fn ease_toward(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Drives every time-dependent property of the scene.
///
/// Only the animator mutates scene nodes; input handlers write
/// [`InputState`] and the animator reads it here.
#[derive(Debug, Clone)]
pub struct Animator {
    easing: f32,
    wobble_amplitude: f32,
    wobble_period: f32,
    drift_speed: f32,
    /// Group rotation eased toward the pointer target, `x` pitch, `y` yaw
    pub eased: Vector2<f32>,
}

impl Animator {
    pub fn new(config: &HeroConfig) -> Self {
        Self {
            easing: config.easing,
            wobble_amplitude: config.wobble_amplitude,
            wobble_period: config.wobble_period,
            drift_speed: config.drift_speed,
            eased: Vector2::zeros(),
        }
    }

    /// Scene part of one tick: group easing, opacity, shader time, spins
    pub fn animate(&mut self, scene: &mut HeroScene, input: &InputState, elapsed: f32) {
        if input.motion.auto_rotate() {
            let target = input.pointer.target;
            self.eased.x = ease_toward(self.eased.x, target.x, self.easing);
            self.eased.y = ease_toward(self.eased.y, target.y, self.easing);
            scene.group.x =
                self.eased.x + (elapsed / self.wobble_period).sin() * self.wobble_amplitude;
            scene.group.y = self.eased.y + elapsed * self.drift_speed;
        }

        scene.node_mut(NodeId::Shell).material.opacity = shell_opacity(elapsed);
        scene.set_halo_time(elapsed);

        let noise = noise_intensity(elapsed);
        scene
            .node_mut(NodeId::Core)
            .transform
            .rotation
            .rotate(CORE_SPIN.0, CORE_SPIN.1, 0.0);
        scene
            .node_mut(NodeId::Wireframe)
            .transform
            .rotation
            .rotate(0.0, WIREFRAME_SPIN_Y, 0.0);
        scene
            .node_mut(NodeId::Swirl)
            .transform
            .rotation
            .rotate(SWIRL_SPIN.0, SWIRL_SPIN.1, 0.0);
        scene
            .node_mut(NodeId::Noise)
            .transform
            .rotation
            .rotate(0.0, 0.0, NOISE_SPIN_Z * noise);
        scene
            .node_mut(NodeId::Stars)
            .transform
            .rotation
            .rotate(0.0, STARS_SPIN_Y, 0.0);

        scene.light_rig.rotation.y = (elapsed / 2.5).sin() * 0.5;
    }
}

pub fn shell_opacity(elapsed: f32) -> f32 {
    SHELL_BASE_OPACITY + (elapsed * 0.5).sin() * SHELL_OPACITY_SWING
}

/// Slow 0.4..1.0 oscillation scaling the noise mesh spin
pub fn noise_intensity(elapsed: f32) -> f32 {
    (elapsed * 0.6).sin() * 0.3 + 0.7
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Bounds;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(star_count: usize) -> (HeroScene, InputState, Animator) {
        let config = HeroConfig {
            star_count,
            ..HeroConfig::default()
        };
        let scene = HeroScene::assemble(&config, &mut ChaCha8Rng::seed_from_u64(5));
        (scene, InputState::new(&config, false), Animator::new(&config))
    }

    #[test]
    fn easing_never_overshoots_a_step() {
        let mut value = 0.0;
        let mut previous_gap = 1.0_f32;
        for _ in 0..500 {
            value = ease_toward(value, 1.0, 0.05);
            let gap = 1.0 - value;
            assert!(value <= 1.0);
            assert!(gap <= previous_gap);
            previous_gap = gap;
        }
        assert!(previous_gap < 1e-6);
    }

    #[test]
    fn easing_at_fixed_point_is_stable() {
        assert_eq!(ease_toward(0.3, 0.3, 0.05), 0.3);
    }

    #[test]
    fn group_follows_pointer_with_wobble_and_drift() {
        let (mut scene, mut input, mut animator) = setup(8);
        input
            .pointer
            .pointer_moved(0.0, 0.0, &Bounds::new(0.0, 0.0, 100.0, 100.0));
        animator.animate(&mut scene, &input, 0.0);
        assert!((animator.eased.x - 0.02).abs() < 1e-6);
        assert!((animator.eased.y + 0.03).abs() < 1e-6);
        assert!((scene.group.x - 0.02).abs() < 1e-6);

        animator.animate(&mut scene, &input, 2.0);
        let expected_pitch = animator.eased.x + (2.0_f32 / 3.0).sin() * 0.08;
        let expected_yaw = animator.eased.y + 0.2;
        assert!((scene.group.x - expected_pitch).abs() < 1e-6);
        assert!((scene.group.y - expected_yaw).abs() < 1e-6);
    }

    #[test]
    fn reduced_motion_freezes_group_but_not_spins() {
        let (mut scene, mut input, mut animator) = setup(8);
        input.motion.set_reduced(true);
        input
            .pointer
            .pointer_moved(0.0, 0.0, &Bounds::new(0.0, 0.0, 100.0, 100.0));
        animator.animate(&mut scene, &input, 4.0);
        assert_eq!(scene.group.x, 0.0);
        assert_eq!(scene.group.y, 0.0);
        assert_eq!(animator.eased, Vector2::zeros());
        assert!((scene.node(NodeId::Core).transform.rotation.y - 0.0025).abs() < 1e-7);
    }

    #[test]
    fn per_frame_spins_accumulate() {
        let (mut scene, input, mut animator) = setup(8);
        for _ in 0..10 {
            animator.animate(&mut scene, &input, 0.0);
        }
        let rotation = |id| scene.node(id).transform.rotation;
        assert!((rotation(NodeId::Core).x - 0.018).abs() < 1e-6);
        assert!((rotation(NodeId::Wireframe).y + 0.012).abs() < 1e-6);
        assert!((rotation(NodeId::Swirl).y - 0.008).abs() < 1e-6);
        assert!((rotation(NodeId::Stars).y - 0.003).abs() < 1e-6);
        // sin(0) = 0, so the noise intensity is 0.7
        assert!((rotation(NodeId::Noise).z - 10.0 * 0.0007 * 0.7).abs() < 1e-6);
        assert_eq!(rotation(NodeId::Ring).y, 0.0);
    }

    #[test]
    fn shell_opacity_and_halo_time_track_elapsed() {
        let (mut scene, input, mut animator) = setup(8);
        let t = std::f32::consts::PI;
        animator.animate(&mut scene, &input, t);
        assert!((scene.node(NodeId::Shell).material.opacity - 0.33).abs() < 1e-5);
        assert_eq!(scene.halo_time(), t);
        assert!((scene.light_rig.rotation.y - (t / 2.5).sin() * 0.5).abs() < 1e-6);
    }

    #[test]
    fn oscillations_stay_in_band() {
        for i in 0..1000 {
            let t = i as f32 * 0.05;
            let opacity = shell_opacity(t);
            let noise = noise_intensity(t);
            assert!((0.23 - 1e-6..=0.33 + 1e-6).contains(&opacity));
            assert!((0.4 - 1e-6..=1.0 + 1e-6).contains(&noise));
        }
    }
}
