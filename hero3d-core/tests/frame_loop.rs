use hero3d_core::{
    Bounds, Camera, FrameLoop, HeroConfig, HeroRuntime, HeroScene, InputState, LoopControl,
    ManualClock, NodeId, SceneRenderer,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Records what each render saw instead of drawing
#[derive(Default)]
struct RecordingRenderer {
    size: (u32, u32),
    frames: Vec<Snapshot>,
    fail_on_frame: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    group_pitch: f32,
    group_yaw: f32,
    shell_opacity: f32,
    halo_time: f32,
    aspect: f32,
    camera_x: f32,
}

impl SceneRenderer for RecordingRenderer {
    type Error = String;

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn render(&mut self, scene: &HeroScene, camera: &Camera) -> Result<(), String> {
        if self.fail_on_frame == Some(self.frames.len()) {
            return Err("context lost".to_string());
        }
        self.frames.push(Snapshot {
            group_pitch: scene.group.x,
            group_yaw: scene.group.y,
            shell_opacity: scene.node(NodeId::Shell).material.opacity,
            halo_time: scene.halo_time(),
            aspect: camera.aspect,
            camera_x: camera.position.x,
        });
        Ok(())
    }
}

fn setup() -> (HeroRuntime, InputState, RecordingRenderer, FrameLoop<ManualClock>) {
    let config = HeroConfig {
        star_count: 16,
        ..HeroConfig::default()
    };
    let mut runtime = HeroRuntime::new(&config, &mut ChaCha8Rng::seed_from_u64(11), 1, 1);
    let mut renderer = RecordingRenderer::default();
    runtime.resize(800, 600, &mut renderer);
    let input = InputState::new(&config, false);
    (runtime, input, renderer, FrameLoop::new(ManualClock::new()))
}

#[test]
fn frames_step_deterministically() {
    let (mut runtime, mut input, mut renderer, mut frames) = setup();
    for _ in 0..3 {
        frames.clock().advance(1.0 / 60.0);
        let control = frames.tick(&mut runtime, &mut input, &mut renderer).unwrap();
        assert_eq!(control, LoopControl::Continue);
    }
    assert_eq!(frames.frames(), 3);
    assert_eq!(renderer.frames.len(), 3);

    let last = renderer.frames[2];
    assert!((last.halo_time - 3.0 / 60.0).abs() < 1e-6);
    assert!((last.aspect - 800.0 / 600.0).abs() < 1e-6);
    let expected_opacity = 0.28 + (0.5 * 3.0_f32 / 60.0).sin() * 0.05;
    assert!((last.shell_opacity - expected_opacity).abs() < 1e-6);
}

#[test]
fn pointer_target_is_approached_without_overshoot() {
    let (mut runtime, mut input, mut renderer, mut frames) = setup();
    input
        .pointer
        .pointer_moved(0.0, 0.0, &Bounds::new(0.0, 0.0, 800.0, 600.0));

    // Clock held at zero: no wobble or drift, only easing
    let mut last = 0.0_f32;
    for _ in 0..200 {
        frames.tick(&mut runtime, &mut input, &mut renderer).unwrap();
        let pitch = renderer.frames.last().unwrap().group_pitch;
        assert!(pitch >= last && pitch <= 0.4);
        last = pitch;
    }
    assert!((last - 0.4).abs() < 1e-3);
    assert!((renderer.frames.last().unwrap().group_yaw + 0.6).abs() < 1e-3);
}

#[test]
fn reduced_motion_stops_camera_orbit_and_group_motion() {
    let (mut runtime, mut input, mut renderer, mut frames) = setup();
    input.motion.set_reduced(true);
    for _ in 0..30 {
        frames.clock().advance(0.1);
        frames.tick(&mut runtime, &mut input, &mut renderer).unwrap();
    }
    assert!(!runtime.controls.auto_rotate);
    for snapshot in &renderer.frames {
        assert_eq!(snapshot.group_pitch, 0.0);
        assert!(snapshot.camera_x.abs() < 1e-4);
    }

    input.motion.set_reduced(false);
    for _ in 0..30 {
        frames.clock().advance(0.1);
        frames.tick(&mut runtime, &mut input, &mut renderer).unwrap();
    }
    assert!(runtime.controls.auto_rotate);
    assert!(renderer.frames.last().unwrap().camera_x.abs() > 1e-3);
}

#[test]
fn drag_is_drained_into_controls() {
    let (mut runtime, mut input, mut renderer, mut frames) = setup();
    input.motion.set_reduced(true);
    input.drag.begin(100.0, 100.0);
    input.drag.moved(220.0, 100.0);
    frames.tick(&mut runtime, &mut input, &mut renderer).unwrap();
    assert_eq!(input.drag.drain(), (0.0, 0.0));
    assert!(renderer.frames[0].camera_x.abs() > 1e-3);
}

#[test]
fn holding_a_drag_suspends_auto_rotate() {
    let (mut runtime, mut input, mut renderer, mut frames) = setup();
    input.drag.begin(100.0, 100.0);
    frames.tick(&mut runtime, &mut input, &mut renderer).unwrap();
    assert!(!runtime.controls.auto_rotate);
    assert!(renderer.frames[0].camera_x.abs() < 1e-6);

    input.drag.end();
    frames.tick(&mut runtime, &mut input, &mut renderer).unwrap();
    assert!(runtime.controls.auto_rotate);
    assert!(renderer.frames[1].camera_x.abs() > 1e-6);
}

#[test]
fn cancel_stops_the_loop() {
    let (mut runtime, mut input, mut renderer, mut frames) = setup();
    let handle = frames.cancel_handle();
    frames.tick(&mut runtime, &mut input, &mut renderer).unwrap();
    handle.cancel();
    assert!(!frames.is_running());
    let control = frames.tick(&mut runtime, &mut input, &mut renderer).unwrap();
    assert_eq!(control, LoopControl::Stop);
    assert_eq!(renderer.frames.len(), 1);
}

#[test]
fn render_error_is_fatal() {
    let (mut runtime, mut input, mut renderer, mut frames) = setup();
    renderer.fail_on_frame = Some(1);
    frames.tick(&mut runtime, &mut input, &mut renderer).unwrap();
    assert!(frames.tick(&mut runtime, &mut input, &mut renderer).is_err());
    assert!(!frames.is_running());
    assert_eq!(
        frames.tick(&mut runtime, &mut input, &mut renderer),
        Ok(LoopControl::Stop)
    );
}

#[test]
fn resize_updates_camera_and_renderer() {
    let (mut runtime, _, mut renderer, _) = setup();
    assert!(runtime.resize(1280, 720, &mut renderer));
    assert_eq!(renderer.size(), (1280, 720));
    assert!((runtime.camera.aspect - 1280.0 / 720.0).abs() < 1e-6);
}
