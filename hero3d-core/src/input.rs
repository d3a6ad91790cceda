/// Pointer, drag and reduced-motion input, written by event handlers and
/// read once per frame by the animation loop
use nalgebra::Vector2;

use crate::config::HeroConfig;

/// Screen-space box of the hero element, as reported by `getBoundingClientRect`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Pointer position relative to the box, unclamped.
    /// `None` when the box has no area.
    pub fn normalize(&self, client_x: f64, client_y: f64) -> Option<Vector2<f32>> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Vector2::new(
            ((client_x - self.left) / self.width) as f32,
            ((client_y - self.top) / self.height) as f32,
        ))
    }
}

/// Linear remap of `x` from `[a1, a2]` to `[b1, b2]`
pub fn map_linear(x: f32, a1: f32, a2: f32, b1: f32, b2: f32) -> f32 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}

/// Maps pointer position to the rotation the hero group should ease toward
#[derive(Debug, Clone, PartialEq)]
pub struct PointerTracker {
    pitch_range: f32,
    yaw_range: f32,
    /// Last pointer position, normalized to the hero box
    pub normalized: Vector2<f32>,
    /// `x` is pitch, `y` is yaw, both radians
    pub target: Vector2<f32>,
}

impl PointerTracker {
    pub fn new(config: &HeroConfig) -> Self {
        Self {
            pitch_range: config.pitch_range,
            yaw_range: config.yaw_range,
            normalized: Vector2::zeros(),
            target: Vector2::zeros(),
        }
    }

    /// Record a pointer move; a degenerate box leaves the target untouched
    pub fn pointer_moved(&mut self, client_x: f64, client_y: f64, bounds: &Bounds) {
        let Some(normalized) = bounds.normalize(client_x, client_y) else {
            return;
        };
        self.normalized = normalized;
        self.target = Vector2::new(
            map_linear(normalized.y, 0.0, 1.0, self.pitch_range, -self.pitch_range),
            map_linear(normalized.x, 0.0, 1.0, -self.yaw_range, self.yaw_range),
        );
    }
}

/// The platform's reduced-motion accessibility preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionPreference {
    reduced: bool,
}

impl MotionPreference {
    pub fn new(reduced: bool) -> Self {
        Self { reduced }
    }

    pub fn set_reduced(&mut self, reduced: bool) {
        self.reduced = reduced;
    }

    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    pub fn auto_rotate(&self) -> bool {
        !self.reduced
    }
}

/// Pointer-drag pixels not yet applied to the orbit controls
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragDelta {
    dx: f32,
    dy: f32,
    active: bool,
    last: Option<(f64, f64)>,
}

impl DragDelta {
    pub fn begin(&mut self, client_x: f64, client_y: f64) {
        self.active = true;
        self.last = Some((client_x, client_y));
    }

    pub fn moved(&mut self, client_x: f64, client_y: f64) {
        if !self.active {
            return;
        }
        if let Some((x, y)) = self.last {
            self.dx += (client_x - x) as f32;
            self.dy += (client_y - y) as f32;
        }
        self.last = Some((client_x, client_y));
    }

    pub fn end(&mut self) {
        self.active = false;
        self.last = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.active
    }

    /// Take the accumulated delta, leaving zero behind
    pub fn drain(&mut self) -> (f32, f32) {
        let delta = (self.dx, self.dy);
        self.dx = 0.0;
        self.dy = 0.0;
        delta
    }
}

/// Everything the input handlers write and the frame loop reads
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    pub pointer: PointerTracker,
    pub motion: MotionPreference,
    pub drag: DragDelta,
}

impl InputState {
    pub fn new(config: &HeroConfig, reduced_motion: bool) -> Self {
        Self {
            pointer: PointerTracker::new(config),
            motion: MotionPreference::new(reduced_motion),
            drag: DragDelta::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> PointerTracker {
        PointerTracker::new(&HeroConfig::default())
    }

    fn hero_box() -> Bounds {
        Bounds::new(100.0, 50.0, 800.0, 600.0)
    }

    #[test]
    fn center_maps_to_zero_rotation() {
        let mut pointer = tracker();
        pointer.pointer_moved(500.0, 350.0, &hero_box());
        assert!(pointer.target.x.abs() < 1e-6);
        assert!(pointer.target.y.abs() < 1e-6);
    }

    #[test]
    fn top_left_maps_to_range_extremes() {
        let mut pointer = tracker();
        pointer.pointer_moved(100.0, 50.0, &hero_box());
        assert!((pointer.target.x - 0.4).abs() < 1e-6);
        assert!((pointer.target.y + 0.6).abs() < 1e-6);
    }

    #[test]
    fn inside_box_stays_in_range_and_is_monotonic() {
        let bounds = hero_box();
        let mut pointer = tracker();
        let mut last_pitch = f32::INFINITY;
        let mut last_yaw = f32::NEG_INFINITY;
        for step in 0..=20 {
            let f = step as f64 / 20.0;
            pointer.pointer_moved(100.0 + 800.0 * f, 50.0 + 600.0 * f, &bounds);
            let n = pointer.normalized;
            assert!((0.0..=1.0).contains(&n.x) && (0.0..=1.0).contains(&n.y));
            assert!(pointer.target.x <= last_pitch && pointer.target.x >= -0.4 - 1e-6);
            assert!(pointer.target.y >= last_yaw && pointer.target.y <= 0.6 + 1e-6);
            last_pitch = pointer.target.x;
            last_yaw = pointer.target.y;
        }
    }

    #[test]
    fn outside_box_is_not_clamped() {
        let mut pointer = tracker();
        pointer.pointer_moved(1700.0, 50.0, &hero_box());
        assert!((pointer.normalized.x - 2.0).abs() < 1e-6);
        assert!((pointer.target.y - 1.8).abs() < 1e-5);
    }

    #[test]
    fn empty_box_keeps_previous_target() {
        let mut pointer = tracker();
        pointer.pointer_moved(100.0, 50.0, &hero_box());
        let before = pointer.target;
        pointer.pointer_moved(10.0, 10.0, &Bounds::new(0.0, 0.0, 0.0, 600.0));
        assert_eq!(pointer.target, before);
    }

    #[test]
    fn reduced_motion_disables_auto_rotate() {
        let mut motion = MotionPreference::new(false);
        assert!(motion.auto_rotate());
        motion.set_reduced(true);
        assert!(!motion.auto_rotate());
    }

    #[test]
    fn drag_accumulates_until_drained() {
        let mut drag = DragDelta::default();
        drag.moved(5.0, 5.0);
        assert_eq!(drag.drain(), (0.0, 0.0));

        drag.begin(10.0, 10.0);
        assert!(drag.is_dragging());
        drag.moved(14.0, 7.0);
        drag.moved(20.0, 9.0);
        assert_eq!(drag.drain(), (10.0, -1.0));
        assert_eq!(drag.drain(), (0.0, 0.0));

        drag.end();
        assert!(!drag.is_dragging());
        drag.moved(40.0, 40.0);
        assert_eq!(drag.drain(), (0.0, 0.0));
    }
}
