/// Damped orbit controls: auto-rotate and drag around a target point,
/// zoom and pan disabled
use std::f32::consts::{PI, TAU};

use nalgebra::{Point3, Vector3};

use crate::config::HeroConfig;
use crate::projection::Camera;

const EPS: f32 = 1e-6;

/// Spherical coordinates around the Y axis:
/// `theta` measured from +Z toward +X, `phi` from +Y down
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: &Vector3<f32>) -> Self {
        let radius = offset.norm();
        if radius < EPS {
            return Self {
                radius: 0.0,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vector3<f32> {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vector3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    delta_theta: f32,
    delta_phi: f32,
}

impl OrbitControls {
    pub fn new(config: &HeroConfig) -> Self {
        Self {
            target: Point3::origin(),
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 0.45,
            auto_rotate: true,
            auto_rotate_speed: config.auto_rotate_speed,
            min_polar_angle: PI / 3.0,
            max_polar_angle: PI / 1.5,
            delta_theta: 0.0,
            delta_phi: 0.0,
        }
    }

    /// Auto-rotation per frame; speed 1.0 is one turn per minute at 60 fps
    pub fn auto_rotation_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.auto_rotate_speed
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Feed a pointer drag of `(dx, dy)` pixels over an element `element_height` tall
    pub fn drag(&mut self, dx: f32, dy: f32, element_height: f32) {
        if element_height <= 0.0 {
            return;
        }
        self.rotate_left(TAU * dx / element_height * self.rotate_speed);
        self.rotate_up(TAU * dy / element_height * self.rotate_speed);
    }

    /// Advance the damped orbit by one frame and aim the camera at the target.
    /// Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_offset(&offset);

        if self.auto_rotate {
            self.rotate_left(self.auto_rotation_angle());
        }

        if self.enable_damping {
            spherical.theta += self.delta_theta * self.damping_factor;
            spherical.phi += self.delta_phi * self.damping_factor;
        } else {
            spherical.theta += self.delta_theta;
            spherical.phi += self.delta_phi;
        }

        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(EPS, PI - EPS);

        let previous = camera.position;
        camera.position = self.target + spherical.to_offset();
        camera.target = self.target;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }

        (camera.position - previous).norm_squared() > EPS
    }
}
