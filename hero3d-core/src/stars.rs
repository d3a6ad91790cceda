/// Procedural star field surrounding the hero
use std::f32::consts::TAU;

use nalgebra::Point3;
use rand::Rng;

pub const STAR_MIN_RADIUS: f32 = 4.0;
pub const STAR_MAX_RADIUS: f32 = 12.0;
pub const STAR_HALF_HEIGHT: f32 = 5.0;
pub const STAR_MIN_SCALE: f32 = 0.4;
pub const STAR_MAX_SCALE: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Point3<f32>,
    pub scale: f32,
}

/// Immutable cloud of stars, sampled once at startup
#[derive(Debug, Clone)]
pub struct StarField {
    stars: Vec<Star>,
}

impl StarField {
    /// Sample `count` stars on a cylindrical shell around the Y axis
    pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Self {
        let stars = (0..count)
            .map(|_| {
                let radius = rng.gen_range(STAR_MIN_RADIUS..=STAR_MAX_RADIUS);
                let angle = rng.gen_range(0.0..TAU);
                let y = rng.gen_range(-STAR_HALF_HEIGHT..=STAR_HALF_HEIGHT);
                Star {
                    position: Point3::new(angle.cos() * radius, y, angle.sin() * radius),
                    scale: rng.gen_range(STAR_MIN_SCALE..=STAR_MAX_SCALE),
                }
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
