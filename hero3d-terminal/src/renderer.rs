/// ASCII rasterizer for previewing the hero scene in a terminal
use std::convert::Infallible;
use std::io::Write;

use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use hero3d_core::scene::{Geometry, HeroScene, Material, Shading};
use hero3d_core::{Camera, LineSet, Mesh, SceneRenderer, StarField};
use nalgebra::{Matrix4, Point3, Vector3};

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: u32 = 2;

const AMBIENT: f32 = 0.2;

/// One projected vertex: screen x, screen y, NDC depth
type ScreenPoint = (f32, f32, f32);

/// ASCII renderer that converts the hero scene to terminal characters
pub struct AsciiRenderer {
    logical: (u32, u32),
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    brightness_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    /// Renderer for a terminal of `columns` x `rows` cells
    pub fn new(columns: usize, rows: usize) -> Self {
        let mut renderer = Self {
            logical: (0, 0),
            width: 0,
            height: 0,
            depth_buffer: Vec::new(),
            brightness_buffer: Vec::new(),
            char_buffer: Vec::new(),
            color_buffer: Vec::new(),
        };
        renderer.set_size(columns as u32, rows as u32 * CELL_ASPECT);
        renderer
    }

    /// Cell grid size for a logical size
    pub fn cells_for(width: u32, height: u32) -> (usize, usize) {
        (width.max(1) as usize, (height / CELL_ASPECT).max(1) as usize)
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.brightness_buffer.fill(0.0);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    fn render_mesh(&mut self, mesh: &Mesh, model: &Matrix4<f32>, material: &Material, light_dir: &Vector3<f32>, camera: &Camera) {
        let write_depth = !material.transparent;
        let alpha = if material.transparent { material.opacity.max(0.35) } else { 1.0 };

        for triangle in &mesh.triangles {
            let mut screen = [(0.0, 0.0, 0.0); 3];
            let mut clipped = false;
            for (slot, vertex) in screen.iter_mut().zip(triangle.vertices.iter()) {
                match self.project(camera, &vertex.position, model) {
                    Some(point) => *slot = point,
                    None => {
                        clipped = true;
                        break;
                    }
                }
            }
            if clipped || (material.culls_back() && faces_away(&screen)) {
                continue;
            }

            // Face normal in world space for flat shading
            let normal = model.transform_vector(&triangle.calculate_normal()).normalize();
            let diffuse = normal.dot(light_dir).abs();
            let brightness = ((AMBIENT + (1.0 - AMBIENT) * diffuse) * alpha).min(1.0);

            self.rasterize_triangle(&screen, brightness, material, write_depth);
        }
    }

    fn render_lines(&mut self, lines: &LineSet, model: &Matrix4<f32>, material: &Material, camera: &Camera) {
        let brightness = material.opacity.max(0.2);
        for [a, b] in &lines.segments {
            let (Some(a), Some(b)) = (self.project(camera, a, model), self.project(camera, b, model)) else {
                continue;
            };
            let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;
            for step in 0..=steps {
                let t = step as f32 / steps as f32;
                let point = (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t, a.2 + (b.2 - a.2) * t);
                self.plot(point, brightness, material, false);
            }
        }
    }

    fn render_points(&mut self, stars: &StarField, model: &Matrix4<f32>, material: &Material, camera: &Camera) {
        for star in stars.stars() {
            if let Some(point) = self.project(camera, &star.position, model) {
                let brightness = (material.opacity * star.scale * 0.5).min(1.0);
                self.plot(point, brightness, material, false);
            }
        }
    }

    fn project(&self, camera: &Camera, point: &Point3<f32>, model: &Matrix4<f32>) -> Option<ScreenPoint> {
        camera.project_to_screen(point, model, self.width as u32, self.height as u32)
    }

    fn rasterize_triangle(&mut self, coords: &[ScreenPoint; 3], brightness: f32, material: &Material, write_depth: bool) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py)) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot((px, py, depth), brightness, material, write_depth);
                    }
                }
            }
        }
    }

    /// Opaque fragments depth-test and write depth; translucent ones
    /// depth-test and only replace dimmer cells
    fn plot(&mut self, point: ScreenPoint, brightness: f32, material: &Material, write_depth: bool) {
        let (x, y, depth) = point;
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = y * self.width + x;
        if depth >= self.depth_buffer[idx] {
            return;
        }
        if write_depth {
            self.depth_buffer[idx] = depth;
        } else if brightness <= self.brightness_buffer[idx] {
            return;
        }

        self.brightness_buffer[idx] = brightness;
        let ramp = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        self.char_buffer[idx] = LUMINOSITY_RAMP[ramp.clamp(1, LUMINOSITY_RAMP.len() - 1)];
        let tint = material.color.scaled(0.4 + 0.6 * brightness);
        self.color_buffer[idx] = Color::Rgb {
            r: (tint.r.min(1.0) * 255.0) as u8,
            g: (tint.g.min(1.0) * 255.0) as u8,
            b: (tint.b.min(1.0) * 255.0) as u8,
        };
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    /// Rendered characters, row by row
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.char_buffer
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect())
    }
}

impl SceneRenderer for AsciiRenderer {
    type Error = Infallible;

    fn set_size(&mut self, width: u32, height: u32) {
        let (columns, rows) = Self::cells_for(width, height);
        let size = columns * rows;
        self.logical = (width, height);
        self.width = columns;
        self.height = rows;
        self.depth_buffer = vec![f32::INFINITY; size];
        self.brightness_buffer = vec![0.0; size];
        self.char_buffer = vec![' '; size];
        self.color_buffer = vec![Color::Reset; size];
    }

    fn size(&self) -> (u32, u32) {
        self.logical
    }

    fn render(&mut self, scene: &HeroScene, camera: &Camera) -> Result<(), Infallible> {
        self.clear();

        let light_dir = scene.light_rig.world_positions()[0].coords.normalize();

        // Opaque nodes first so translucent ones test against their depth
        let mut order: Vec<_> = scene.nodes().iter().collect();
        order.sort_by_key(|node| node.material.transparent);

        for node in order {
            let model = scene.world_matrix(node.id);
            match (&node.geometry, &node.material.shading) {
                (_, Shading::Program { .. }) => {}
                (Geometry::Mesh(mesh), _) if node.material.wireframe => {
                    self.render_lines(&LineSet::wireframe(mesh), &model, &node.material, camera);
                }
                (Geometry::Mesh(mesh), _) => {
                    self.render_mesh(mesh, &model, &node.material, &light_dir, camera);
                }
                (Geometry::Lines(lines), _) => {
                    self.render_lines(lines, &model, &node.material, camera);
                }
                (Geometry::Points(stars), _) => {
                    self.render_points(stars, &model, &node.material, camera);
                }
            }
        }
        Ok(())
    }
}

/// Screen rows grow downward, so counter-clockwise front faces land
/// clockwise on screen and back faces get a positive signed area
fn faces_away(coords: &[ScreenPoint; 3]) -> bool {
    let (v0, v1, v2) = (coords[0], coords[1], coords[2]);
    (v1.0 - v0.0) * (v2.1 - v0.1) - (v1.1 - v0.1) * (v2.0 - v0.0) > 0.0
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero3d_core::HeroConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn logical_size_maps_to_half_height_cells() {
        let mut renderer = AsciiRenderer::new(80, 24);
        assert_eq!(renderer.size(), (80, 48));
        renderer.set_size(120, 60);
        assert_eq!(renderer.rows().count(), 30);
        assert_eq!(renderer.size(), (120, 60));
    }

    #[test]
    fn barycentric_of_vertex_is_unit() {
        let (w0, w1, w2) = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (0.0, 0.0)).unwrap();
        assert!((w0 - 1.0).abs() < 1e-6 && w1.abs() < 1e-6 && w2.abs() < 1e-6);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
    }

    #[test]
    fn back_faces_are_detected_from_screen_winding() {
        // Counter-clockwise in y-up space, clockwise once rows grow downward
        let front = [(0.0, 4.0, 0.5), (4.0, 4.0, 0.5), (0.0, 0.0, 0.5)];
        let back = [front[0], front[2], front[1]];
        assert!(!faces_away(&front));
        assert!(faces_away(&back));
    }

    #[test]
    fn hero_core_covers_screen_center() {
        let config = HeroConfig {
            star_count: 32,
            ..HeroConfig::default()
        };
        let scene = HeroScene::assemble(&config, &mut ChaCha8Rng::seed_from_u64(2));
        let mut renderer = AsciiRenderer::new(80, 24);
        let (w, h) = renderer.size();
        let camera = Camera::new(w, h);
        renderer.render(&scene, &camera).unwrap();

        let rows: Vec<String> = renderer.rows().collect();
        assert_ne!(rows[12].chars().nth(40), Some(' '));
        assert!(rows.iter().flat_map(|row| row.chars()).any(|c| c == ' '));
    }
}
