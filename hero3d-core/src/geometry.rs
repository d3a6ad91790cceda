/// Geometry primitives for the hero scene
use std::collections::HashSet;
use std::f32::consts::{PI, TAU};

use nalgebra::{Point3, Vector3};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }

    fn from_parts(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Build a triangle soup from an indexed vertex list
    fn from_indexed(vertices: &[Vertex], indices: &[[usize; 3]]) -> Self {
        let mut mesh = Self::with_capacity(indices.len());
        for &[a, b, c] in indices {
            mesh.add_triangle(Triangle::new(vertices[a], vertices[b], vertices[c]));
        }
        mesh
    }

    /// Subdivided icosahedron projected onto a sphere.
    ///
    /// Each of the 20 base faces is split into `(detail + 1)²` triangles.
    /// With `detail == 0` the faces keep flat normals, otherwise normals
    /// point radially so the surface shades smoothly.
    pub fn icosahedron(radius: f32, detail: u32) -> Self {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let base = [
            Vector3::new(-1.0, t, 0.0),
            Vector3::new(1.0, t, 0.0),
            Vector3::new(-1.0, -t, 0.0),
            Vector3::new(1.0, -t, 0.0),
            Vector3::new(0.0, -1.0, t),
            Vector3::new(0.0, 1.0, t),
            Vector3::new(0.0, -1.0, -t),
            Vector3::new(0.0, 1.0, -t),
            Vector3::new(t, 0.0, -1.0),
            Vector3::new(t, 0.0, 1.0),
            Vector3::new(-t, 0.0, -1.0),
            Vector3::new(-t, 0.0, 1.0),
        ];
        const FACES: [[usize; 3]; 20] = [
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        let cols = detail as usize + 1;
        let mut mesh = Self::with_capacity(FACES.len() * cols * cols);

        for face in FACES {
            let (a, b, c) = (base[face[0]], base[face[1]], base[face[2]]);

            // Barycentric grid over the face, row i holds cols - i + 1 points
            let mut grid: Vec<Vec<Vector3<f32>>> = Vec::with_capacity(cols + 1);
            for i in 0..=cols {
                let s = i as f32 / cols as f32;
                let aj = a.lerp(&c, s);
                let bj = b.lerp(&c, s);
                let rows = cols - i;
                let row = (0..=rows)
                    .map(|j| {
                        if rows == 0 {
                            aj
                        } else {
                            aj.lerp(&bj, j as f32 / rows as f32)
                        }
                    })
                    .collect();
                grid.push(row);
            }

            for i in 0..cols {
                for j in 0..(2 * (cols - i) - 1) {
                    let k = j / 2;
                    let corners = if j % 2 == 0 {
                        [grid[i][k + 1], grid[i + 1][k], grid[i][k]]
                    } else {
                        [grid[i][k + 1], grid[i + 1][k + 1], grid[i + 1][k]]
                    };
                    mesh.add_triangle(sphere_triangle(corners, radius, detail == 0));
                }
            }
        }

        mesh
    }

    /// UV sphere with the pole rows collapsed into single triangles
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let w = width_segments.max(3) as usize;
        let h = height_segments.max(2) as usize;

        let mut vertices = Vec::with_capacity((w + 1) * (h + 1));
        for iy in 0..=h {
            let v = iy as f32 / h as f32;
            for ix in 0..=w {
                let u = ix as f32 / w as f32;
                let position = Point3::new(
                    -radius * (u * TAU).cos() * (v * PI).sin(),
                    radius * (v * PI).cos(),
                    radius * (u * TAU).sin() * (v * PI).sin(),
                );
                let normal = position.coords.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::y);
                vertices.push(Vertex::from_parts(position, normal));
            }
        }

        let index = |iy: usize, ix: usize| iy * (w + 1) + ix;
        let mut indices = Vec::with_capacity(w * (h - 1) * 2);
        for iy in 0..h {
            for ix in 0..w {
                let a = index(iy, ix + 1);
                let b = index(iy, ix);
                let c = index(iy + 1, ix);
                let d = index(iy + 1, ix + 1);
                if iy != 0 {
                    indices.push([a, b, d]);
                }
                if iy != h - 1 {
                    indices.push([b, c, d]);
                }
            }
        }

        Self::from_indexed(&vertices, &indices)
    }

    /// (p, q) torus knot swept by a circular tube
    pub fn torus_knot(
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
        p: u32,
        q: u32,
    ) -> Self {
        let tubular = tubular_segments.max(3) as usize;
        let radial = radial_segments.max(3) as usize;
        let (p, q) = (p.max(1) as f32, q as f32);

        let curve = |u: f32| -> Vector3<f32> {
            let qu_over_p = q / p * u;
            let cs = qu_over_p.cos();
            Vector3::new(
                radius * (2.0 + cs) * 0.5 * u.cos(),
                radius * (2.0 + cs) * 0.5 * u.sin(),
                radius * qu_over_p.sin() * 0.5,
            )
        };

        let mut vertices = Vec::with_capacity((tubular + 1) * (radial + 1));
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * p * TAU;
            let p1 = curve(u);
            let p2 = curve(u + 0.01);

            // Frenet-like frame along the curve
            let tangent = p2 - p1;
            let bitangent = tangent.cross(&(p2 + p1)).normalize();
            let normal = bitangent.cross(&tangent).normalize();

            for j in 0..=radial {
                let v = j as f32 / radial as f32 * TAU;
                let cx = -tube * v.cos();
                let cy = tube * v.sin();
                let position = p1 + normal * cx + bitangent * cy;
                let surface_normal = (position - p1).normalize();
                vertices.push(Vertex::from_parts(Point3::from(position), surface_normal));
            }
        }

        let mut indices = Vec::with_capacity(tubular * radial * 2);
        for j in 1..=tubular {
            for i in 1..=radial {
                let a = (radial + 1) * (j - 1) + (i - 1);
                let b = (radial + 1) * j + (i - 1);
                let c = (radial + 1) * j + i;
                let d = (radial + 1) * (j - 1) + i;
                indices.push([a, b, d]);
                indices.push([b, c, d]);
            }
        }

        Self::from_indexed(&vertices, &indices)
    }

    /// Flat annulus in the XY plane facing +Z
    pub fn ring(inner_radius: f32, outer_radius: f32, theta_segments: u32) -> Self {
        let segments = theta_segments.max(3) as usize;

        let mut vertices = Vec::with_capacity(2 * (segments + 1));
        for radius in [inner_radius, outer_radius] {
            for i in 0..=segments {
                let theta = i as f32 / segments as f32 * TAU;
                vertices.push(Vertex::new(
                    radius * theta.cos(),
                    radius * theta.sin(),
                    0.0,
                    0.0,
                    0.0,
                    1.0,
                ));
            }
        }

        let mut indices = Vec::with_capacity(segments * 2);
        for i in 0..segments {
            let a = i;
            let b = i + segments + 1;
            let c = i + segments + 2;
            let d = i + 1;
            indices.push([a, b, d]);
            indices.push([b, c, d]);
        }

        Self::from_indexed(&vertices, &indices)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

fn sphere_triangle(corners: [Vector3<f32>; 3], radius: f32, flat: bool) -> Triangle {
    let points = corners.map(|c| Point3::from(c.normalize() * radius));
    let face_normal = (points[1] - points[0]).cross(&(points[2] - points[0])).normalize();
    let vertex = |p: Point3<f32>| {
        let normal = if flat { face_normal } else { p.coords.normalize() };
        Vertex::from_parts(p, normal)
    };
    Triangle::new(vertex(points[0]), vertex(points[1]), vertex(points[2]))
}

/// Line segments, used for wireframe overlays
#[derive(Debug, Clone, Default)]
pub struct LineSet {
    pub segments: Vec<[Point3<f32>; 2]>,
}

impl LineSet {
    /// Unique triangle edges of a mesh
    pub fn wireframe(mesh: &Mesh) -> Self {
        let mut seen = HashSet::new();
        let mut segments = Vec::new();

        for triangle in &mesh.triangles {
            for (i, j) in [(0, 1), (1, 2), (2, 0)] {
                let a = triangle.vertices[i].position;
                let b = triangle.vertices[j].position;
                let (ka, kb) = (quantize(&a), quantize(&b));
                let key = if ka <= kb { (ka, kb) } else { (kb, ka) };
                if seen.insert(key) {
                    segments.push([a, b]);
                }
            }
        }

        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn quantize(p: &Point3<f32>) -> (i32, i32, i32) {
    const GRID: f32 = 1.0e4;
    (
        (p.x * GRID).round() as i32,
        (p.y * GRID).round() as i32,
        (p.z * GRID).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_radius_error(mesh: &Mesh, radius: f32) -> f32 {
        mesh.triangles
            .iter()
            .flat_map(|t| t.vertices.iter())
            .map(|v| (v.position.coords.norm() - radius).abs())
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_icosahedron_face_counts() {
        assert_eq!(Mesh::icosahedron(1.0, 0).triangle_count(), 20);
        assert_eq!(Mesh::icosahedron(1.6, 1).triangle_count(), 80);
        assert_eq!(Mesh::icosahedron(2.2, 2).triangle_count(), 180);
        assert_eq!(Mesh::icosahedron(2.4, 4).triangle_count(), 500);
    }

    #[test]
    fn test_icosahedron_vertices_on_sphere() {
        let mesh = Mesh::icosahedron(1.6, 1);
        assert!(max_radius_error(&mesh, 1.6) < 1e-4);
    }

    #[test]
    fn test_icosahedron_normals_point_outward() {
        for detail in [0, 2] {
            let mesh = Mesh::icosahedron(2.0, detail);
            for triangle in &mesh.triangles {
                let centroid = (triangle.vertices[0].position.coords
                    + triangle.vertices[1].position.coords
                    + triangle.vertices[2].position.coords)
                    / 3.0;
                for vertex in &triangle.vertices {
                    assert!(vertex.normal.dot(&centroid) > 0.0);
                }
            }
        }
    }

    #[test]
    fn test_faces_wind_counter_clockwise_toward_normals() {
        let meshes = [
            Mesh::icosahedron(1.6, 1),
            Mesh::icosahedron(2.2, 2),
            Mesh::sphere(4.2, 32, 32),
            Mesh::torus_knot(2.8, 0.18, 220, 14, 2, 3),
            Mesh::ring(3.8, 4.3, 120),
        ];
        for mesh in &meshes {
            for triangle in &mesh.triangles {
                let normal = triangle.vertices[0].normal
                    + triangle.vertices[1].normal
                    + triangle.vertices[2].normal;
                assert!(triangle.calculate_normal().dot(&normal) > 0.0);
            }
        }
    }

    #[test]
    fn test_wireframe_edges_follow_euler() {
        // V - E + F = 2 for a closed polyhedron
        assert_eq!(LineSet::wireframe(&Mesh::icosahedron(1.0, 0)).len(), 30);
        assert_eq!(LineSet::wireframe(&Mesh::icosahedron(1.6, 1)).len(), 120);
    }

    #[test]
    fn test_sphere_skips_degenerate_pole_triangles() {
        let mesh = Mesh::sphere(4.2, 32, 32);
        assert_eq!(mesh.triangle_count(), 32 * 31 * 2);
        assert!(max_radius_error(&mesh, 4.2) < 1e-3);
    }

    #[test]
    fn test_torus_knot_counts_and_tube_radius() {
        let mesh = Mesh::torus_knot(2.8, 0.18, 220, 14, 2, 3);
        assert_eq!(mesh.triangle_count(), 2 * 220 * 14);
        for triangle in &mesh.triangles {
            for vertex in &triangle.vertices {
                assert!((vertex.normal.norm() - 1.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_ring_stays_between_radii() {
        let mesh = Mesh::ring(3.8, 4.3, 120);
        assert_eq!(mesh.triangle_count(), 240);
        for triangle in &mesh.triangles {
            for vertex in &triangle.vertices {
                let r = vertex.position.coords.norm();
                assert!(r > 3.8 - 1e-4 && r < 4.3 + 1e-4);
                assert_eq!(vertex.position.z, 0.0);
            }
        }
    }
}
