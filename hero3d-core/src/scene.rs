/// Hero scene graph: the fixed set of nodes under one rotatable group
use std::f32::consts::PI;

use nalgebra::{Matrix4, Point3};
use rand::Rng;

use crate::config::HeroConfig;
use crate::geometry::{LineSet, Mesh};
use crate::shader::{ShaderSource, HALO_RADIUS, HALO_SHADER};
use crate::stars::StarField;
use crate::transform::{NodeTransform, RotationState, Transform};

/// Linear RGB color in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::rgb(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blending {
    Normal,
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Double,
}

/// Lighting model of a material
#[derive(Debug, Clone, PartialEq)]
pub enum Shading {
    /// Metal/rough surface lit by the scene lights
    Standard {
        metalness: f32,
        roughness: f32,
        emissive: Color,
        emissive_intensity: f32,
    },
    /// Standard shading plus glass-like transmission
    Physical {
        roughness: f32,
        reflectivity: f32,
        transmission: f32,
        thickness: f32,
    },
    /// Flat color, ignores lights
    Unlit,
    /// Screen-space points; `size` is in world units when attenuated
    Points { size: f32, size_attenuation: bool },
    /// Custom program with a time uniform
    Program { source: ShaderSource, time: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
    pub depth_write: bool,
    pub wireframe: bool,
    pub blending: Blending,
    pub side: Side,
    pub shading: Shading,
}

impl Material {
    fn new(color: u32, shading: Shading) -> Self {
        Self {
            color: Color::from_hex(color),
            opacity: 1.0,
            transparent: false,
            depth_write: true,
            wireframe: false,
            blending: Blending::Normal,
            side: Side::Front,
            shading,
        }
    }

    /// Whether back faces are discarded when drawing this material
    pub fn culls_back(&self) -> bool {
        self.side == Side::Front
    }

    fn translucent(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }
}

#[derive(Debug, Clone)]
pub enum Geometry {
    Mesh(Mesh),
    Lines(LineSet),
    Points(StarField),
}

/// Stable handles for the nodes of the hero group, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Core,
    Wireframe,
    Shell,
    Noise,
    Swirl,
    Stars,
    Halo,
    Ring,
}

impl NodeId {
    pub const ALL: [NodeId; 8] = [
        NodeId::Core,
        NodeId::Wireframe,
        NodeId::Shell,
        NodeId::Noise,
        NodeId::Swirl,
        NodeId::Stars,
        NodeId::Halo,
        NodeId::Ring,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NodeId::Core => "core",
            NodeId::Wireframe => "wireframe",
            NodeId::Shell => "shell",
            NodeId::Noise => "noise",
            NodeId::Swirl => "swirl",
            NodeId::Stars => "stars",
            NodeId::Halo => "halo",
            NodeId::Ring => "ring",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    pub geometry: Geometry,
    pub material: Material,
    pub transform: NodeTransform,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    /// Range after which the light contributes nothing
    pub distance: f32,
    pub position: Point3<f32>,
}

/// The three point lights, swung as one group
#[derive(Debug, Clone)]
pub struct LightRig {
    pub rotation: RotationState,
    pub lights: [PointLight; 3],
}

impl LightRig {
    pub fn world_positions(&self) -> [Point3<f32>; 3] {
        let rotation = Transform::rotation_matrix(&self.rotation);
        self.lights.map(|light| rotation.transform_point(&light.position))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Exponential-squared fog
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub color: Color,
    pub density: f32,
}

impl Fog {
    pub fn factor(&self, distance: f32) -> f32 {
        let d = self.density * distance;
        1.0 - (-d * d).exp()
    }
}

/// All renderable state of the hero visualization
#[derive(Debug, Clone)]
pub struct HeroScene {
    /// Rotation of the container group every node hangs from
    pub group: RotationState,
    nodes: Vec<SceneNode>,
    pub light_rig: LightRig,
    pub ambient: AmbientLight,
    pub fog: Fog,
}

impl HeroScene {
    /// Build every primitive once with its literal appearance
    pub fn assemble<R: Rng>(config: &HeroConfig, rng: &mut R) -> Self {
        let core_mesh = Mesh::icosahedron(1.6, 1);
        let wireframe = LineSet::wireframe(&core_mesh);

        let core = Material::new(
            0x9f7bff,
            Shading::Standard {
                metalness: 0.6,
                roughness: 0.25,
                emissive: Color::from_hex(0x251152),
                emissive_intensity: 0.35,
            },
        );

        let wire = Material::new(0xffffff, Shading::Unlit).translucent(0.15);

        let shell = Material::new(
            0x3a5dff,
            Shading::Physical {
                roughness: 0.05,
                reflectivity: 0.6,
                transmission: 0.75,
                thickness: 1.6,
            },
        )
        .translucent(0.28);

        let mut noise = Material::new(
            0x7f5af0,
            Shading::Standard {
                metalness: 0.0,
                roughness: 1.0,
                emissive: Color::from_hex(0x1a0f35),
                emissive_intensity: 0.7,
            },
        )
        .translucent(0.12);
        noise.wireframe = true;

        let swirl = Material::new(
            0x8ef6ff,
            Shading::Standard {
                metalness: 0.7,
                roughness: 0.15,
                emissive: Color::rgb(0.0, 0.0, 0.0),
                emissive_intensity: 1.0,
            },
        )
        .translucent(0.2);

        let mut stars = Material::new(
            0xc8f5ff,
            Shading::Points {
                size: 0.06,
                size_attenuation: true,
            },
        )
        .translucent(0.8);
        stars.depth_write = false;

        let mut halo = Material::new(
            0xffffff,
            Shading::Program {
                source: HALO_SHADER,
                time: 0.0,
            },
        );
        halo.transparent = true;
        halo.depth_write = false;
        halo.blending = Blending::Additive;

        let mut ring = Material::new(0x7f5af0, Shading::Unlit).translucent(0.18);
        ring.side = Side::Double;
        let mut ring_transform = NodeTransform::at(0.0, 0.0, -0.8);
        ring_transform.rotation.x = PI / 2.2;

        let node = |id, geometry, material| SceneNode {
            id,
            geometry,
            material,
            transform: NodeTransform::default(),
        };

        let nodes = vec![
            node(NodeId::Core, Geometry::Mesh(core_mesh), core),
            node(NodeId::Wireframe, Geometry::Lines(wireframe), wire),
            node(NodeId::Shell, Geometry::Mesh(Mesh::icosahedron(2.2, 2)), shell),
            node(NodeId::Noise, Geometry::Mesh(Mesh::icosahedron(2.4, 4)), noise),
            node(
                NodeId::Swirl,
                Geometry::Mesh(Mesh::torus_knot(2.8, 0.18, 220, 14, 2, 3)),
                swirl,
            ),
            node(
                NodeId::Stars,
                Geometry::Points(StarField::generate(config.star_count, rng)),
                stars,
            ),
            node(NodeId::Halo, Geometry::Mesh(Mesh::sphere(HALO_RADIUS, 32, 32)), halo),
            SceneNode {
                id: NodeId::Ring,
                geometry: Geometry::Mesh(Mesh::ring(3.8, 4.3, 120)),
                material: ring,
                transform: ring_transform,
            },
        ];

        let point_light = |color, intensity, distance, x, y, z| PointLight {
            color: Color::from_hex(color),
            intensity,
            distance,
            position: Point3::new(x, y, z),
        };

        let scene = Self {
            group: RotationState::zero(),
            nodes,
            light_rig: LightRig {
                rotation: RotationState::zero(),
                lights: [
                    point_light(0x8f5aff, 8.0, 30.0, 4.0, 4.0, 6.0),
                    point_light(0x36d6ff, 7.0, 32.0, -5.0, -3.0, -4.0),
                    point_light(0xff6fae, 5.0, 25.0, 3.0, -2.0, 4.0),
                ],
            },
            ambient: AmbientLight {
                color: Color::from_hex(0x404060),
                intensity: 1.2,
            },
            fog: Fog {
                color: Color::from_hex(0x050510),
                density: 0.18,
            },
        };

        log::debug!(
            "hero scene assembled: {} nodes, {} triangles, {} stars",
            scene.nodes.len(),
            scene.triangle_count(),
            config.star_count
        );
        scene
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id as usize]
    }

    pub fn group_matrix(&self) -> Matrix4<f32> {
        Transform::rotation_matrix(&self.group)
    }

    /// Model matrix of a node: group rotation, then the node's own transform
    pub fn world_matrix(&self, id: NodeId) -> Matrix4<f32> {
        self.group_matrix() * self.node(id).transform.matrix()
    }

    pub fn triangle_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|node| match &node.geometry {
                Geometry::Mesh(mesh) => mesh.triangle_count(),
                _ => 0,
            })
            .sum()
    }

    /// Current value of the halo's time uniform
    pub fn halo_time(&self) -> f32 {
        match self.node(NodeId::Halo).material.shading {
            Shading::Program { time, .. } => time,
            _ => 0.0,
        }
    }

    pub fn set_halo_time(&mut self, elapsed: f32) {
        if let Shading::Program { time, .. } = &mut self.node_mut(NodeId::Halo).material.shading {
            *time = elapsed;
        }
    }
}
