/// WebGL2 backend for the hero scene
use std::collections::HashMap;

use hero3d_core::scene::{Blending, Geometry, HeroScene, Material, NodeId, SceneNode, Shading};
use hero3d_core::shader::{ShaderSource, TIME_UNIFORM};
use hero3d_core::{Camera, LineSet, Mesh, SceneRenderer, StarField};
use nalgebra::Matrix4;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::error::{WebError, WebResult};
use crate::shaders;

fn compile_shader(gl: &GL, src: &str, shader_type: u32) -> WebResult<WebGlShader> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or_else(|| WebError::Shader("could not create shader".to_string()))?;
    gl.shader_source(&shader, src);
    gl.compile_shader(&shader);
    if !gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        return Err(WebError::Shader(
            gl.get_shader_info_log(&shader).unwrap_or_default(),
        ));
    }
    Ok(shader)
}

fn link_program(gl: &GL, source: &ShaderSource) -> WebResult<WebGlProgram> {
    let vert = compile_shader(gl, source.vertex, GL::VERTEX_SHADER)?;
    let frag = compile_shader(gl, source.fragment, GL::FRAGMENT_SHADER)?;
    let prog = gl
        .create_program()
        .ok_or_else(|| WebError::Shader("could not create program".to_string()))?;
    gl.attach_shader(&prog, &vert);
    gl.attach_shader(&prog, &frag);
    gl.link_program(&prog);
    if !gl
        .get_program_parameter(&prog, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        return Err(WebError::Shader(
            gl.get_program_info_log(&prog).unwrap_or_default(),
        ));
    }
    Ok(prog)
}

/// Vertex array uploaded once per node
struct GpuGeometry {
    vao: WebGlVertexArrayObject,
    mode: u32,
    count: i32,
}

/// Float attribute layout: (location, components) in interleaved order
type Layout = &'static [(u32, i32)];

const POSITION_NORMAL: Layout = &[(0, 3), (1, 3)];
const POSITION: Layout = &[(0, 3)];
const POSITION_SCALE: Layout = &[(0, 3), (1, 1)];

fn mesh_vertices(mesh: &Mesh) -> Vec<f32> {
    let mut data = Vec::with_capacity(mesh.triangle_count() * 18);
    for triangle in &mesh.triangles {
        for vertex in &triangle.vertices {
            data.extend_from_slice(&[
                vertex.position.x,
                vertex.position.y,
                vertex.position.z,
                vertex.normal.x,
                vertex.normal.y,
                vertex.normal.z,
            ]);
        }
    }
    data
}

fn line_vertices(lines: &LineSet) -> Vec<f32> {
    lines
        .segments
        .iter()
        .flat_map(|segment| segment.iter())
        .flat_map(|p| [p.x, p.y, p.z])
        .collect()
}

fn star_vertices(stars: &StarField) -> Vec<f32> {
    stars
        .stars()
        .iter()
        .flat_map(|star| [star.position.x, star.position.y, star.position.z, star.scale])
        .collect()
}

/// Which built-in or custom program draws a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ProgramKey {
    Lit,
    Unlit,
    Points,
    Custom(ShaderSource),
}

fn program_key(node: &SceneNode) -> ProgramKey {
    match (&node.geometry, &node.material.shading) {
        (_, Shading::Program { source, .. }) => ProgramKey::Custom(*source),
        (Geometry::Points(_), _) => ProgramKey::Points,
        (Geometry::Lines(_), _) | (_, Shading::Unlit) => ProgramKey::Unlit,
        (Geometry::Mesh(_), _) if node.material.wireframe => ProgramKey::Unlit,
        (Geometry::Mesh(_), _) => ProgramKey::Lit,
    }
}

/// Renders a [`HeroScene`] into a canvas through WebGL2
pub struct GlRenderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    programs: HashMap<ProgramKey, WebGlProgram>,
    geometry: HashMap<NodeId, GpuGeometry>,
    size: (u32, u32),
    pixel_ratio: f64,
}

impl GlRenderer {
    pub fn new(canvas: HtmlCanvasElement, pixel_ratio: f64) -> WebResult<Self> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"antialias".into(), &JsValue::TRUE)?;
        js_sys::Reflect::set(&options, &"alpha".into(), &JsValue::TRUE)?;

        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or(WebError::WebGlUnavailable)?
            .dyn_into()
            .map_err(|_| WebError::WebGlUnavailable)?;

        let mut programs = HashMap::new();
        programs.insert(ProgramKey::Lit, link_program(&gl, &shaders::LIT)?);
        programs.insert(ProgramKey::Unlit, link_program(&gl, &shaders::UNLIT)?);
        programs.insert(ProgramKey::Points, link_program(&gl, &shaders::POINTS)?);

        gl.enable(GL::DEPTH_TEST);
        gl.depth_func(GL::LEQUAL);
        gl.front_face(GL::CCW);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);

        Ok(Self {
            canvas,
            gl,
            programs,
            geometry: HashMap::new(),
            size: (0, 0),
            pixel_ratio,
        })
    }

    fn upload(&self, data: &[f32], layout: Layout, mode: u32) -> WebResult<GpuGeometry> {
        let gl = &self.gl;
        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| WebError::Js("could not create vertex array".to_string()))?;
        let vbo = gl
            .create_buffer()
            .ok_or_else(|| WebError::Js("could not create buffer".to_string()))?;

        gl.bind_vertex_array(Some(&vao));
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vbo));
        let array = js_sys::Float32Array::from(data);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);

        let floats: i32 = layout.iter().map(|(_, n)| n).sum();
        let stride = floats * 4;
        let mut offset = 0;
        for &(location, components) in layout {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_with_i32(location, components, GL::FLOAT, false, stride, offset);
            offset += components * 4;
        }
        gl.bind_vertex_array(None);

        Ok(GpuGeometry {
            vao,
            mode,
            count: data.len() as i32 / floats,
        })
    }

    fn ensure_geometry(&mut self, node: &SceneNode) -> WebResult<()> {
        if self.geometry.contains_key(&node.id) {
            return Ok(());
        }
        let gpu = match &node.geometry {
            Geometry::Mesh(mesh) if node.material.wireframe => {
                self.upload(&line_vertices(&LineSet::wireframe(mesh)), POSITION, GL::LINES)?
            }
            Geometry::Mesh(mesh) => self.upload(&mesh_vertices(mesh), POSITION_NORMAL, GL::TRIANGLES)?,
            Geometry::Lines(lines) => self.upload(&line_vertices(lines), POSITION, GL::LINES)?,
            Geometry::Points(stars) => self.upload(&star_vertices(stars), POSITION_SCALE, GL::POINTS)?,
        };
        log::debug!("uploaded {} ({} vertices)", node.id.name(), gpu.count);
        self.geometry.insert(node.id, gpu);
        Ok(())
    }

    fn ensure_program(&mut self, key: ProgramKey) -> WebResult<()> {
        if let (ProgramKey::Custom(source), false) = (key, self.programs.contains_key(&key)) {
            let program = link_program(&self.gl, &source)?;
            self.programs.insert(key, program);
        }
        Ok(())
    }

    fn apply_blending(&self, material: &Material) {
        let gl = &self.gl;
        if !material.transparent {
            gl.disable(GL::BLEND);
        } else {
            gl.enable(GL::BLEND);
            match material.blending {
                Blending::Normal => gl.blend_func_separate(
                    GL::SRC_ALPHA,
                    GL::ONE_MINUS_SRC_ALPHA,
                    GL::ONE,
                    GL::ONE_MINUS_SRC_ALPHA,
                ),
                Blending::Additive => gl.blend_func(GL::SRC_ALPHA, GL::ONE),
            }
        }
        gl.depth_mask(material.depth_write);
    }

    fn apply_side(&self, material: &Material) {
        if material.culls_back() {
            self.gl.enable(GL::CULL_FACE);
            self.gl.cull_face(GL::BACK);
        } else {
            self.gl.disable(GL::CULL_FACE);
        }
    }

    fn draw_node(&mut self, scene: &HeroScene, node: &SceneNode, camera: &Camera) -> WebResult<()> {
        let key = program_key(node);
        self.ensure_program(key)?;
        self.ensure_geometry(node)?;

        let (Some(program), Some(gpu)) = (self.programs.get(&key), self.geometry.get(&node.id)) else {
            return Ok(());
        };
        let gl = &self.gl;
        gl.use_program(Some(program));
        self.apply_blending(&node.material);
        self.apply_side(&node.material);

        let model = scene.world_matrix(node.id);
        let view = camera.view_matrix();
        let u = |name: &str| gl.get_uniform_location(program, name);

        set_matrix(gl, u("projectionMatrix"), &camera.projection_matrix());
        let material = &node.material;
        match &material.shading {
            Shading::Program { time, .. } => {
                set_matrix(gl, u("modelViewMatrix"), &(view * model));
                gl.uniform1f(u(TIME_UNIFORM).as_ref(), *time);
            }
            Shading::Points {
                size,
                size_attenuation,
            } => {
                set_matrix(gl, u("modelViewMatrix"), &(view * model));
                set_common(gl, program, scene, material);
                gl.uniform1f(u("uSize").as_ref(), *size);
                gl.uniform1f(
                    u("uScale").as_ref(),
                    gl.drawing_buffer_height() as f32 * 0.5,
                );
                gl.uniform1i(u("uSizeAttenuation").as_ref(), *size_attenuation as i32);
            }
            Shading::Standard {
                emissive,
                emissive_intensity,
                ..
            } if key == ProgramKey::Unlit => {
                // Wireframe standard materials draw as glowing lines
                set_matrix(gl, u("modelViewMatrix"), &(view * model));
                set_common(gl, program, scene, material);
                let glow = material.color.scaled(0.5);
                let emissive = emissive.scaled(*emissive_intensity);
                gl.uniform3f(
                    u("uColor").as_ref(),
                    glow.r + emissive.r,
                    glow.g + emissive.g,
                    glow.b + emissive.b,
                );
            }
            Shading::Physical { .. } if key == ProgramKey::Unlit => {
                set_matrix(gl, u("modelViewMatrix"), &(view * model));
                set_common(gl, program, scene, material);
            }
            Shading::Standard {
                metalness,
                roughness,
                emissive,
                emissive_intensity,
            } => {
                set_lit(gl, program, scene, camera, &model, &view);
                set_common(gl, program, scene, material);
                let emissive = emissive.scaled(*emissive_intensity);
                gl.uniform3f(u("uEmissive").as_ref(), emissive.r, emissive.g, emissive.b);
                gl.uniform1f(u("uMetalness").as_ref(), *metalness);
                gl.uniform1f(u("uRoughness").as_ref(), *roughness);
                gl.uniform1f(u("uReflectivity").as_ref(), 0.5);
                gl.uniform1f(u("uTransmission").as_ref(), 0.0);
            }
            Shading::Physical {
                roughness,
                reflectivity,
                transmission,
                ..
            } => {
                set_lit(gl, program, scene, camera, &model, &view);
                set_common(gl, program, scene, material);
                gl.uniform3f(u("uEmissive").as_ref(), 0.0, 0.0, 0.0);
                gl.uniform1f(u("uMetalness").as_ref(), 0.0);
                gl.uniform1f(u("uRoughness").as_ref(), *roughness);
                gl.uniform1f(u("uReflectivity").as_ref(), *reflectivity);
                gl.uniform1f(u("uTransmission").as_ref(), *transmission);
            }
            Shading::Unlit => {
                set_matrix(gl, u("modelViewMatrix"), &(view * model));
                set_common(gl, program, scene, material);
            }
        }

        gl.bind_vertex_array(Some(&gpu.vao));
        gl.draw_arrays(gpu.mode, 0, gpu.count);
        gl.bind_vertex_array(None);
        Ok(())
    }
}

fn set_matrix(gl: &GL, location: Option<WebGlUniformLocation>, matrix: &Matrix4<f32>) {
    gl.uniform_matrix4fv_with_f32_array(location.as_ref(), false, matrix.as_slice());
}

/// Color, opacity and fog, shared by every built-in program
fn set_common(gl: &GL, program: &WebGlProgram, scene: &HeroScene, material: &Material) {
    let u = |name: &str| gl.get_uniform_location(program, name);
    let color = material.color;
    gl.uniform3f(u("uColor").as_ref(), color.r, color.g, color.b);
    gl.uniform1f(u("uOpacity").as_ref(), material.opacity);
    let fog = scene.fog.color;
    gl.uniform3f(u("uFogColor").as_ref(), fog.r, fog.g, fog.b);
    gl.uniform1f(u("uFogDensity").as_ref(), scene.fog.density);
}

fn set_lit(
    gl: &GL,
    program: &WebGlProgram,
    scene: &HeroScene,
    camera: &Camera,
    model: &Matrix4<f32>,
    view: &Matrix4<f32>,
) {
    let u = |name: &str| gl.get_uniform_location(program, name);
    set_matrix(gl, u("modelMatrix"), model);
    set_matrix(gl, u("viewMatrix"), view);

    let eye = camera.position;
    gl.uniform3f(u("uCameraPos").as_ref(), eye.x, eye.y, eye.z);

    let ambient = scene.ambient.color.scaled(scene.ambient.intensity);
    gl.uniform3f(u("uAmbient").as_ref(), ambient.r, ambient.g, ambient.b);

    let positions = scene.light_rig.world_positions();
    let lights = &scene.light_rig.lights;
    let pos: Vec<f32> = positions.iter().flat_map(|p| [p.x, p.y, p.z]).collect();
    let colors: Vec<f32> = lights
        .iter()
        .flat_map(|light| light.color.scaled(light.intensity).to_array())
        .collect();
    let distances: Vec<f32> = lights.iter().map(|light| light.distance).collect();
    gl.uniform3fv_with_f32_array(u("uLightPos").as_ref(), &pos);
    gl.uniform3fv_with_f32_array(u("uLightColor").as_ref(), &colors);
    gl.uniform1fv_with_f32_array(u("uLightDistance").as_ref(), &distances);
}

impl SceneRenderer for GlRenderer {
    type Error = WebError;

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        let buffer_width = (width as f64 * self.pixel_ratio).round() as u32;
        let buffer_height = (height as f64 * self.pixel_ratio).round() as u32;
        self.canvas.set_width(buffer_width);
        self.canvas.set_height(buffer_height);

        let style = self.canvas.style();
        if style.set_property("width", &format!("{width}px")).is_err()
            || style.set_property("height", &format!("{height}px")).is_err()
        {
            log::warn!("could not set canvas css size");
        }
        self.gl
            .viewport(0, 0, buffer_width as i32, buffer_height as i32);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn render(&mut self, scene: &HeroScene, camera: &Camera) -> WebResult<()> {
        if self.gl.is_context_lost() {
            return Err(WebError::WebGlUnavailable);
        }

        self.gl.depth_mask(true);
        self.gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        // Opaque first, then transparent in node order
        let (opaque, transparent): (Vec<_>, Vec<_>) = scene
            .nodes()
            .iter()
            .partition(|node| !node.material.transparent);
        for node in opaque.into_iter().chain(transparent) {
            self.draw_node(scene, node, camera)?;
        }
        Ok(())
    }
}
