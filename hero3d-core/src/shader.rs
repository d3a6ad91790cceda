/// Shader program sources carried by scene materials
use nalgebra::Point3;

pub const HALO_RADIUS: f32 = 4.2;

/// Name of the float uniform that receives elapsed seconds
pub const TIME_UNIFORM: &str = "uTime";

/// Vertex + fragment source pair (GLSL ES 3.00).
///
/// Programs get `position` at attribute location 0 and the
/// `modelViewMatrix` / `projectionMatrix` uniforms from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderSource {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

pub const HALO_SHADER: ShaderSource = ShaderSource {
    vertex: r#"#version 300 es
precision highp float;
layout(location = 0) in vec3 position;
uniform mat4 modelViewMatrix;
uniform mat4 projectionMatrix;
out vec3 vPos;
void main() {
    vPos = position;
    vec4 mvPosition = modelViewMatrix * vec4(position, 1.0);
    gl_Position = projectionMatrix * mvPosition;
}
"#,
    fragment: r#"#version 300 es
precision highp float;
uniform float uTime;
in vec3 vPos;
out vec4 fragColor;
void main() {
    float falloff = max(0.8 - length(vPos) / 4.2, 0.0);
    float intensity = pow(falloff, 3.0);
    fragColor = vec4(0.45, 0.75, 1.0, intensity);
}
"#,
};

/// CPU mirror of the halo fragment alpha for a local-space position
pub fn glow_intensity(local: &Point3<f32>) -> f32 {
    (0.8 - local.coords.norm() / HALO_RADIUS).max(0.0).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glow_fades_with_distance() {
        let center = glow_intensity(&Point3::origin());
        let mid = glow_intensity(&Point3::new(1.5, 0.0, 0.0));
        assert!((center - 0.512).abs() < 1e-6);
        assert!(mid < center && mid > 0.0);
    }

    #[test]
    fn glow_is_zero_on_the_shell() {
        assert_eq!(glow_intensity(&Point3::new(0.0, HALO_RADIUS, 0.0)), 0.0);
    }

    #[test]
    fn halo_sources_declare_renderer_interface() {
        assert!(HALO_SHADER.vertex.contains("modelViewMatrix"));
        assert!(HALO_SHADER.vertex.contains("projectionMatrix"));
        assert!(HALO_SHADER.fragment.contains(TIME_UNIFORM));
        assert!(HALO_SHADER.vertex.starts_with("#version 300 es"));
        assert!(HALO_SHADER.fragment.starts_with("#version 300 es"));
    }
}
