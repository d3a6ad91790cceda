/// Built-in GLSL ES 3.00 programs for the material kinds
use hero3d_core::shader::ShaderSource;

/// Standard and physical materials: three point lights, ambient, emissive, fog
pub const LIT: ShaderSource = ShaderSource {
    vertex: r#"#version 300 es
precision highp float;
layout(location = 0) in vec3 position;
layout(location = 1) in vec3 normal;
uniform mat4 modelMatrix;
uniform mat4 viewMatrix;
uniform mat4 projectionMatrix;
out vec3 vWorldPos;
out vec3 vNormal;
out float vViewDepth;
void main() {
    vec4 world = modelMatrix * vec4(position, 1.0);
    vWorldPos = world.xyz;
    vNormal = mat3(modelMatrix) * normal;
    vec4 view = viewMatrix * world;
    vViewDepth = -view.z;
    gl_Position = projectionMatrix * view;
}
"#,
    fragment: r#"#version 300 es
precision highp float;
uniform vec3 uColor;
uniform float uOpacity;
uniform vec3 uEmissive;
uniform float uMetalness;
uniform float uRoughness;
uniform float uReflectivity;
uniform float uTransmission;
uniform vec3 uAmbient;
uniform vec3 uLightPos[3];
uniform vec3 uLightColor[3];
uniform float uLightDistance[3];
uniform vec3 uCameraPos;
uniform vec3 uFogColor;
uniform float uFogDensity;
in vec3 vWorldPos;
in vec3 vNormal;
in float vViewDepth;
out vec4 fragColor;
void main() {
    vec3 n = normalize(vNormal);
    if (!gl_FrontFacing) n = -n;
    vec3 v = normalize(uCameraPos - vWorldPos);

    vec3 diffuseColor = uColor * (1.0 - uMetalness) * (1.0 - 0.5 * uTransmission);
    vec3 specularColor = mix(vec3(0.04 + 0.12 * uReflectivity), uColor, uMetalness);
    float shininess = 2.0 / max(uRoughness * uRoughness, 0.02);

    vec3 color = uAmbient * diffuseColor;
    for (int i = 0; i < 3; i++) {
        vec3 toLight = uLightPos[i] - vWorldPos;
        float d = length(toLight);
        vec3 l = toLight / max(d, 1e-4);
        float falloff = clamp(1.0 - d / uLightDistance[i], 0.0, 1.0);
        float attenuation = falloff * falloff;
        float lambert = max(dot(n, l), 0.0);
        vec3 h = normalize(l + v);
        float specular = pow(max(dot(n, h), 0.0), shininess) * (1.0 - uRoughness);
        color += uLightColor[i] * attenuation * (diffuseColor * lambert + specularColor * specular);
    }
    color += uEmissive;

    float fog = 1.0 - exp(-uFogDensity * uFogDensity * vViewDepth * vViewDepth);
    fragColor = vec4(mix(color, uFogColor, fog), uOpacity);
}
"#,
};

/// Flat color for lines, wireframes and unlit meshes
pub const UNLIT: ShaderSource = ShaderSource {
    vertex: r#"#version 300 es
precision highp float;
layout(location = 0) in vec3 position;
uniform mat4 modelViewMatrix;
uniform mat4 projectionMatrix;
out float vViewDepth;
void main() {
    vec4 mvPosition = modelViewMatrix * vec4(position, 1.0);
    vViewDepth = -mvPosition.z;
    gl_Position = projectionMatrix * mvPosition;
}
"#,
    fragment: r#"#version 300 es
precision highp float;
uniform vec3 uColor;
uniform float uOpacity;
uniform vec3 uFogColor;
uniform float uFogDensity;
in float vViewDepth;
out vec4 fragColor;
void main() {
    float fog = 1.0 - exp(-uFogDensity * uFogDensity * vViewDepth * vViewDepth);
    fragColor = vec4(mix(uColor, uFogColor, fog), uOpacity);
}
"#,
};

/// Round points; `scale` per star multiplies the material size
pub const POINTS: ShaderSource = ShaderSource {
    vertex: r#"#version 300 es
precision highp float;
layout(location = 0) in vec3 position;
layout(location = 1) in float scale;
uniform mat4 modelViewMatrix;
uniform mat4 projectionMatrix;
uniform float uSize;
uniform float uScale;
uniform bool uSizeAttenuation;
out float vViewDepth;
void main() {
    vec4 mvPosition = modelViewMatrix * vec4(position, 1.0);
    vViewDepth = -mvPosition.z;
    float size = uSize * scale;
    if (uSizeAttenuation) size *= uScale / -mvPosition.z;
    gl_PointSize = max(size, 1.0);
    gl_Position = projectionMatrix * mvPosition;
}
"#,
    fragment: r#"#version 300 es
precision highp float;
uniform vec3 uColor;
uniform float uOpacity;
uniform vec3 uFogColor;
uniform float uFogDensity;
in float vViewDepth;
out vec4 fragColor;
void main() {
    if (length(gl_PointCoord - vec2(0.5)) > 0.5) discard;
    float fog = 1.0 - exp(-uFogDensity * uFogDensity * vViewDepth * vViewDepth);
    fragColor = vec4(mix(uColor, uFogColor, fog), uOpacity);
}
"#,
};
