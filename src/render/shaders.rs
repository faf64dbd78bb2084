//! GLSL ES 3.00 sources
//!
//! The foliage shaders are mirrored on the host by `foliage::FoliageModel`;
//! keep the constants in step when tuning either side.

/// Foliage points: staggered, eased blend from scattered to formed position
pub const FOLIAGE_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_chaos;
layout(location = 1) in vec3 a_target;
layout(location = 2) in float a_random;

uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_time;
uniform float u_progress;
uniform float u_point_size;
uniform float u_tree_height;

out vec3 v_color;

const float STAGGER = 0.25;
const float SWAY = 0.08;
const float TAU = 6.28318530718;
const vec3 DEEP_BLUE = vec3(0.02, 0.08, 0.32);
const vec3 LIGHT_BLUE = vec3(0.38, 0.66, 0.98);
const vec3 SPARKLE = vec3(1.0);

float ease_in_out_cubic(float t) {
    return t < 0.5 ? 4.0 * t * t * t : 1.0 - pow(-2.0 * t + 2.0, 3.0) / 2.0;
}

void main() {
    float t = clamp((u_progress - a_random * STAGGER) / (1.0 - STAGGER), 0.0, 1.0);
    float eased = ease_in_out_cubic(t);

    vec3 pos = mix(a_chaos, a_target, eased);
    float phase = u_time * 1.5 + a_random * TAU;
    pos.x += sin(phase) * SWAY * eased;
    pos.z += cos(phase) * SWAY * eased;

    float height_t = clamp(a_target.y / u_tree_height, 0.0, 1.0);
    vec3 base = mix(DEEP_BLUE, LIGHT_BLUE, clamp(height_t * 0.7 + a_random * 0.3, 0.0, 1.0));
    float twinkle = sin(u_time * 3.0 + a_random * 60.0);
    float sparkle = smoothstep(0.92, 1.0, twinkle) * (0.4 + 0.6 * eased);
    v_color = mix(base, SPARKLE, sparkle);

    vec4 view_pos = u_view * vec4(pos, 1.0);
    gl_Position = u_projection * view_pos;
    gl_PointSize = u_point_size * (0.6 + a_random * 0.8) * (30.0 / max(-view_pos.z, 0.1));
}
"#;

pub const FOLIAGE_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_color;

out vec4 fragColor;

void main() {
    float dist = length(gl_PointCoord - vec2(0.5));
    if (dist > 0.5) {
        discard;
    }
    float alpha = 1.0 - smoothstep(0.1, 0.5, dist);
    fragColor = vec4(v_color, alpha);
}
"#;

/// Instanced ornaments; the per-instance matrix occupies locations 2..=5
pub const ORNAMENT_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in mat4 a_model;
layout(location = 6) in vec3 a_color;

uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_world_position;
out vec3 v_normal;
out vec3 v_color;

void main() {
    vec4 world_pos = a_model * vec4(a_position, 1.0);
    v_world_position = world_pos.xyz;
    // instance scale is uniform, so the upper 3x3 is fine for normals
    v_normal = mat3(a_model) * a_normal;
    v_color = a_color;
    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Lambert plus rim light; `u_emissive` lifts lights toward full glow
pub const ORNAMENT_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_world_position;
in vec3 v_normal;
in vec3 v_color;

uniform vec3 u_camera_pos;
uniform float u_emissive;

out vec4 fragColor;

void main() {
    vec3 normal = normalize(v_normal);
    vec3 view_dir = normalize(u_camera_pos - v_world_position);

    vec3 light_dir = normalize(vec3(0.5, 1.0, 0.3));
    float ndotl = max(dot(normal, light_dir), 0.0);

    vec3 half_dir = normalize(light_dir + view_dir);
    float spec = pow(max(dot(normal, half_dir), 0.0), 32.0);
    float rim = pow(1.0 - max(dot(normal, view_dir), 0.0), 3.0);

    vec3 lit = v_color * (0.25 + 0.75 * ndotl) + vec3(spec * 0.5) + v_color * rim * 0.4;
    vec3 color = mix(lit, v_color * 1.5, u_emissive);

    // Tone mapping
    color = color / (color + vec3(1.0));
    color = pow(color, vec3(1.0 / 2.2));

    fragColor = vec4(color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foliage::STAGGER;

    #[test]
    fn test_shader_version() {
        for src in [
            FOLIAGE_VERTEX_SHADER,
            FOLIAGE_FRAGMENT_SHADER,
            ORNAMENT_VERTEX_SHADER,
            ORNAMENT_FRAGMENT_SHADER,
        ] {
            assert!(src.starts_with("#version 300 es"));
        }
    }

    #[test]
    fn test_foliage_constants_match_model() {
        assert!(FOLIAGE_VERTEX_SHADER.contains(&format!("const float STAGGER = {:?};", STAGGER)));
        assert!(FOLIAGE_VERTEX_SHADER.contains("uniform float u_progress;"));
        assert!(FOLIAGE_VERTEX_SHADER.contains("uniform float u_time;"));
    }

    #[test]
    fn test_instance_locations() {
        assert!(ORNAMENT_VERTEX_SHADER.contains("layout(location = 2) in mat4 a_model;"));
        assert!(ORNAMENT_VERTEX_SHADER.contains("layout(location = 6) in vec3 a_color;"));
    }
}
