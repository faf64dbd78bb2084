//! Unit-sized ornament shapes; instance matrices supply the final scale

use std::f32::consts::{PI, TAU};

use super::geometry::{Mesh, Vertex};
use crate::math::Vec3;

/// Latitude/longitude sphere, used for balls and lights
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Mesh {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut mesh = Mesh::new();

    for ring in 0..=rings {
        let phi = ring as f32 / rings as f32 * PI;
        for seg in 0..=segments {
            let theta = seg as f32 / segments as f32 * TAU;
            let normal = Vec3::from_spherical(theta, phi);
            mesh.push_vertex(Vertex::new(normal.scale(radius), normal));
        }
    }

    let stride = (segments + 1) as u16;
    for ring in 0..rings as u16 {
        for seg in 0..segments as u16 {
            let a = ring * stride + seg;
            let b = a + stride;
            mesh.add_quad(a, a + 1, b + 1, b);
        }
    }
    mesh
}

/// Axis-aligned box with flat per-face normals, used for gifts
pub fn cube(size: f32) -> Mesh {
    let h = size * 0.5;
    let faces = [
        (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
        (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
        (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
    ];

    let mut mesh = Mesh::new();
    for (normal, u, v) in faces {
        let center = normal.scale(h);
        let corner = |su: f32, sv: f32| center + u.scale(su * h) + v.scale(sv * h);
        let a = mesh.push_vertex(Vertex::new(corner(-1.0, -1.0), normal));
        let b = mesh.push_vertex(Vertex::new(corner(1.0, -1.0), normal));
        let c = mesh.push_vertex(Vertex::new(corner(1.0, 1.0), normal));
        let d = mesh.push_vertex(Vertex::new(corner(-1.0, 1.0), normal));
        mesh.add_quad(a, b, c, d);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(mesh: &Mesh, tri: usize) -> Vec3 {
        let i = &mesh.indices[tri * 3..tri * 3 + 3];
        let p = |k: usize| mesh.vertices[i[k] as usize].position;
        (p(1) - p(0)).cross(&(p(2) - p(0))).normalize()
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let mesh = uv_sphere(2.0, 16, 8);
        assert_eq!(mesh.vertex_count(), 17 * 9);
        assert_eq!(mesh.triangle_count(), 16 * 8 * 2);
        for v in &mesh.vertices {
            assert!((v.position.length() - 2.0).abs() < 0.001);
            assert!((v.normal.length() - 1.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_sphere_winds_outward() {
        let mesh = uv_sphere(1.0, 12, 6);
        for tri in 0..mesh.triangle_count() {
            let i = &mesh.indices[tri * 3..tri * 3 + 3];
            let p = |k: usize| mesh.vertices[i[k] as usize].position;
            let area = (p(1) - p(0)).cross(&(p(2) - p(0))).length();
            if area < 1e-6 {
                continue; // collapsed at a pole
            }
            let centroid = (p(0) + p(1) + p(2)).scale(1.0 / 3.0);
            assert!(face_normal(&mesh, tri).dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_sphere_indices_in_range() {
        let mesh = uv_sphere(1.0, 3, 1);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_cube_faces_wind_outward() {
        let mesh = cube(1.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        for tri in 0..mesh.triangle_count() {
            let normal = mesh.vertices[mesh.indices[tri * 3] as usize].normal;
            assert!(face_normal(&mesh, tri).dot(&normal) > 0.99);
        }
        for v in &mesh.vertices {
            for c in v.position.to_array() {
                assert!((c.abs() - 0.5).abs() < 0.001);
            }
        }
    }
}
