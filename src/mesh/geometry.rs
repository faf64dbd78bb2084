use crate::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }

    /// Layout: position(3) + normal(3) = 6 floats
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.position.x, self.position.y, self.position.z,
            self.normal.x, self.normal.y, self.normal.z,
        ]
    }
}

/// Indexed triangle mesh shared by every instance of an ornament kind.
/// Indices are u16, so a mesh holds at most `MAX_VERTICES` vertices.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

    /// Append a vertex and return its index
    pub fn push_vertex(&mut self, vertex: Vertex) -> u16 {
        debug_assert!(
            self.vertices.len() < Self::MAX_VERTICES,
            "mesh exceeds {} vertices",
            Self::MAX_VERTICES
        );
        self.vertices.push(vertex);
        (self.vertices.len() - 1) as u16
    }

    pub fn add_triangle(&mut self, a: u16, b: u16, c: u16) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Two triangles, counter-clockwise
    pub fn add_quad(&mut self, a: u16, b: u16, c: u16, d: u16) {
        self.add_triangle(a, b, c);
        self.add_triangle(a, c, d);
    }

    pub fn vertex_data(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    pub fn index_data(&self) -> &[u16] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_is_two_triangles() {
        let mut mesh = Mesh::new();
        let ids: Vec<u16> = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .iter()
            .map(|&(x, y)| mesh.push_vertex(Vertex::new(Vec3::new(x, y, 0.0), Vec3::new(0.0, 0.0, 1.0))))
            .collect();
        mesh.add_quad(ids[0], ids[1], ids[2], ids[3]);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.index_data(), &[0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertex_data().len(), 4 * 6);
    }

    #[test]
    fn test_last_addressable_vertex() {
        let mut mesh = Mesh::new();
        let mut last = 0;
        for _ in 0..Mesh::MAX_VERTICES {
            last = mesh.push_vertex(Vertex::new(Vec3::ZERO, Vec3::UP));
        }
        assert_eq!(last, u16::MAX);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "mesh exceeds")]
    fn test_overflowing_u16_indices_panics() {
        let mut mesh = Mesh::new();
        for _ in 0..=Mesh::MAX_VERTICES {
            mesh.push_vertex(Vertex::new(Vec3::ZERO, Vec3::UP));
        }
    }
}
