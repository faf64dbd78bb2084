pub mod geometry;
pub mod primitives;

pub use geometry::{Mesh, Vertex};
pub use primitives::{cube, uv_sphere};
