pub mod geometry;
pub mod graph;
pub mod material;

pub use geometry::{Geometry, MeshData};
pub use graph::{Light, Mesh, Node, NodeId, NodeKind, SceneGraph, Transform};
pub use material::{srgb_hex, MapSlot, Material, Shading, Side, TextureState};
