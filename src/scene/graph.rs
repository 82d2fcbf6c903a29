use glam::{EulerRot, Mat4, Quat, Vec3};

use super::geometry::Geometry;
use super::material::Material;

/// Stable handle to a node; indices are never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles (XYZ order), radians
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Linear RGB
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Light {
    pub fn radiance(&self) -> Vec3 {
        Vec3::from_array(self.color) * self.intensity
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Mesh(Mesh),
    AmbientLight(Light),
    /// Shines from the node position towards the origin
    DirectionalLight(Light),
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub visible: bool,
    pub transform: Transform,
    /// Per-frame rotation increment about Y, radians
    pub spin: f32,
}

impl Node {
    fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visible: true,
            transform: Transform::default(),
            spin: 0.0,
        }
    }

    pub fn mesh(name: impl Into<String>, geometry: Geometry, material: Material) -> Self {
        Self::new(name, NodeKind::Mesh(Mesh { geometry, material }))
    }

    pub fn ambient_light(name: impl Into<String>, color: [f32; 3], intensity: f32) -> Self {
        Self::new(name, NodeKind::AmbientLight(Light { color, intensity }))
    }

    pub fn directional_light(name: impl Into<String>, color: [f32; 3], intensity: f32) -> Self {
        Self::new(name, NodeKind::DirectionalLight(Light { color, intensity }))
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn with_spin(mut self, spin: f32) -> Self {
        self.spin = spin;
        self
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match &self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut Mesh> {
        match &mut self.kind {
            NodeKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_light_mut(&mut self) -> Option<&mut Light> {
        match &mut self.kind {
            NodeKind::AmbientLight(light) | NodeKind::DirectionalLight(light) => Some(light),
            NodeKind::Mesh(_) => None,
        }
    }
}

/// Ordered set of scene nodes. Removal leaves a hole so ids stay valid.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Option<Node>>,
    pub background: [f32; 3],
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.get_mut(id.0).and_then(Option::take)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.iter().find(|(_, node)| node.name == name).map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, node)| node.as_ref().map(|n| (NodeId(i), n)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut Node)> {
        self.nodes
            .iter_mut()
            .enumerate()
            .filter_map(|(i, node)| node.as_mut().map(|n| (NodeId(i), n)))
    }

    /// Mesh nodes in scene order, hidden ones included
    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &Node, &Mesh)> {
        self.iter()
            .filter_map(|(id, node)| node.as_mesh().map(|mesh| (id, node, mesh)))
    }

    /// Summed radiance of all visible ambient lights
    pub fn ambient(&self) -> Vec3 {
        self.iter()
            .filter(|(_, node)| node.visible)
            .filter_map(|(_, node)| match &node.kind {
                NodeKind::AmbientLight(light) => Some(light.radiance()),
                _ => None,
            })
            .sum()
    }

    /// First visible directional light: (direction towards the light, radiance)
    pub fn sun(&self) -> Option<(Vec3, Vec3)> {
        self.iter()
            .filter(|(_, node)| node.visible)
            .find_map(|(_, node)| match &node.kind {
                NodeKind::DirectionalLight(light) => Some((
                    node.transform.position.normalize_or_zero(),
                    light.radiance(),
                )),
                _ => None,
            })
    }

    /// Advance every node's Y rotation by its spin
    pub fn advance_rotations(&mut self) {
        for (_, node) in self.iter_mut() {
            node.transform.rotation.y += node.spin;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Node {
        Node::mesh("cube", Geometry::cuboid(1.0, 1.0, 1.0), Material::basic())
    }

    #[test]
    fn removal_keeps_other_ids_valid() {
        let mut scene = SceneGraph::new();
        let a = scene.add(cube());
        let b = scene.add(Node::ambient_light("ambient", [1.0; 3], 0.4));

        assert!(scene.remove(a).is_some());
        assert!(scene.node(a).is_none());
        assert_eq!(scene.node(b).map(|n| n.name.as_str()), Some("ambient"));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn ambient_sums_visible_lights() {
        let mut scene = SceneGraph::new();
        scene.add(Node::ambient_light("a", [1.0; 3], 0.25));
        let hidden = scene.add(Node::ambient_light("b", [1.0; 3], 0.5));
        if let Some(node) = scene.node_mut(hidden) {
            node.visible = false;
        }

        assert_eq!(scene.ambient(), Vec3::splat(0.25));
    }

    #[test]
    fn sun_direction_points_at_light() {
        let mut scene = SceneGraph::new();
        scene.add(
            Node::directional_light("sun", [1.0; 3], 2.0).with_position(Vec3::new(0.0, 10.0, 0.0)),
        );

        let (direction, radiance) = scene.sun().unwrap();
        assert_eq!(direction, Vec3::Y);
        assert_eq!(radiance, Vec3::splat(2.0));
    }

    #[test]
    fn advance_applies_spin_only_about_y() {
        let mut scene = SceneGraph::new();
        let id = scene.add(cube().with_spin(0.5));
        scene.advance_rotations();
        scene.advance_rotations();

        let rotation = scene.node(id).unwrap().transform.rotation;
        assert_eq!(rotation, Vec3::new(0.0, 1.0, 0.0));
    }
}
