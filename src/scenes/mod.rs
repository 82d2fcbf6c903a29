pub mod cube;
pub mod earth;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::params::{ParamSetter, ParamSpec, ParamValue};
use crate::scene::{MapSlot, NodeId, SceneGraph};
use crate::textures::TextureRole;

pub use cube::create_cube_scene;
pub use earth::create_earth_scene;

/// Which scene the composer builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Earth, clouds and atmosphere
    #[default]
    Full,
    /// A single lit cube
    Minimal,
}

/// Texture to load into a material slot once decoded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureRequest {
    pub node: NodeId,
    pub slot: MapSlot,
    pub role: TextureRole,
}

/// Everything the composer needs to bring a scene to life
pub struct SceneSetup {
    pub scene: SceneGraph,
    pub params: Vec<ParamSpec>,
    pub bindings: Vec<(&'static str, ParamSetter)>,
    pub textures: Vec<TextureRequest>,
}

pub fn create_scene(variant: Variant) -> SceneSetup {
    match variant {
        Variant::Full => create_earth_scene(),
        Variant::Minimal => create_cube_scene(),
    }
}

pub(crate) fn spin_setter(id: NodeId) -> ParamSetter {
    Box::new(move |scene: &mut SceneGraph, value: ParamValue| {
        if let (Some(node), Some(spin)) = (scene.node_mut(id), value.as_float()) {
            node.spin = spin;
        }
    })
}

pub(crate) fn opacity_setter(id: NodeId) -> ParamSetter {
    Box::new(move |scene: &mut SceneGraph, value: ParamValue| {
        let mesh = scene.node_mut(id).and_then(|node| node.as_mesh_mut());
        if let (Some(mesh), Some(opacity)) = (mesh, value.as_float()) {
            mesh.material.opacity = opacity;
        }
    })
}

pub(crate) fn visibility_setter(id: NodeId) -> ParamSetter {
    Box::new(move |scene: &mut SceneGraph, value: ParamValue| {
        if let (Some(node), Some(visible)) = (scene.node_mut(id), value.as_bool()) {
            node.visible = visible;
        }
    })
}

pub(crate) fn intensity_setter(id: NodeId) -> ParamSetter {
    Box::new(move |scene: &mut SceneGraph, value: ParamValue| {
        let light = scene.node_mut(id).and_then(|node| node.as_light_mut());
        if let (Some(light), Some(intensity)) = (light, value.as_float()) {
            light.intensity = intensity;
        }
    })
}
