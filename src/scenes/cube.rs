use glam::Vec3;

use super::{intensity_setter, spin_setter, SceneSetup};
use crate::params::ParamSpec;
use crate::scene::{srgb_hex, Geometry, Material, Node, SceneGraph};

pub const CUBE: &str = "cube";

pub const CUBE_PARAMS: [ParamSpec; 2] = [
    ParamSpec::float("earthRotation", "Rotation Speed", 0.0, 0.05, 0.001, 0.01),
    ParamSpec::float("sunIntensity", "Sun Intensity", 0.0, 5.0, 0.1, 2.0),
];

/// Single lit cube; no textures
pub fn create_cube_scene() -> SceneSetup {
    let white = srgb_hex(0xffffff);
    let mut scene = SceneGraph::new();

    scene.add(Node::ambient_light("ambient", white, 0.4));
    let sun = scene.add(
        Node::directional_light("sun", white, 2.0).with_position(Vec3::new(5.0, 3.0, 5.0)),
    );
    let cube = scene.add(Node::mesh(
        CUBE,
        Geometry::cuboid(1.0, 1.0, 1.0),
        Material::phong(srgb_hex(0x111111), 30.0).with_color(srgb_hex(0x44aa88)),
    ));

    SceneSetup {
        scene,
        params: CUBE_PARAMS.to_vec(),
        bindings: vec![
            ("earthRotation", spin_setter(cube)),
            ("sunIntensity", intensity_setter(sun)),
        ],
        textures: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shading;

    #[test]
    fn cube_has_a_dim_phong_highlight() {
        let setup = create_cube_scene();
        let id = setup.scene.find(CUBE).unwrap();
        let material = &setup.scene.node(id).unwrap().as_mesh().unwrap().material;

        assert_eq!(
            material.shading,
            Shading::Phong {
                specular: srgb_hex(0x111111),
                shininess: 30.0
            }
        );
        assert_eq!(material.color, srgb_hex(0x44aa88));
    }
}
