use glam::Vec3;

use super::{intensity_setter, opacity_setter, spin_setter, visibility_setter};
use super::{SceneSetup, TextureRequest};
use crate::params::ParamSpec;
use crate::scene::{srgb_hex, Geometry, MapSlot, Material, Node, SceneGraph, Side};
use crate::textures::TextureRole;

pub const EARTH: &str = "earth";
pub const CLOUDS: &str = "clouds";
pub const ATMOSPHERE: &str = "atmosphere";
pub const SUN: &str = "sun";

const SEGMENTS: u32 = 64;

pub const EARTH_PARAMS: [ParamSpec; 6] = [
    ParamSpec::float("earthRotation", "Earth Rotation", 0.0, 0.05, 0.001, 0.01),
    ParamSpec::float("cloudRotation", "Cloud Rotation", 0.0, 0.05, 0.001, 0.015),
    ParamSpec::float("cloudOpacity", "Cloud Opacity", 0.0, 1.0, 0.01, 0.5),
    ParamSpec::toggle("cloudsVisible", "Show Clouds", true),
    ParamSpec::float("sunIntensity", "Sun Intensity", 0.0, 5.0, 0.1, 2.0),
    ParamSpec::float("atmosphereOpacity", "Atmosphere Opacity", 0.0, 1.0, 0.01, 0.15),
];

/// Earth with cloud and atmosphere shells, lit by an ambient term and a sun
pub fn create_earth_scene() -> SceneSetup {
    let white = srgb_hex(0xffffff);
    let mut scene = SceneGraph::new();

    scene.add(Node::ambient_light("ambient", white, 0.4));
    let sun = scene.add(
        Node::directional_light(SUN, white, 2.0).with_position(Vec3::new(5.0, 3.0, 5.0)),
    );

    let earth = scene.add(Node::mesh(
        EARTH,
        Geometry::sphere(1.0, SEGMENTS, SEGMENTS),
        Material::phong(srgb_hex(0x333333), 15.0),
    ));

    let clouds = scene.add(Node::mesh(
        CLOUDS,
        Geometry::sphere(1.03, SEGMENTS, SEGMENTS),
        Material::lambert().with_opacity(0.5).with_depth_write(false),
    ));

    let atmosphere = scene.add(Node::mesh(
        ATMOSPHERE,
        Geometry::sphere(1.05, SEGMENTS, SEGMENTS),
        Material::basic()
            .with_color(srgb_hex(0x4da6ff))
            .with_opacity(0.15)
            .with_side(Side::Back),
    ));

    let textures = vec![
        TextureRequest { node: earth, slot: MapSlot::Color, role: TextureRole::EarthDay },
        TextureRequest { node: earth, slot: MapSlot::Normal, role: TextureRole::EarthNormal },
        TextureRequest { node: earth, slot: MapSlot::Specular, role: TextureRole::EarthSpecular },
        TextureRequest { node: clouds, slot: MapSlot::Color, role: TextureRole::EarthClouds },
    ];

    SceneSetup {
        scene,
        params: EARTH_PARAMS.to_vec(),
        bindings: vec![
            ("earthRotation", spin_setter(earth)),
            ("cloudRotation", spin_setter(clouds)),
            ("cloudOpacity", opacity_setter(clouds)),
            ("cloudsVisible", visibility_setter(clouds)),
            ("sunIntensity", intensity_setter(sun)),
            ("atmosphereOpacity", opacity_setter(atmosphere)),
        ],
        textures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{NodeKind, Shading};

    #[test]
    fn shells_are_concentric_and_growing() {
        let setup = create_earth_scene();
        let radius = |name: &str| {
            let id = setup.scene.find(name).unwrap();
            match setup.scene.node(id).unwrap().as_mesh().unwrap().geometry {
                Geometry::Sphere { radius, .. } => radius,
                other => panic!("unexpected geometry {:?}", other),
            }
        };

        assert_eq!(radius(EARTH), 1.0);
        assert_eq!(radius(CLOUDS), 1.03);
        assert_eq!(radius(ATMOSPHERE), 1.05);
    }

    #[test]
    fn materials_match_their_roles() {
        let setup = create_earth_scene();
        let material = |name: &str| {
            let id = setup.scene.find(name).unwrap();
            setup.scene.node(id).unwrap().as_mesh().unwrap().material.clone()
        };

        assert!(matches!(material(EARTH).shading, Shading::Phong { shininess, .. } if shininess == 15.0));
        assert!(!material(EARTH).transparent);

        let clouds = material(CLOUDS);
        assert_eq!(clouds.shading, Shading::Lambert);
        assert!(clouds.transparent && !clouds.depth_write);

        let atmosphere = material(ATMOSPHERE);
        assert_eq!(atmosphere.shading, Shading::Basic);
        assert_eq!(atmosphere.side, Side::Back);
    }

    #[test]
    fn every_param_has_a_binding() {
        let setup = create_earth_scene();
        for spec in &setup.params {
            assert!(
                setup.bindings.iter().any(|(name, _)| *name == spec.name),
                "{} is unbound",
                spec.name
            );
        }
    }

    #[test]
    fn scene_has_ambient_and_sun() {
        let setup = create_earth_scene();
        let lights = setup
            .scene
            .iter()
            .filter(|(_, n)| matches!(n.kind, NodeKind::AmbientLight(_) | NodeKind::DirectionalLight(_)))
            .count();
        assert_eq!(lights, 2);
        assert_eq!(setup.textures.len(), 4);
    }
}
