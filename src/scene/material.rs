use std::sync::Arc;

use crate::textures::TextureData;

/// Lighting model used by the mesh shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Diffuse plus Blinn-Phong specular highlight
    Phong { specular: [f32; 3], shininess: f32 },
    /// Diffuse only
    Lambert,
    /// Unlit
    Basic,
}

/// Which faces get rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Front,
    Back,
    Double,
}

/// Texture slot on a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapSlot {
    Color,
    Normal,
    Specular,
}

/// Load state of one texture slot
#[derive(Debug, Clone, Default)]
pub enum TextureState {
    #[default]
    Empty,
    Pending,
    Ready(Arc<TextureData>),
    Failed,
}

impl TextureState {
    pub fn ready(&self) -> Option<&Arc<TextureData>> {
        match self {
            TextureState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, TextureState::Pending)
    }
}

/// Surface description of a mesh
#[derive(Debug, Clone)]
pub struct Material {
    pub shading: Shading,
    /// Linear RGB
    pub color: [f32; 3],
    pub opacity: f32,
    pub transparent: bool,
    pub depth_write: bool,
    pub side: Side,
    pub map: TextureState,
    pub normal_map: TextureState,
    pub specular_map: TextureState,
}

impl Material {
    fn with_shading(shading: Shading) -> Self {
        Self {
            shading,
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            transparent: false,
            depth_write: true,
            side: Side::Front,
            map: TextureState::Empty,
            normal_map: TextureState::Empty,
            specular_map: TextureState::Empty,
        }
    }

    pub fn phong(specular: [f32; 3], shininess: f32) -> Self {
        Self::with_shading(Shading::Phong { specular, shininess })
    }

    pub fn lambert() -> Self {
        Self::with_shading(Shading::Lambert)
    }

    pub fn basic() -> Self {
        Self::with_shading(Shading::Basic)
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    /// Mark as alpha blended with the given opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity;
        self
    }

    pub fn with_depth_write(mut self, depth_write: bool) -> Self {
        self.depth_write = depth_write;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn slot(&self, slot: MapSlot) -> &TextureState {
        match slot {
            MapSlot::Color => &self.map,
            MapSlot::Normal => &self.normal_map,
            MapSlot::Specular => &self.specular_map,
        }
    }

    pub fn slot_mut(&mut self, slot: MapSlot) -> &mut TextureState {
        match slot {
            MapSlot::Color => &mut self.map,
            MapSlot::Normal => &mut self.normal_map,
            MapSlot::Specular => &mut self.specular_map,
        }
    }
}

/// Convert a 0xRRGGBB sRGB hex color to linear RGB
pub fn srgb_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_extremes_are_exact() {
        for c in srgb_hex(0xffffff) {
            assert!((c - 1.0).abs() < 1e-6);
        }
        assert_eq!(srgb_hex(0x000000), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn hex_mid_gray_is_darker_in_linear() {
        let [r, g, b] = srgb_hex(0x808080);
        assert!((r - 0.2158).abs() < 1e-3);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn opacity_implies_transparency() {
        let material = Material::basic().with_opacity(0.15);
        assert!(material.transparent);
        assert_eq!(material.opacity, 0.15);
    }

    #[test]
    fn slots_start_empty() {
        let material = Material::lambert();
        for slot in [MapSlot::Color, MapSlot::Normal, MapSlot::Specular] {
            assert!(matches!(material.slot(slot), TextureState::Empty));
        }
    }
}
