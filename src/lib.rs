pub mod camera;
pub mod cli;
pub mod composer;
pub mod config;
pub mod frame;
pub mod params;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod textures;
pub mod types;
pub mod viewport;

pub use camera::{OrbitControls, PerspectiveCamera};
pub use composer::{Lifecycle, SceneComposer};
pub use config::ViewerConfig;
pub use params::{ControlPanel, ParamValue, ParameterSet};
pub use scenes::{create_scene, Variant};
pub use textures::{TextureLoader, TextureRole};
pub use viewport::Viewport;
