use anyhow::Result;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::task::Poll;

use crate::camera::{OrbitControls, PerspectiveCamera};
use crate::frame::{FrameInfo, FrameIterator, FrameLoop};
use crate::params::{ParamSetter, ParamValue, ParameterSet};
use crate::scene::{MapSlot, NodeId, SceneGraph, TextureState};
use crate::scenes::{create_scene, Variant};
use crate::textures::{PendingTexture, TextureLoader};
use crate::viewport::Viewport;

/// Composer lifecycle. Before `initialize` there is no composer at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Running,
    ContextLost,
    Disposed,
}

/// In-flight texture bound for a material slot
struct TextureAssignment {
    node: NodeId,
    slot: MapSlot,
    pending: PendingTexture,
}

/// Owns the scene, camera, parameters and lifecycle of one viewer session
pub struct SceneComposer {
    variant: Variant,
    scene: SceneGraph,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    params: ParameterSet,
    bindings: HashMap<&'static str, Vec<ParamSetter>>,
    textures: Vec<TextureAssignment>,
    viewport: Viewport,
    lifecycle: Lifecycle,
    frames: FrameIterator,
    frame_loop: FrameLoop,
}

impl SceneComposer {
    /// Build the scene and start texture loads. Never waits on a texture.
    pub fn initialize(viewport: Viewport, variant: Variant, loader: &TextureLoader) -> Self {
        let setup = create_scene(variant);
        let aspect = if viewport.is_empty() { 1.0 } else { viewport.aspect() };

        let mut composer = Self {
            variant,
            scene: setup.scene,
            camera: PerspectiveCamera::new(aspect),
            controls: OrbitControls::new(),
            params: ParameterSet::new(setup.params),
            bindings: HashMap::new(),
            textures: Vec::new(),
            viewport,
            lifecycle: Lifecycle::Running,
            frames: FrameIterator::new(),
            frame_loop: FrameLoop::new(),
        };

        for (name, setter) in setup.bindings {
            composer.bind_parameter(name, setter);
        }

        // Push defaults through the bindings so the scene reflects the parameter set
        let defaults: Vec<_> = composer
            .params
            .specs()
            .iter()
            .map(|spec| (spec.name, spec.default))
            .collect();
        for (name, value) in defaults {
            if let Err(e) = composer.set_parameter(name, value) {
                warn!("Default for {} rejected: {}", name, e);
            }
        }

        for request in setup.textures {
            composer.load_texture(request.node, request.slot, loader.load_role(request.role));
        }

        info!(
            "Scene composed: {:?} variant, {} nodes, {} textures pending",
            variant,
            composer.scene.len(),
            composer.textures.len()
        );
        composer
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames.frame_number()
    }

    pub fn pending_textures(&self) -> usize {
        self.textures.len()
    }

    /// Advance each node's rotation by its per-frame increment
    pub fn tick(&mut self) {
        self.scene.advance_rotations();
    }

    /// Register a setter run whenever `name` changes
    pub fn bind_parameter(&mut self, name: &'static str, setter: ParamSetter) {
        self.bindings.entry(name).or_default().push(setter);
    }

    /// Store the value as given and push it through every binding.
    /// Range clamping is the caller's job.
    pub fn set_parameter(&mut self, name: &str, value: ParamValue) -> Result<()> {
        self.params.set(name, value)?;
        if let Some(setters) = self.bindings.get_mut(name) {
            for setter in setters.iter_mut() {
                setter(&mut self.scene, value);
            }
        }
        debug!("Parameter {} = {:?}", name, value);
        Ok(())
    }

    /// Queue a decode for a material slot. A later load into the same slot
    /// overwrites whichever finished first.
    pub fn load_texture(&mut self, node: NodeId, slot: MapSlot, pending: PendingTexture) {
        match self.scene.node_mut(node).and_then(|n| n.as_mesh_mut()) {
            Some(mesh) => {
                let state = mesh.material.slot_mut(slot);
                if !matches!(state, TextureState::Ready(_)) {
                    *state = TextureState::Pending;
                }
                self.textures.push(TextureAssignment { node, slot, pending });
            }
            None => warn!("Texture {:?} targets missing mesh {:?}", pending.path(), node),
        }
    }

    /// Move finished decodes into their material slots. Returns how many resolved.
    pub fn poll_textures(&mut self) -> usize {
        let mut resolved = 0;
        let scene = &mut self.scene;

        self.textures.retain_mut(|assignment| {
            let result = match assignment.pending.poll() {
                Poll::Pending => return true,
                Poll::Ready(result) => result,
            };
            resolved += 1;

            let Some(mesh) = scene.node_mut(assignment.node).and_then(|n| n.as_mesh_mut()) else {
                return false;
            };
            let state = mesh.material.slot_mut(assignment.slot);
            match result {
                Ok(data) => {
                    debug!(
                        "Texture {:?} ready: {}x{}",
                        assignment.pending.path(),
                        data.width,
                        data.height
                    );
                    *state = TextureState::Ready(data.into());
                }
                Err(e) => {
                    warn!("Texture unavailable, keeping base color: {:#}", e);
                    if state.is_pending() {
                        *state = TextureState::Failed;
                    }
                }
            }
            false
        });

        resolved
    }

    /// Recompute aspect and record the new output size
    pub fn on_viewport_resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            debug!("Ignoring empty viewport {}x{}", viewport.width, viewport.height);
            return;
        }
        self.viewport = viewport;
        self.camera.set_aspect(viewport.aspect());
    }

    pub fn on_context_lost(&mut self) {
        if self.lifecycle == Lifecycle::Running {
            warn!("Graphics context lost; rendering suspended");
            self.lifecycle = Lifecycle::ContextLost;
        }
    }

    pub fn on_context_restored(&mut self) {
        if self.lifecycle == Lifecycle::ContextLost {
            info!("Graphics context restored; rendering resumed");
            self.lifecycle = Lifecycle::Running;
        }
    }

    /// Stop the frame loop and drop outstanding texture loads
    pub fn dispose(&mut self) {
        if self.lifecycle != Lifecycle::Disposed {
            info!("Disposing scene after {} frames", self.frames.frame_number());
            self.lifecycle = Lifecycle::Disposed;
            self.frame_loop.cancel();
            self.textures.clear();
        }
    }

    /// One step of the render loop. `None` means skip rendering this frame.
    pub fn begin_frame(&mut self) -> Option<FrameInfo> {
        if self.lifecycle != Lifecycle::Running {
            return None;
        }
        self.poll_textures();
        self.tick();
        self.controls.update(&mut self.camera);
        self.frames.next()
    }
}
