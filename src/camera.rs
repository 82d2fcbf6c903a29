use glam::{Mat4, Vec3};
use std::f32::consts::PI;

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    aspect: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            fov_y_degrees: FOV_Y_DEGREES,
            near: Z_NEAR,
            far: Z_FAR,
            position: Vec3::new(0.0, 0.0, 4.0),
            target: Vec3::ZERO,
            aspect,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    /// Recompute the projection after changing fov, aspect or clip planes
    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect.max(1e-6),
            self.near,
            self.far,
        );
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view()
    }
}

const MIN_POLAR: f32 = 1e-6;

/// Pointer-driven orbit around a fixed target with optional damping.
/// Panning is disabled; the target never moves.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    drag_from: Option<(f32, f32)>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: 0.05,
            min_distance: 2.0,
            max_distance: 8.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            drag_from: None,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.drag_from = Some((x, y));
    }

    pub fn pointer_up(&mut self) {
        self.drag_from = None;
    }

    /// Pointer motion in logical pixels; a full viewport height drag is one turn
    pub fn pointer_move(&mut self, x: f32, y: f32, viewport_height: f32) {
        let Some((from_x, from_y)) = self.drag_from else {
            return;
        };
        let height = viewport_height.max(1.0);
        self.rotate_left(2.0 * PI * (x - from_x) / height * self.rotate_speed);
        self.rotate_up(2.0 * PI * (y - from_y) / height * self.rotate_speed);
        self.drag_from = Some((x, y));
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Positive steps move the camera closer
    pub fn zoom(&mut self, steps: f32) {
        let factor = 0.95f32.powf(self.zoom_speed * steps.abs());
        if steps > 0.0 {
            self.scale *= factor;
        } else if steps < 0.0 {
            self.scale /= factor;
        }
    }

    /// Apply pending input to the camera. Call once per frame.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let offset = camera.position - self.target;
        let radius = offset.length().max(MIN_POLAR);
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.enable_damping {
            theta += self.delta_theta * self.damping_factor;
            phi += self.delta_phi * self.damping_factor;
        } else {
            theta += self.delta_theta;
            phi += self.delta_phi;
        }
        phi = phi.clamp(MIN_POLAR, PI - MIN_POLAR);

        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.position = self.target
            + Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
        camera.target = self.target;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;
    }
}
