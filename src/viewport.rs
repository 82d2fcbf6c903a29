/// Device pixel ratio is capped to keep fill cost bounded on dense displays
pub const MAX_PIXEL_RATIO: f32 = 2.0;

/// Output surface size: the host's physical size and scale factor, the
/// logical size derived from them, and the capped device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in logical pixels
    pub width: u32,
    /// Height in logical pixels
    pub height: u32,
    /// Render pixels per logical pixel, at most `MAX_PIXEL_RATIO`
    pub pixel_ratio: f32,
    scale_factor: f32,
    physical: (u32, u32),
}

impl Viewport {
    /// Viewport with a pixel ratio of 1
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
            scale_factor: 1.0,
            physical: (width, height),
        }
    }

    /// Same logical size shown on a display with `ratio` device pixels per
    /// logical pixel
    pub fn with_pixel_ratio(self, ratio: f32) -> Self {
        let scale = ratio.max(f32::MIN_POSITIVE);
        Self {
            pixel_ratio: scale.min(MAX_PIXEL_RATIO),
            scale_factor: scale,
            physical: (
                (self.width as f32 * scale).round() as u32,
                (self.height as f32 * scale).round() as u32,
            ),
            ..self
        }
    }

    /// Build from a physical window size and the host scale factor
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale = scale_factor.max(f64::MIN_POSITIVE);
        Self {
            width: (width as f64 / scale).round() as u32,
            height: (height as f64 / scale).round() as u32,
            pixel_ratio: (scale as f32).min(MAX_PIXEL_RATIO),
            scale_factor: scale as f32,
            physical: (width, height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.physical.0 == 0 || self.physical.1 == 0
    }

    pub fn aspect(&self) -> f32 {
        self.physical.0 as f32 / self.physical.1 as f32
    }

    /// Host scale factor, before the pixel ratio cap
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Window size in device pixels as reported by the host
    pub fn physical_size(&self) -> (u32, u32) {
        self.physical
    }

    /// Factor applied to the host scale so UI points map onto the capped
    /// drawing buffer instead of the window
    pub fn ui_zoom_factor(&self) -> f32 {
        self.pixel_ratio / self.scale_factor
    }

    /// Size of the render target in device pixels. Equal to the physical
    /// size unless the pixel ratio is capped, then scaled down and floored.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        if self.pixel_ratio >= self.scale_factor {
            return self.physical;
        }
        let ratio = self.pixel_ratio as f64;
        let scale = self.scale_factor as f64;
        (
            (self.physical.0 as f64 * ratio / scale).floor() as u32,
            (self.physical.1 as f64 * ratio / scale).floor() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped() {
        let viewport = Viewport::new(800, 600).with_pixel_ratio(3.0);
        assert_eq!(viewport.pixel_ratio, MAX_PIXEL_RATIO);
        assert_eq!(viewport.drawing_buffer_size(), (1600, 1200));
    }

    #[test]
    fn from_physical_recovers_logical_size() {
        let viewport = Viewport::from_physical(1600, 1200, 2.0);
        assert_eq!((viewport.width, viewport.height), (800, 600));
        assert_eq!(viewport.drawing_buffer_size(), (1600, 1200));
    }

    #[test]
    fn fractional_scale_keeps_window_size() {
        let viewport = Viewport::from_physical(1003, 701, 1.5);
        assert_eq!(viewport.drawing_buffer_size(), (1003, 701));
        assert_eq!(viewport.physical_size(), (1003, 701));
        assert_eq!(viewport.aspect(), 1003.0 / 701.0);
    }

    #[test]
    fn from_physical_above_cap_shrinks_and_floors() {
        let viewport = Viewport::from_physical(3000, 1500, 3.0);
        assert_eq!((viewport.width, viewport.height), (1000, 500));
        assert_eq!(viewport.drawing_buffer_size(), (2000, 1000));

        let viewport = Viewport::from_physical(3000, 2000, 3.0);
        assert_eq!(viewport.drawing_buffer_size(), (2000, 1333));
    }

    #[test]
    fn buffer_never_exceeds_window() {
        for scale in [1.0, 1.25, 1.5, 1.75, 2.0, 2.5, 3.0] {
            for (w, h) in [(1003, 701), (1, 1), (1919, 1079)] {
                let viewport = Viewport::from_physical(w, h, scale);
                let (bw, bh) = viewport.drawing_buffer_size();
                assert!(bw <= w && bh <= h, "{}x{} at {}", w, h, scale);
            }
        }
    }

    #[test]
    fn ui_points_span_the_drawing_buffer() {
        let viewport = Viewport::from_physical(2400, 1500, 3.0);
        let (bw, bh) = viewport.drawing_buffer_size();
        let ppp = viewport.scale_factor() * viewport.ui_zoom_factor();
        assert!((ppp - viewport.pixel_ratio).abs() < 1e-6);
        assert!((bw as f32 / ppp - viewport.width as f32).abs() < 1.0);
        assert!((bh as f32 / ppp - viewport.height as f32).abs() < 1.0);

        assert_eq!(Viewport::from_physical(1003, 701, 1.5).ui_zoom_factor(), 1.0);
    }

    #[test]
    fn zero_dimension_is_empty() {
        assert!(Viewport::new(0, 600).is_empty());
        assert!(Viewport::new(800, 0).is_empty());
        assert!(!Viewport::new(1, 1).is_empty());
        assert!(Viewport::from_physical(0, 700, 1.5).is_empty());
    }
}
