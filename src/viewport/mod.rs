use crate::geometry::{ImagePoint, ViewPoint, ViewSize};

pub const MIN_SCALE: f64 = 0.1;
pub const MAX_SCALE: f64 = 5.0;
const ZOOM_STEP: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Mapping between image space and view space: a uniform scale plus a
/// view-space offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale_factor: f64,
    offset: ViewPoint,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    pub const fn new() -> Self {
        Self {
            scale_factor: 1.0,
            offset: ViewPoint::new(0.0, 0.0),
        }
    }

    pub const fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub const fn offset(&self) -> ViewPoint {
        self.offset
    }

    pub fn to_image_coords(&self, point: ViewPoint) -> ImagePoint {
        ImagePoint::new(
            (point.x - self.offset.x) / self.scale_factor,
            (point.y - self.offset.y) / self.scale_factor,
        )
    }

    pub fn to_view_coords(&self, point: ImagePoint) -> ViewPoint {
        ViewPoint::new(
            point.x * self.scale_factor + self.offset.x,
            point.y * self.scale_factor + self.offset.y,
        )
    }

    /// Scale the image to fit the view while keeping aspect ratio, never
    /// upscaling past 1:1, and center it.
    pub fn fit_to_window(&mut self, view: ViewSize, image_width: u32, image_height: u32) {
        let image_width = f64::from(image_width.max(1));
        let image_height = f64::from(image_height.max(1));

        let scale_x = view.width / image_width;
        let scale_y = view.height / image_height;
        self.scale_factor = scale_x.min(scale_y).min(1.0);

        self.offset = ViewPoint::new(
            (view.width - image_width * self.scale_factor) / 2.0,
            (view.height - image_height * self.scale_factor) / 2.0,
        );
    }

    /// One zoom step towards or away from `pivot`. The image point under the
    /// pivot stays visually fixed across the step.
    pub fn zoom(&mut self, pivot: ViewPoint, direction: ZoomDirection) {
        let factor = match direction {
            ZoomDirection::In => ZOOM_STEP,
            ZoomDirection::Out => 1.0 / ZOOM_STEP,
        };
        let new_scale = (self.scale_factor * factor).clamp(MIN_SCALE, MAX_SCALE);
        if new_scale == self.scale_factor {
            return;
        }

        let pivot_image = self.to_image_coords(pivot);
        self.scale_factor = new_scale;
        self.offset = ViewPoint::new(
            pivot.x - pivot_image.x * new_scale,
            pivot.y - pivot_image.y * new_scale,
        );
    }

    pub fn pan_by(&mut self, delta_x: f64, delta_y: f64) {
        self.offset = ViewPoint::new(self.offset.x + delta_x, self.offset.y + delta_y);
    }
}
