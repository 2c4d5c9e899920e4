use crate::annotation::BoxEntry;
use crate::geometry::{ImagePoint, ViewPoint, ViewRect};
use crate::viewport::Viewport;

/// Side length of a resize-handle hit region, in view pixels.
pub const HANDLE_SIZE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl ResizeHandle {
    /// Stable enumeration order; `handle_at` probes regions in this order.
    pub const ALL: [ResizeHandle; 8] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
    ];

    pub const fn touches_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft | Self::Left)
    }

    pub const fn touches_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    pub const fn touches_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::Top)
    }

    pub const fn touches_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }
}

/// Cursor the host should show while hovering a handle or the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Default,
    ResizeDiagonal,
    ResizeAntiDiagonal,
    ResizeVertical,
    ResizeHorizontal,
}

pub const fn cursor_for_handle(handle: ResizeHandle) -> CursorShape {
    match handle {
        ResizeHandle::TopLeft | ResizeHandle::BottomRight => CursorShape::ResizeDiagonal,
        ResizeHandle::TopRight | ResizeHandle::BottomLeft => CursorShape::ResizeAntiDiagonal,
        ResizeHandle::Top | ResizeHandle::Bottom => CursorShape::ResizeVertical,
        ResizeHandle::Left | ResizeHandle::Right => CursorShape::ResizeHorizontal,
    }
}

/// The eight handle hit regions for a box, centered on its view-space
/// corners and edge midpoints.
pub fn handle_regions(entry: &BoxEntry, viewport: &Viewport) -> [(ResizeHandle, ViewRect); 8] {
    let top_left = viewport.to_view_coords(ImagePoint::new(entry.x, entry.y));
    let width = entry.width * viewport.scale_factor();
    let height = entry.height * viewport.scale_factor();

    let region = |center_x: f64, center_y: f64| {
        ViewRect::new(
            center_x - HANDLE_SIZE / 2.0,
            center_y - HANDLE_SIZE / 2.0,
            HANDLE_SIZE,
            HANDLE_SIZE,
        )
    };

    [
        (ResizeHandle::TopLeft, region(top_left.x, top_left.y)),
        (ResizeHandle::TopRight, region(top_left.x + width, top_left.y)),
        (ResizeHandle::BottomLeft, region(top_left.x, top_left.y + height)),
        (
            ResizeHandle::BottomRight,
            region(top_left.x + width, top_left.y + height),
        ),
        (ResizeHandle::Top, region(top_left.x + width / 2.0, top_left.y)),
        (
            ResizeHandle::Bottom,
            region(top_left.x + width / 2.0, top_left.y + height),
        ),
        (ResizeHandle::Left, region(top_left.x, top_left.y + height / 2.0)),
        (
            ResizeHandle::Right,
            region(top_left.x + width, top_left.y + height / 2.0),
        ),
    ]
}

/// First handle region containing `point`, probing in enumeration order.
pub fn handle_at(point: ViewPoint, entry: &BoxEntry, viewport: &Viewport) -> Option<ResizeHandle> {
    handle_regions(entry, viewport)
        .into_iter()
        .find(|(_, rect)| rect.contains(point))
        .map(|(handle, _)| handle)
}

/// Topmost box containing `point`: last-created renders on top, so scan in
/// reverse insertion order.
pub fn topmost_box_at(point: ImagePoint, entries: &[BoxEntry]) -> Option<u64> {
    entries
        .iter()
        .rev()
        .find(|entry| entry.contains_point(point))
        .map(|entry| entry.id)
}
