use super::{AnnotationSession, SessionEvent};
use crate::annotation::{clamp_to_image, BoxEntry, DraftBox};
use crate::geometry::ViewPoint;
use crate::hit::{self, CursorShape, ResizeHandle};
use crate::viewport::ZoomDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Interaction state, one variant per gesture. Move and resize carry a
/// snapshot of the box taken at press time; every pointer-move step is
/// computed against the snapshot, not the live box.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DragState {
    Idle,
    Drawing {
        draft: DraftBox,
    },
    Moving {
        target: u64,
        origin: BoxEntry,
        pointer_start: ViewPoint,
    },
    Resizing {
        target: u64,
        handle: ResizeHandle,
        origin: BoxEntry,
        pointer_start: ViewPoint,
    },
    Panning {
        last: ViewPoint,
    },
}

impl AnnotationSession {
    pub fn pointer_pressed(&mut self, button: PointerButton, at: ViewPoint) {
        if self.image.is_none() {
            return;
        }
        match button {
            PointerButton::Secondary => {
                // A secondary press takes over whatever gesture was running;
                // an unfinished draft does not survive it.
                self.drag = DragState::Panning { last: at };
            }
            PointerButton::Primary => {
                if self.drag == DragState::Idle {
                    self.primary_pressed(at);
                }
            }
        }
    }

    fn primary_pressed(&mut self, at: ViewPoint) {
        // A handle on the selected box wins over anything underneath it.
        if let Some(primary_id) = self.selection.primary() {
            if let Some(entry) = self.boxes.get(primary_id) {
                if let Some(handle) = hit::handle_at(at, entry, &self.viewport) {
                    self.drag = DragState::Resizing {
                        target: primary_id,
                        handle,
                        origin: entry.clone(),
                        pointer_start: at,
                    };
                    return;
                }
            }
        }

        let image_point = self.viewport.to_image_coords(at);
        if let Some(id) = hit::topmost_box_at(image_point, self.boxes.entries()) {
            if let Some(entry) = self.boxes.get(id).cloned() {
                self.selection.set_primary(id);
                self.push_event(SessionEvent::BoxSelected(entry.clone()));
                self.drag = DragState::Moving {
                    target: id,
                    origin: entry,
                    pointer_start: at,
                };
            }
            return;
        }

        self.selection.clear();
        self.drag = DragState::Drawing {
            draft: DraftBox::new(image_point, self.current_class, self.current_class_label()),
        };
    }

    pub fn pointer_moved(&mut self, at: ViewPoint) {
        match self.drag {
            DragState::Idle => {}
            DragState::Drawing { ref mut draft } => {
                let image_point = self.viewport.to_image_coords(at);
                draft.width = image_point.x - draft.origin.x;
                draft.height = image_point.y - draft.origin.y;
            }
            DragState::Moving {
                target,
                ref origin,
                pointer_start,
            } => {
                let Some(image) = self.image.clone() else {
                    return;
                };
                let start = self.viewport.to_image_coords(pointer_start);
                let current = self.viewport.to_image_coords(at);
                let (x, y, width, height) = clamp_to_image(
                    origin.x + (current.x - start.x),
                    origin.y + (current.y - start.y),
                    origin.width,
                    origin.height,
                    &image,
                );
                if let Some(entry) = self.boxes.get_mut(target) {
                    entry.x = x;
                    entry.y = y;
                    entry.width = width;
                    entry.height = height;
                }
            }
            DragState::Resizing {
                target,
                handle,
                ref origin,
                pointer_start,
            } => {
                let Some(image) = self.image.clone() else {
                    return;
                };
                let start = self.viewport.to_image_coords(pointer_start);
                let current = self.viewport.to_image_coords(at);
                let delta_x = current.x - start.x;
                let delta_y = current.y - start.y;

                let mut x = origin.x;
                let mut y = origin.y;
                let mut width = origin.width;
                let mut height = origin.height;
                if handle.touches_left() {
                    x = origin.x + delta_x;
                    width = origin.width - delta_x;
                }
                if handle.touches_right() {
                    width = origin.width + delta_x;
                }
                if handle.touches_top() {
                    y = origin.y + delta_y;
                    height = origin.height - delta_y;
                }
                if handle.touches_bottom() {
                    height = origin.height + delta_y;
                }

                let (x, y, width, height) = clamp_to_image(x, y, width, height, &image);
                if let Some(entry) = self.boxes.get_mut(target) {
                    entry.x = x;
                    entry.y = y;
                    entry.width = width;
                    entry.height = height;
                }
            }
            DragState::Panning { ref mut last } => {
                let delta_x = at.x - last.x;
                let delta_y = at.y - last.y;
                *last = at;
                self.viewport.pan_by(delta_x, delta_y);
            }
        }
    }

    pub fn pointer_released(&mut self, button: PointerButton, at: ViewPoint) {
        match button {
            PointerButton::Primary => match std::mem::replace(&mut self.drag, DragState::Idle) {
                DragState::Drawing { mut draft } => {
                    let image_point = self.viewport.to_image_coords(at);
                    draft.width = image_point.x - draft.origin.x;
                    draft.height = image_point.y - draft.origin.y;
                    self.commit_draft(draft);
                }
                DragState::Moving { .. } | DragState::Resizing { .. } | DragState::Idle => {}
                // Panning ends on secondary release, not primary.
                panning @ DragState::Panning { .. } => self.drag = panning,
            },
            PointerButton::Secondary => {
                if matches!(self.drag, DragState::Panning { .. }) {
                    self.drag = DragState::Idle;
                }
            }
        }
    }

    fn commit_draft(&mut self, draft: DraftBox) {
        let Some(image) = self.image.clone() else {
            return;
        };
        if !draft.meets_commit_threshold() {
            tracing::debug!(
                width = draft.width,
                height = draft.height,
                "draw gesture below commit threshold, discarded"
            );
            return;
        }
        let id = self.boxes.insert(
            draft.normalized(),
            draft.class_index,
            draft.class_label,
            &image,
        );
        self.selection.set_primary(id);
        if let Some(entry) = self.boxes.get(id).cloned() {
            tracing::debug!(id, class = entry.class_index, "box committed");
            self.push_event(SessionEvent::BoxCreated(entry));
        }
    }

    /// Double-click asks the host to open its class chooser for the box
    /// under the pointer; the host answers through `assign_class`.
    pub fn double_clicked(&mut self, at: ViewPoint) {
        let image_point = self.viewport.to_image_coords(at);
        if let Some(id) = hit::topmost_box_at(image_point, self.boxes.entries()) {
            if let Some(entry) = self.boxes.get(id).cloned() {
                self.push_event(SessionEvent::ClassEditRequested(entry));
            }
        }
    }

    pub fn wheel_zoom(&mut self, pivot: ViewPoint, direction: ZoomDirection) {
        if self.image.is_none() {
            return;
        }
        self.viewport.zoom(pivot, direction);
    }

    /// Escape: abandon an in-progress draw and drop the selection.
    pub fn cancel_interaction(&mut self) {
        self.drag = DragState::Idle;
        self.selection.clear();
    }

    /// Cursor the host should show for the pointer at `at` while idle.
    pub fn cursor_hint(&self, at: ViewPoint) -> CursorShape {
        if let Some(primary_id) = self.selection.primary() {
            if let Some(entry) = self.boxes.get(primary_id) {
                if let Some(handle) = hit::handle_at(at, entry, &self.viewport) {
                    return hit::cursor_for_handle(handle);
                }
            }
        }
        CursorShape::Default
    }
}
