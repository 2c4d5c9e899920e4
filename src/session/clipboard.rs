use super::{AnnotationSession, SessionEvent};

/// Offset applied to pasted boxes so they do not land exactly on their
/// source, in image pixels.
const PASTE_OFFSET: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassCycle {
    Next,
    Previous,
}

impl AnnotationSession {
    pub fn select_all(&mut self) {
        self.selection.select_all(self.boxes.ids());
    }

    /// Replace the clipboard with value copies of the effective selection.
    /// With nothing selected the clipboard keeps its previous contents.
    pub fn copy_selection(&mut self) {
        let targets = self.selection.effective();
        if targets.is_empty() {
            return;
        }
        self.clipboard = targets
            .iter()
            .filter_map(|id| self.boxes.get(*id))
            .cloned()
            .collect();
        tracing::debug!(boxes = self.clipboard.len(), "selection copied");
    }

    /// Copy, then remove every selected box. Emits `BoxDeleted` per box.
    pub fn cut_selection(&mut self) {
        self.copy_selection();
        let targets = self.selection.effective();
        for id in targets {
            if let Some(removed) = self.boxes.remove(id) {
                self.push_event(SessionEvent::BoxDeleted(removed));
            }
        }
        self.selection.clear();
    }

    /// Re-create each clipboard entry, nudged by the paste offset and
    /// clamped to the image. The clipboard is kept, so paste repeats.
    pub fn paste_clipboard(&mut self) {
        let Some(image) = self.image.clone() else {
            return;
        };
        let sources = self.clipboard.clone();
        for source in sources {
            self.boxes.insert(
                (
                    source.x + PASTE_OFFSET,
                    source.y + PASTE_OFFSET,
                    source.width,
                    source.height,
                ),
                source.class_index,
                source.class_label,
                &image,
            );
        }
    }

    /// Cycle the class used for new boxes. Cycling also drops the selection
    /// so the class chooser visibly tracks the current class, not a box.
    pub fn switch_class(&mut self, direction: ClassCycle) {
        let count = self.palette.len();
        if count <= 1 {
            return;
        }
        self.current_class = match direction {
            ClassCycle::Next => (self.current_class + 1) % count,
            ClassCycle::Previous => (self.current_class + count - 1) % count,
        };
        self.selection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ViewPoint;
    use crate::session::{PointerButton, SessionEvent};

    fn session_with_boxes() -> AnnotationSession {
        let mut session = AnnotationSession::with_test_image(1000, 800);
        for (from, to) in [
            ((100.0, 100.0), (200.0, 200.0)),
            ((300.0, 300.0), (400.0, 450.0)),
        ] {
            session.pointer_pressed(PointerButton::Primary, ViewPoint::new(from.0, from.1));
            session.pointer_moved(ViewPoint::new(to.0, to.1));
            session.pointer_released(PointerButton::Primary, ViewPoint::new(to.0, to.1));
        }
        session.cancel_interaction();
        session.drain_events();
        session
    }

    #[test]
    fn select_all_populates_multi_with_primary_on_first() {
        let mut session = session_with_boxes();
        session.select_all();
        assert_eq!(session.selection().multi().len(), 2);
        assert_eq!(session.selection().primary(), Some(session.boxes()[0].id));
    }

    #[test]
    fn copy_paste_duplicates_every_selected_box_with_offset() {
        let mut session = session_with_boxes();
        session.select_all();
        session.copy_selection();
        assert_eq!(session.clipboard().len(), 2);

        session.paste_clipboard();
        assert_eq!(session.boxes().len(), 4);
        let pasted = &session.boxes()[2];
        assert_eq!((pasted.x, pasted.y), (110.0, 110.0));
        assert_eq!((pasted.width, pasted.height), (100.0, 100.0));

        // clipboard is not consumed
        session.paste_clipboard();
        assert_eq!(session.boxes().len(), 6);
        assert_eq!(session.clipboard().len(), 2);
    }

    #[test]
    fn a_single_clicked_box_feeds_copy_and_cut() {
        let mut session = session_with_boxes();
        session.pointer_pressed(PointerButton::Primary, ViewPoint::new(150.0, 150.0));
        session.pointer_released(PointerButton::Primary, ViewPoint::new(150.0, 150.0));

        session.copy_selection();
        assert_eq!(session.clipboard().len(), 1);
        assert_eq!(session.clipboard()[0].x, 100.0);
    }

    #[test]
    fn copy_with_nothing_selected_keeps_the_clipboard() {
        let mut session = session_with_boxes();
        session.select_all();
        session.copy_selection();
        assert_eq!(session.clipboard().len(), 2);

        session.cancel_interaction();
        session.copy_selection();
        assert_eq!(session.clipboard().len(), 2);
    }

    #[test]
    fn cut_removes_boxes_and_notifies_per_box() {
        let mut session = session_with_boxes();
        session.select_all();
        session.cut_selection();

        assert!(session.boxes().is_empty());
        assert!(session.selection().is_empty());
        assert_eq!(session.clipboard().len(), 2);
        let events = session.drain_events();
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, SessionEvent::BoxDeleted(_)))
                .count(),
            2
        );

        // cut boxes can be pasted back
        session.paste_clipboard();
        assert_eq!(session.boxes().len(), 2);
    }

    #[test]
    fn pasting_near_the_edge_clamps_into_the_image() {
        let mut session = AnnotationSession::with_test_image(1000, 800);
        session.pointer_pressed(PointerButton::Primary, ViewPoint::new(900.0, 700.0));
        session.pointer_moved(ViewPoint::new(1000.0, 800.0));
        session.pointer_released(PointerButton::Primary, ViewPoint::new(1000.0, 800.0));
        session.copy_selection();

        session.paste_clipboard();
        let pasted = &session.boxes()[1];
        assert_eq!((pasted.x, pasted.y), (900.0, 700.0));
        assert_eq!((pasted.width, pasted.height), (100.0, 100.0));
    }

    #[test]
    fn switch_class_wraps_in_both_directions_and_deselects() {
        let mut session = session_with_boxes();
        session.add_class("car", None).expect("car should insert");
        session.add_class("dog", None).expect("dog should insert");

        session.pointer_pressed(PointerButton::Primary, ViewPoint::new(150.0, 150.0));
        session.pointer_released(PointerButton::Primary, ViewPoint::new(150.0, 150.0));
        assert!(!session.selection().is_empty());

        session.switch_class(ClassCycle::Next);
        assert_eq!(session.current_class(), 1);
        assert!(session.selection().is_empty());

        session.switch_class(ClassCycle::Previous);
        session.switch_class(ClassCycle::Previous);
        assert_eq!(session.current_class(), 2);

        session.switch_class(ClassCycle::Next);
        assert_eq!(session.current_class(), 0);
    }

    #[test]
    fn switch_class_is_inert_on_a_single_class_palette() {
        let mut session = session_with_boxes();
        session.switch_class(ClassCycle::Next);
        assert_eq!(session.current_class(), 0);
    }
}
