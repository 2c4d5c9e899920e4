mod classes;
mod clipboard;
mod interaction;
mod persist;

pub use clipboard::ClassCycle;
pub use interaction::PointerButton;

use crate::annotation::{BoxEntry, BoxModel, DraftBox, ImageContext};
use crate::config::AppConfig;
use crate::error::EngineResult;
use crate::geometry::ViewSize;
use crate::palette::{ClassPalette, PaletteError};
use crate::selection::Selection;
use crate::viewport::Viewport;
use crate::workspace::Workspace;

use interaction::DragState;

const DEFAULT_VIEW_SIZE: ViewSize = ViewSize::new(800.0, 600.0);

/// Outbound notifications for the host UI, drained after each delivered
/// input event.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    BoxCreated(BoxEntry),
    BoxSelected(BoxEntry),
    BoxDeleted(BoxEntry),
    ClassEditRequested(BoxEntry),
}

/// Which interaction the pointer is currently driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase {
    Idle,
    Drawing,
    Moving,
    Resizing,
    Panning,
}

/// The annotation engine for one editing session: the loaded image, its box
/// collection, the class palette, the viewport, selection and clipboard, and
/// the pointer interaction state. Hosts deliver input events and inbound
/// commands, then drain the event queue.
#[derive(Debug)]
pub struct AnnotationSession {
    image: Option<ImageContext>,
    boxes: BoxModel,
    palette: ClassPalette,
    viewport: Viewport,
    view_size: ViewSize,
    selection: Selection,
    clipboard: Vec<BoxEntry>,
    drag: DragState,
    current_class: usize,
    default_class_name: String,
    autosave_on_navigate: bool,
    workspace: Option<Workspace>,
    events: Vec<SessionEvent>,
}

impl Default for AnnotationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationSession {
    pub fn new() -> Self {
        Self::with_config(&AppConfig::default())
    }

    pub fn with_config(config: &AppConfig) -> Self {
        Self {
            image: None,
            boxes: BoxModel::new(),
            palette: ClassPalette::with_default_class(config.default_class_name()),
            viewport: Viewport::new(),
            view_size: DEFAULT_VIEW_SIZE,
            selection: Selection::new(),
            clipboard: Vec::new(),
            drag: DragState::Idle,
            current_class: 0,
            default_class_name: config.default_class_name().to_string(),
            autosave_on_navigate: config.autosave_on_navigate(),
            workspace: None,
            events: Vec::new(),
        }
    }

    pub fn image(&self) -> Option<&ImageContext> {
        self.image.as_ref()
    }

    pub fn boxes(&self) -> &[BoxEntry] {
        self.boxes.entries()
    }

    pub fn palette(&self) -> &ClassPalette {
        &self.palette
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clipboard(&self) -> &[BoxEntry] {
        &self.clipboard
    }

    pub fn workspace(&self) -> Option<&Workspace> {
        self.workspace.as_ref()
    }

    pub const fn current_class(&self) -> usize {
        self.current_class
    }

    pub fn phase(&self) -> InteractionPhase {
        match self.drag {
            DragState::Idle => InteractionPhase::Idle,
            DragState::Drawing { .. } => InteractionPhase::Drawing,
            DragState::Moving { .. } => InteractionPhase::Moving,
            DragState::Resizing { .. } => InteractionPhase::Resizing,
            DragState::Panning { .. } => InteractionPhase::Panning,
        }
    }

    /// The in-progress draw gesture, for host rendering.
    pub fn draft(&self) -> Option<&DraftBox> {
        match &self.drag {
            DragState::Drawing { draft } => Some(draft),
            _ => None,
        }
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Host window resized; refit the image if one is loaded.
    pub fn set_view_size(&mut self, size: ViewSize) {
        self.view_size = size;
        if let Some(image) = &self.image {
            self.viewport
                .fit_to_window(self.view_size, image.width, image.height);
        }
    }

    pub fn fit_to_window(&mut self) {
        if let Some(image) = &self.image {
            self.viewport
                .fit_to_window(self.view_size, image.width, image.height);
        }
    }

    /// Class used for newly drawn boxes.
    pub fn set_current_class(&mut self, index: usize) -> EngineResult<()> {
        if index >= self.palette.len() {
            return Err(PaletteError::IndexOutOfRange { index }.into());
        }
        self.current_class = index;
        Ok(())
    }

    pub(crate) fn current_class_label(&self) -> String {
        self.palette
            .name(self.current_class)
            .unwrap_or(crate::palette::DEFAULT_CLASS_NAME)
            .to_string()
    }

    /// Reassign a box's class, typically after a `ClassEditRequested` round
    /// trip through the host's chooser.
    pub fn assign_class(&mut self, id: u64, class_index: usize) -> EngineResult<()> {
        if class_index >= self.palette.len() {
            return Err(PaletteError::IndexOutOfRange { index: class_index }.into());
        }
        let label = self
            .palette
            .name(class_index)
            .unwrap_or(crate::palette::DEFAULT_CLASS_NAME)
            .to_string();
        match self.boxes.get_mut(id) {
            Some(entry) => {
                entry.class_index = class_index;
                entry.class_label = label;
            }
            None => {
                tracing::warn!(id, "class assignment targeted a box that no longer exists");
            }
        }
        Ok(())
    }

    /// Remove the primary selection, if any. Emits `BoxDeleted`.
    pub fn delete_selection(&mut self) -> bool {
        let Some(id) = self.selection.primary() else {
            return false;
        };
        let Some(removed) = self.boxes.remove(id) else {
            self.selection.clear();
            return false;
        };
        self.selection.clear();
        self.push_event(SessionEvent::BoxDeleted(removed));
        true
    }

}

#[cfg(test)]
impl AnnotationSession {
    /// Session with an in-memory image context, bypassing the probe. The
    /// default viewport maps view space 1:1 onto image space.
    pub(crate) fn with_test_image(width: u32, height: u32) -> Self {
        let mut session = Self::new();
        session.image = Some(ImageContext::new("/tmp/boxtag-test.png", width, height));
        session
    }
}
