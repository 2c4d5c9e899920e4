use super::AnnotationSession;
use crate::error::EngineResult;
use crate::geometry::Color;
use crate::palette::{ClassPalette, DEFAULT_CLASS_NAME};

impl AnnotationSession {
    pub fn add_class(&mut self, name: &str, color: Option<Color>) -> EngineResult<usize> {
        let index = self.palette.add_class(name, color)?;
        tracing::debug!(name, index, "class added");
        Ok(index)
    }

    /// Rename a class and refresh the cached label on every box carrying it.
    pub fn rename_class(&mut self, index: usize, new_name: &str) -> EngineResult<()> {
        self.palette.rename_class(index, new_name)?;
        for entry in self.boxes.entries_mut() {
            if entry.class_index == index {
                entry.class_label = new_name.to_string();
            }
        }
        Ok(())
    }

    /// Delete a class and remap every box uniformly: boxes on the removed
    /// class fall back to class 0, boxes above it shift down one index.
    pub fn delete_class(&mut self, index: usize) -> EngineResult<()> {
        let removed = self.palette.delete_class(index)?;

        let fallback_label = self
            .palette
            .name(0)
            .unwrap_or(DEFAULT_CLASS_NAME)
            .to_string();
        for entry in self.boxes.entries_mut() {
            if entry.class_index == index {
                entry.class_index = 0;
                entry.class_label = fallback_label.clone();
            } else if entry.class_index > index {
                entry.class_index -= 1;
                if let Some(name) = self.palette.name(entry.class_index) {
                    entry.class_label = name.to_string();
                }
            }
        }

        if self.current_class == index {
            self.current_class = 0;
        } else if self.current_class > index {
            self.current_class -= 1;
        }

        tracing::debug!(name = %removed.name, index, "class deleted, boxes remapped");
        Ok(())
    }

    /// Swap in a whole palette (e.g. a freshly loaded label mapping) and
    /// reconcile every box against it: out-of-range indices fall back to
    /// class 0, everything else re-derives its label.
    pub(crate) fn replace_palette(&mut self, palette: ClassPalette) {
        self.palette = palette;
        let fallback_label = self
            .palette
            .name(0)
            .unwrap_or(DEFAULT_CLASS_NAME)
            .to_string();
        for entry in self.boxes.entries_mut() {
            match self.palette.name(entry.class_index) {
                Some(name) => entry.class_label = name.to_string(),
                None => {
                    entry.class_index = 0;
                    entry.class_label = fallback_label.clone();
                }
            }
        }
        self.current_class = 0;
    }
}
