use std::path::Path;

use super::{AnnotationSession, DragState};
use crate::annotation::BoxModel;
use crate::codec::{self, LABEL_MAPPING_FILE};
use crate::error::EngineResult;
use crate::palette::ClassPalette;
use crate::source;
use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavigationStep {
    Next,
    Previous,
    Jump(usize),
}

impl AnnotationSession {
    /// Load an image and its sidecar annotations, replacing the current
    /// image context. A probe failure leaves the session untouched. The
    /// clipboard deliberately survives, so boxes can be pasted across
    /// images.
    pub fn load_image(&mut self, path: &Path) -> EngineResult<()> {
        let context = source::probe_image(path)?;

        self.boxes = BoxModel::new();
        self.selection.clear();
        self.drag = DragState::Idle;
        self.viewport
            .fit_to_window(self.view_size, context.width, context.height);

        let parsed = codec::load_annotations(path, context.width, context.height, &self.palette)
            .unwrap_or_else(|err| {
                tracing::warn!(?err, "annotation sidecar unreadable, starting empty");
                Vec::new()
            });
        for item in parsed {
            self.boxes.insert(
                (item.x, item.y, item.width, item.height),
                item.class_index,
                item.class_label,
                &context,
            );
        }

        tracing::info!(
            path = %path.display(),
            width = context.width,
            height = context.height,
            boxes = self.boxes.len(),
            "image loaded"
        );
        self.image = Some(context);
        Ok(())
    }

    /// Write the sidecar annotation file for the current image. Failure
    /// leaves the in-memory boxes untouched; the caller must treat the save
    /// as not having happened.
    pub fn save(&self) -> EngineResult<()> {
        let Some(image) = &self.image else {
            tracing::debug!("save requested with no image loaded");
            return Ok(());
        };
        codec::save_annotations(&image.path, self.boxes.entries(), image.width, image.height)?;
        Ok(())
    }

    /// Open an image directory: load or bootstrap its label mapping, then
    /// load the first image. Returns the number of images found.
    pub fn open_directory(&mut self, directory: &Path) -> EngineResult<usize> {
        let workspace = Workspace::open(directory)?;

        let mapping_path = directory.join(LABEL_MAPPING_FILE);
        let names = codec::load_label_mapping(&mapping_path).unwrap_or_else(|err| {
            tracing::warn!(?err, "label mapping unreadable, bootstrapping defaults");
            Vec::new()
        });
        if names.is_empty() {
            let palette = ClassPalette::with_default_class(&self.default_class_name);
            codec::save_label_mapping(palette.names(), &mapping_path)?;
            self.replace_palette(palette);
        } else {
            self.replace_palette(ClassPalette::from_names(names));
        }

        let first = workspace.current().map(Path::to_path_buf);
        let count = workspace.len();
        self.workspace = Some(workspace);
        if let Some(path) = first {
            self.load_image(&path)?;
        }
        Ok(count)
    }

    pub fn next_image(&mut self) -> EngineResult<bool> {
        self.navigate(NavigationStep::Next)
    }

    pub fn previous_image(&mut self) -> EngineResult<bool> {
        self.navigate(NavigationStep::Previous)
    }

    pub fn jump_to_image(&mut self, index: usize) -> EngineResult<bool> {
        self.navigate(NavigationStep::Jump(index))
    }

    fn navigate(&mut self, step: NavigationStep) -> EngineResult<bool> {
        let Some(workspace) = self.workspace.as_ref() else {
            return Ok(false);
        };
        let current = workspace.index();
        let possible = match step {
            NavigationStep::Next => current.is_some_and(|index| index + 1 < workspace.len()),
            NavigationStep::Previous => current.is_some_and(|index| index > 0),
            NavigationStep::Jump(target) => target < workspace.len() && current != Some(target),
        };
        if !possible {
            return Ok(false);
        }

        if self.autosave_on_navigate {
            self.save()?;
        }

        let Some(workspace) = self.workspace.as_mut() else {
            return Ok(false);
        };
        let path = match step {
            NavigationStep::Next => workspace.advance(),
            NavigationStep::Previous => workspace.retreat(),
            NavigationStep::Jump(target) => workspace.jump_to(target),
        }
        .map(Path::to_path_buf);

        match path {
            Some(path) => {
                self.load_image(&path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
