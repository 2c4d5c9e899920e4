use std::path::{Path, PathBuf};

use crate::source::{self, LoadResult};

/// An opened image directory: the ordered file list plus the cursor the
/// next/previous navigation moves. Pure bookkeeping; loading images and
/// autosaving around navigation belong to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    directory: PathBuf,
    files: Vec<PathBuf>,
    index: Option<usize>,
}

impl Workspace {
    pub fn open(directory: &Path) -> LoadResult<Self> {
        let files = source::list_image_files(directory)?;
        let index = if files.is_empty() { None } else { Some(0) };
        tracing::debug!(directory = %directory.display(), images = files.len(), "workspace opened");
        Ok(Self {
            directory: directory.to_path_buf(),
            files,
            index,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn current(&self) -> Option<&Path> {
        self.index.map(|index| self.files[index].as_path())
    }

    /// Step to the next image; `None` when already at the end.
    pub fn advance(&mut self) -> Option<&Path> {
        let index = self.index?;
        if index + 1 >= self.files.len() {
            return None;
        }
        self.index = Some(index + 1);
        self.current()
    }

    /// Step to the previous image; `None` when already at the start.
    pub fn retreat(&mut self) -> Option<&Path> {
        let index = self.index?;
        if index == 0 {
            return None;
        }
        self.index = Some(index - 1);
        self.current()
    }

    /// Jump to an arbitrary position, e.g. from a file-list sidebar.
    pub fn jump_to(&mut self, index: usize) -> Option<&Path> {
        if index >= self.files.len() {
            return None;
        }
        self.index = Some(index);
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn workspace_with(names: &[&str]) -> (PathBuf, Workspace) {
        let dir = std::env::temp_dir().join(format!("boxtag-workspace-{}", names.len()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("temp dir should create");
        for name in names {
            fs::write(dir.join(name), b"stub").expect("stub should write");
        }
        let workspace = Workspace::open(&dir).expect("workspace should open");
        (dir, workspace)
    }

    #[test]
    fn opening_positions_the_cursor_on_the_first_image() {
        let (dir, workspace) = workspace_with(&["b.png", "a.png", "c.png"]);
        assert_eq!(workspace.len(), 3);
        assert_eq!(
            workspace.current().and_then(|path| path.file_name()),
            Some(std::ffi::OsStr::new("a.png"))
        );
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn navigation_stops_at_both_ends() {
        let (dir, mut workspace) = workspace_with(&["a.png", "b.png"]);
        assert!(workspace.retreat().is_none());
        assert!(workspace.advance().is_some());
        assert!(workspace.advance().is_none());
        assert_eq!(workspace.index(), Some(1));
        assert!(workspace.retreat().is_some());
        assert_eq!(workspace.index(), Some(0));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn jump_rejects_out_of_range_positions() {
        let (dir, mut workspace) = workspace_with(&["a.png"]);
        assert!(workspace.jump_to(5).is_none());
        assert_eq!(workspace.index(), Some(0));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_directory_yields_no_cursor() {
        let dir = std::env::temp_dir().join("boxtag-workspace-empty");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("temp dir should create");
        let mut workspace = Workspace::open(&dir).expect("workspace should open");
        assert!(workspace.is_empty());
        assert!(workspace.current().is_none());
        assert!(workspace.advance().is_none());
        let _ = fs::remove_dir_all(&dir);
    }
}
