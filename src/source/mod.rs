use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::annotation::ImageContext;

/// Extensions the directory lister accepts, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

pub type LoadResult<T> = std::result::Result<T, LoadError>;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("could not list directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read an image's pixel dimensions without decoding the full raster.
pub fn probe_image(path: &Path) -> LoadResult<ImageContext> {
    let (width, height) = image::image_dimensions(path).map_err(|source| LoadError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ImageContext::new(path, width, height))
}

pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|candidate| extension.eq_ignore_ascii_case(candidate))
        })
}

/// All image files directly inside `directory`, lexicographically sorted.
pub fn list_image_files(directory: &Path) -> LoadResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(directory).map_err(|source| LoadError::Directory {
        path: directory.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Directory {
            path: directory.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && is_image_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
