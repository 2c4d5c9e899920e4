use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::annotation::BoxEntry;
use crate::palette::{ClassPalette, DEFAULT_CLASS_NAME};

/// Class names live next to the images, one per line, order = class index.
pub const LABEL_MAPPING_FILE: &str = "label-mapping.txt";

pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Box geometry and class parsed from one annotation line. Carries no id;
/// the box collection assigns one on insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub class_index: usize,
    pub class_label: String,
}

/// One normalized annotation line: class index plus center/size fractions of
/// the image dimensions, each to six decimal digits.
pub fn serialize_line(entry: &BoxEntry, image_width: u32, image_height: u32) -> String {
    let image_width = f64::from(image_width);
    let image_height = f64::from(image_height);
    let x_center = (entry.x + entry.width / 2.0) / image_width;
    let y_center = (entry.y + entry.height / 2.0) / image_height;
    let norm_width = entry.width / image_width;
    let norm_height = entry.height / image_height;
    format!(
        "{} {:.6} {:.6} {:.6} {:.6}",
        entry.class_index, x_center, y_center, norm_width, norm_height
    )
}

/// Parse one annotation line back into pixel-space geometry. Returns `None`
/// for anything that is not exactly five parseable tokens; malformed lines
/// are skipped, never fatal.
pub fn deserialize_line(
    line: &str,
    image_width: u32,
    image_height: u32,
    palette: &ClassPalette,
) -> Option<ParsedBox> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    if tokens.len() != 5 {
        return None;
    }

    let class_index = tokens[0].parse::<usize>().ok()?;
    let x_center = tokens[1].parse::<f64>().ok()?;
    let y_center = tokens[2].parse::<f64>().ok()?;
    let norm_width = tokens[3].parse::<f64>().ok()?;
    let norm_height = tokens[4].parse::<f64>().ok()?;

    let image_width = f64::from(image_width);
    let image_height = f64::from(image_height);
    let width = norm_width * image_width;
    let height = norm_height * image_height;
    let x = (x_center - norm_width / 2.0) * image_width;
    let y = (y_center - norm_height / 2.0) * image_height;

    let class_label = palette
        .name(class_index)
        .unwrap_or(DEFAULT_CLASS_NAME)
        .to_string();

    Some(ParsedBox {
        x,
        y,
        width,
        height,
        class_index,
        class_label,
    })
}

/// Sidecar annotation file for an image: same base name, `.txt` extension.
pub fn sidecar_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("txt")
}

/// Write every box as one line, newline-terminated, replacing the file.
pub fn save_annotations(
    image_path: &Path,
    entries: &[BoxEntry],
    image_width: u32,
    image_height: u32,
) -> PersistenceResult<()> {
    let path = sidecar_path(image_path);
    let mut contents = String::new();
    for entry in entries {
        contents.push_str(&serialize_line(entry, image_width, image_height));
        contents.push('\n');
    }
    fs::write(&path, contents).map_err(|source| PersistenceError::Write {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), boxes = entries.len(), "annotations saved");
    Ok(())
}

/// Read the sidecar file for an image. A missing file is an empty
/// annotation set; unparseable lines are skipped with a warning.
pub fn load_annotations(
    image_path: &Path,
    image_width: u32,
    image_height: u32,
    palette: &ClassPalette,
) -> PersistenceResult<Vec<ParsedBox>> {
    let path = sidecar_path(image_path);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(&path).map_err(|source| PersistenceError::Read {
        path: path.clone(),
        source,
    })?;

    let mut boxes = Vec::new();
    for (line_number, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match deserialize_line(line, image_width, image_height, palette) {
            Some(parsed) => boxes.push(parsed),
            None => {
                tracing::warn!(
                    path = %path.display(),
                    line = line_number + 1,
                    "skipping malformed annotation line"
                );
            }
        }
    }
    Ok(boxes)
}

/// Read the class list, skipping blank lines. A missing file is an empty
/// list.
pub fn load_label_mapping(path: &Path) -> PersistenceResult<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn save_label_mapping<'a, I>(names: I, path: &Path) -> PersistenceResult<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut contents = String::new();
    for name in names {
        contents.push_str(name);
        contents.push('\n');
    }
    fs::write(path, contents).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })
}
