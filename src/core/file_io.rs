use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::error::{GridError, GridResult};

/**
 * File name for the frame rendered at `(ca, cb)`. Both coordinates are rounded to two
 * decimal places, so distinct points that round to the same string share a file.
 */
pub fn frame_file_name(ca: f64, cb: f64) -> String {
    format!("ca_{:.2}_cb_{:.2}.png", ca, cb)
}

/**
 * Store an output root and a sub-directory together, making it easy to generate
 * both the on-disk path of a file and the relative path that the gallery links to.
 */
#[derive(Clone, Debug)]
pub struct FilePrefix {
    pub directory_path: PathBuf,
    pub sub_directory: String,
}

impl FilePrefix {
    pub fn new(directory_path: impl Into<PathBuf>, sub_directory: &str) -> FilePrefix {
        FilePrefix {
            directory_path: directory_path.into(),
            sub_directory: sub_directory.to_owned(),
        }
    }

    pub fn sub_directory_path(&self) -> PathBuf {
        self.directory_path.join(&self.sub_directory)
    }

    /// Path of `file_name` on disk.
    pub fn full_path(&self, file_name: &str) -> PathBuf {
        self.sub_directory_path().join(file_name)
    }

    /// Path of `file_name` relative to the output root, always '/' separated.
    pub fn relative_path(&self, file_name: &str) -> String {
        if self.sub_directory.is_empty() {
            file_name.to_owned()
        } else {
            format!("{}/{}", self.sub_directory, file_name)
        }
    }

    pub fn create_sub_directory(&self) -> GridResult<()> {
        create_directory(&self.sub_directory_path())
    }
}

pub fn create_directory(path: &Path) -> GridResult<()> {
    std::fs::create_dir_all(path).map_err(|err| GridError::io(path, err))
}

pub fn read_text_file(path: &Path) -> GridResult<String> {
    std::fs::read_to_string(path).map_err(|err| GridError::io(path, err))
}

pub fn write_text_file(path: &Path, contents: &str) -> GridResult<()> {
    std::fs::write(path, contents).map_err(|err| GridError::io(path, err))?;
    tracing::info!("Wrote file to: {}", path.display());
    Ok(())
}

/// Serialize with a four-space indent.
pub fn to_indented_json<T: Serialize>(data: &T) -> GridResult<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    data.serialize(&mut serializer)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn serialize_to_json<T: Serialize>(path: &Path, data: &T) -> GridResult<()> {
    write_text_file(path, &to_indented_json(data)?)
}
