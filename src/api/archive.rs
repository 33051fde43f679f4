//! Turns a local path into an upload payload.
//!
//! Directories are packed into an in-memory tar; single files are sent as-is.

use std::path::Path;
use tracing::debug;

use crate::error::{OpcliError, Result};

/// Bytes ready for upload, with the file name the server will see
#[derive(Debug)]
pub struct Payload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub fn prepare(path: &Path) -> Result<Payload> {
    if !path.exists() {
        return Err(OpcliError::PathNotFound(path.to_path_buf()));
    }

    let base_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());

    if path.is_dir() {
        let bytes = tar_directory(path)?;
        debug!("Packed {:?} into {} byte tar", path, bytes.len());
        Ok(Payload {
            file_name: format!("{base_name}.tar"),
            bytes,
        })
    } else {
        let bytes = std::fs::read(path)?;
        Ok(Payload {
            file_name: base_name,
            bytes,
        })
    }
}

fn tar_directory(path: &Path) -> Result<Vec<u8>> {
    let mut builder = tar::Builder::new(Vec::new());
    builder.follow_symlinks(true);
    builder.append_dir_all(".", path)?;
    Ok(builder.into_inner()?)
}
