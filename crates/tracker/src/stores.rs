pub mod in_memory_order_store;
pub mod json_file_favorites_store;
pub mod json_file_order_store;

pub use in_memory_order_store::InMemoryOrderStore;
pub use json_file_favorites_store::JsonFileFavoritesStore;
pub use json_file_order_store::JsonFileOrderStore;

use base::errors::TrackerError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Replaces the file at `path` with `contents`.
///
/// The data is written to a temporary file next to the target and renamed over it,
/// so readers either see the old file or the complete new one.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), TrackerError> {
    let to_persistence_error = |source: std::io::Error| TrackerError::PersistenceWrite {
        path: path.to_path_buf(),
        source,
    };

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    fs::create_dir_all(&directory).map_err(to_persistence_error)?;

    let mut file = NamedTempFile::new_in(&directory).map_err(to_persistence_error)?;
    file.write_all(contents).map_err(to_persistence_error)?;
    file.as_file().sync_all().map_err(to_persistence_error)?;
    file.persist(path)
        .map_err(|e| to_persistence_error(e.error))?;

    Ok(())
}

/// Reads the file at `path`, treating a missing file as `None`.
pub(crate) fn read_if_exists(path: &Path) -> std::io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
