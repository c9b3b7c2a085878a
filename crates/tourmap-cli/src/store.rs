//! JSON persistence for the tour output and the completed-tour list.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tourmap_core::TourRecord;

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Reads a persisted tour array.
///
/// Records missing `details` or `geocode` read back with empty defaults.
pub(crate) fn load_tours(path: &Path) -> Result<Vec<TourRecord>, StoreError> {
    let raw = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Output of a previous run, for resuming.
///
/// A missing file is an empty prior set; an unreadable or unparseable one is
/// logged and also treated as empty.
pub(crate) fn load_prior_tours(path: &Path) -> Vec<TourRecord> {
    match load_tours(path) {
        Ok(tours) => {
            tracing::info!(path = %path.display(), count = tours.len(), "loaded {} tours from previous run", tours.len());
            tours
        }
        Err(e) if e.is_not_found() => {
            tracing::info!(path = %path.display(), "no previous output; starting fresh");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable previous output");
            Vec::new()
        }
    }
}

/// Writes `tours` as pretty JSON with a trailing newline.
///
/// Parent directories are created. The data goes to a temp file in the
/// target directory first and is renamed into place, so readers never see a
/// truncated file.
pub(crate) fn save_tours(path: &Path, tours: &[TourRecord]) -> Result<(), StoreError> {
    let mut json = serde_json::to_string_pretty(tours).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;

    let file_name = path
        .file_name()
        .map_or_else(|| "tours.json".into(), |n| n.to_string_lossy().into_owned());
    let tmp_path = dir.join(format!(".{file_name}.tmp-{}", std::process::id()));

    let write_tmp = || -> io::Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()
    };
    if let Err(e) = write_tmp() {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::io(&tmp_path, e));
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StoreError::io(path, e)
    })
}

/// An entry in `completed.json`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CompletedTour {
    pub title: String,
    #[serde(default, rename = "completedDate")]
    pub completed_date: Option<String>,
}

/// Reads the completed-tour list. Missing or invalid files yield an empty
/// list, logged.
pub(crate) fn load_completed(path: &Path) -> Vec<CompletedTour> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read completed tours");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<CompletedTour>>(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "completed tours file is not an array of {{title}} objects");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
