//! JSON record files
//!
//! Manifests and the pending cleanup are small JSON documents under the
//! profile-merge home. A record is replaced through a sibling `.tmp` file and a
//! rename, so a reader sees either the old record or the new one.

use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{MergeError, MergeResult};

/// Load a record; a missing file is `None`
pub fn load_record<T, P>(path: P) -> MergeResult<Option<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(MergeError::Storage(format!(
                "Cannot open record {}: {}",
                path.display(),
                err
            )))
        }
    };

    parse_record(path, file).map(Some)
}

/// Load a record that must exist, such as a manifest handed over for import
pub fn import_record<T, P>(path: P) -> MergeResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    load_record(path)?.ok_or_else(|| {
        MergeError::Storage(format!("Record file {} does not exist", path.display()))
    })
}

/// Replace a record, creating its directory when needed
pub fn save_record<T, P>(path: P, record: &T) -> MergeResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = serde_json::to_vec_pretty(record).map_err(|e| {
        MergeError::Storage(format!("Cannot encode record {}: {}", path.display(), e))
    })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            MergeError::Storage(format!("Cannot create {}: {}", parent.display(), e))
        })?;
    }

    let staging = staging_path(path);
    if let Err(err) = write_synced(&staging, &bytes).and_then(|()| fs::rename(&staging, path)) {
        let _ = fs::remove_file(&staging);
        return Err(MergeError::Storage(format!(
            "Cannot save record {}: {}",
            path.display(),
            err
        )));
    }

    Ok(())
}

/// Delete a record; returns whether one was there
pub fn discard_record<P: AsRef<Path>>(path: P) -> MergeResult<bool> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(MergeError::Storage(format!(
            "Cannot delete record {}: {}",
            path.display(),
            err
        ))),
    }
}

fn parse_record<T: DeserializeOwned>(path: &Path, file: File) -> MergeResult<T> {
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        MergeError::Storage(format!("Record {} is not valid: {}", path.display(), e))
    })
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// `pending_cleanup.json` stages as `pending_cleanup.json.tmp`
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
