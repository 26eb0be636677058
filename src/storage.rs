use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::model::ConnectionStore;

const DATA_DIR: &str = ".sshtui";
const DATA_FILE: &str = "ssh_tui.json";
const LOG_FILE: &str = "sshtui.log";

/// The store holds plaintext passwords, so only the owner may read it.
const PRIVATE_FILE_MODE: u32 = 0o600;

pub(crate) fn data_dir() -> Result<PathBuf, StorageError> {
    let mut dir = dirs::home_dir().ok_or(StorageError::NoHome)?;
    dir.push(DATA_DIR);
    Ok(dir)
}

pub(crate) fn data_path() -> Result<PathBuf, StorageError> {
    Ok(data_dir()?.join(DATA_FILE))
}

pub(crate) fn log_path() -> Result<PathBuf, StorageError> {
    Ok(data_dir()?.join(LOG_FILE))
}

/// Reads the store at `path`, writing an empty one first if the file does not exist.
pub(crate) fn load_store(path: &Path) -> Result<ConnectionStore, StorageError> {
    if !path.exists() {
        let store = ConnectionStore::empty(path.to_path_buf());
        save_store(&store)?;
    }
    let content = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut store: ConnectionStore =
        serde_json::from_str(&content).map_err(|source| StorageError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    store.path = path.to_path_buf();
    Ok(store)
}

/// Writes to a sibling temp file and renames it over the store.
pub(crate) fn save_store(store: &ConnectionStore) -> Result<(), StorageError> {
    let path = store.path.as_path();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let content = serde_json::to_string_pretty(store).map_err(StorageError::Serialize)?;
    let tmp = temp_path(path);
    fs::write(&tmp, content)
        .and_then(|()| set_private_mode(&tmp))
        .map_err(|source| {
            let _ = fs::remove_file(&tmp);
            StorageError::Write {
                path: tmp.clone(),
                source,
            }
        })?;
    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        StorageError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn set_private_mode(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(PRIVATE_FILE_MODE))?;
    }
    #[cfg(not(unix))]
    {
        let _ = (path, PRIVATE_FILE_MODE);
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
pub(crate) fn temp_store_path(tag: &str) -> PathBuf {
    let mut base = std::env::temp_dir();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    base.push(format!("sshtui-{tag}-{nanos}"));
    base.push(DATA_FILE);
    base
}
