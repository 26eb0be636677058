use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::FileEntry;

pub(crate) fn resolve_picker_start() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        return home;
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"))
}

/// Directories first, then files, each sorted case-insensitively.
pub(crate) fn read_dir_entries(dir: &Path, show_hidden: bool) -> Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).context("read dir")? {
        let entry = entry.context("read dir entry")?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !show_hidden && name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        // follows symlinks; a dangling link has no metadata
        let (is_dir, disabled) = match fs::metadata(&path) {
            Ok(meta) => (meta.is_dir(), !meta.is_dir() && !meta.is_file()),
            Err(_) => (false, true),
        };
        entries.push(FileEntry {
            name,
            path,
            is_dir,
            disabled,
        });
    }
    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}

/// A key file must be a regular file we can open.
pub(crate) fn is_selectable_file(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => fs::File::open(path).is_ok(),
        _ => false,
    }
}

#[cfg(test)]
pub(crate) fn temp_dir_with(tag: &str, files: &[&str], dirs: &[&str]) -> PathBuf {
    let mut base = std::env::temp_dir();
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    base.push(format!("sshtui-{tag}-{nanos}"));
    fs::create_dir_all(&base).unwrap();
    for dir in dirs {
        fs::create_dir_all(base.join(dir)).unwrap();
    }
    for file in files {
        fs::write(base.join(file), "key").unwrap();
    }
    base
}
