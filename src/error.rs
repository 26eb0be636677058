use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or writing the profile store.
#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("cannot resolve home directory")]
    NoHome,
    #[error("create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("serialize store: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Input rejected by a wizard field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum ValidationError {
    #[error("{0} is required")]
    Empty(&'static str),
    #[error("port must be a number between 1 and 65535")]
    Port,
}

/// The external terminal could not be started.
#[derive(Debug, Error)]
pub(crate) enum LaunchError {
    #[error("start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("no terminal program configured")]
    NoProgram,
}

/// A file the picker refuses to hand back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub(crate) enum PickerError {
    #[error("{} is not valid.", .0.display())]
    Disabled(PathBuf),
}
