use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::app::constants::STATUS_READY;
use crate::app::file_picker::{HomePickerFactory, PickerFactory};
use crate::app::launcher::{CommandLauncher, ProcessLauncher};
use crate::app::list_view::ListView;
use crate::app::logging::prune_log_file;
use crate::app::store_backend::{FileStoreBackend, StoreBackend};
use crate::app::wizard::Wizard;
use crate::model::ConnectionStore;
use crate::storage::{data_path, load_store, log_path};

mod constants;
pub(crate) mod file_picker;
mod handlers;
mod helpers;
pub(crate) mod launcher;
pub(crate) mod list_view;
mod logging;
pub(crate) mod store_backend;
pub(crate) mod wizard;

/// The view that currently receives input.
pub(crate) enum ActiveView {
    List,
    Wizard(Wizard),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerEvent {
    ClearPickerError(u64),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Timer {
    pub(crate) due: Instant,
    pub(crate) event: TimerEvent,
}

pub(crate) struct App {
    pub(crate) store: ConnectionStore,
    pub(crate) list: ListView,
    pub(crate) active: ActiveView,
    pub(crate) log_path: PathBuf,
    pub(crate) log_lines: VecDeque<String>,
    pub(crate) terminal_rows: u16,
    pub(crate) timers: Vec<Timer>,
    launcher: Arc<dyn CommandLauncher>,
    store_backend: Arc<dyn StoreBackend>,
    pickers: Arc<dyn PickerFactory>,
}

impl App {
    /// Resolves the data file, loading or creating it. Any failure here is fatal.
    pub(crate) fn load() -> Result<Self> {
        let path = data_path().context("resolve data path")?;
        let store = load_store(&path).context("load connection store")?;
        let log_path = log_path().context("resolve log path")?;
        prune_log_file(&log_path);
        let mut app = Self::with_services(
            store,
            log_path,
            Arc::new(ProcessLauncher),
            Arc::new(FileStoreBackend),
            Arc::new(HomePickerFactory),
        );
        app.set_status(format!("{STATUS_READY} ({})", app.store.path.display()));
        Ok(app)
    }

    pub(crate) fn with_services(
        store: ConnectionStore,
        log_path: PathBuf,
        launcher: Arc<dyn CommandLauncher>,
        store_backend: Arc<dyn StoreBackend>,
        pickers: Arc<dyn PickerFactory>,
    ) -> Self {
        let list = ListView::new(store.ssh_entries.len());
        Self {
            store,
            list,
            active: ActiveView::List,
            log_path,
            log_lines: VecDeque::new(),
            terminal_rows: 0,
            timers: vec![],
            launcher,
            store_backend,
            pickers,
        }
    }

    pub(crate) fn wizard(&self) -> Option<&Wizard> {
        match &self.active {
            ActiveView::Wizard(wizard) => Some(wizard),
            ActiveView::List => None,
        }
    }
}

#[cfg(test)]
pub(crate) struct TestServices {
    pub(crate) launcher: Arc<launcher::RecordingLauncher>,
    pub(crate) backend: Arc<store_backend::MockStoreBackend>,
    pub(crate) pickers: Arc<file_picker::ScriptedPickerFactory>,
}

#[cfg(test)]
impl App {
    pub(crate) fn for_test() -> Self {
        Self::for_test_with(ConnectionStore::empty(PathBuf::from("/tmp/sshtui-test.json"))).0
    }

    pub(crate) fn for_test_with(store: ConnectionStore) -> (Self, TestServices) {
        let services = TestServices {
            launcher: Arc::new(launcher::RecordingLauncher::default()),
            backend: Arc::new(store_backend::MockStoreBackend::default()),
            pickers: Arc::new(file_picker::ScriptedPickerFactory::default()),
        };
        let mut log_path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        log_path.push(format!("sshtui-app-test-{nanos}.log"));
        let app = Self::with_services(
            store,
            log_path,
            services.launcher.clone(),
            services.backend.clone(),
            services.pickers.clone(),
        );
        (app, services)
    }
}
