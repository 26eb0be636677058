use crate::error::StorageError;
use crate::model::ConnectionStore;
use crate::storage::save_store;

/// Where the running app persists the store after each mutation.
pub(crate) trait StoreBackend: Send + Sync {
    fn save(&self, store: &ConnectionStore) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub(crate) struct FileStoreBackend;

impl StoreBackend for FileStoreBackend {
    fn save(&self, store: &ConnectionStore) -> Result<(), StorageError> {
        save_store(store)
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct MockStoreBackend {
    saves: std::sync::Mutex<Vec<ConnectionStore>>,
    fail: std::sync::Mutex<bool>,
}

#[cfg(test)]
impl MockStoreBackend {
    pub(crate) fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub(crate) fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }

    pub(crate) fn last_saved(&self) -> Option<ConnectionStore> {
        self.saves.lock().unwrap().last().cloned()
    }
}

#[cfg(test)]
impl StoreBackend for MockStoreBackend {
    fn save(&self, store: &ConnectionStore) -> Result<(), StorageError> {
        if *self.fail.lock().unwrap() {
            return Err(StorageError::Write {
                path: store.path.clone(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.saves.lock().unwrap().push(store.clone());
        Ok(())
    }
}
