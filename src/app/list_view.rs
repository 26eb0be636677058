use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::constants::{STATUS_HIDDEN, STATUS_REMOVED, STATUS_SHOWN};
use crate::model::{ConnectionProfile, ConnectionStore};

/// Side effect the app runs after the list view handled a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListOutcome {
    Stay,
    /// The store changed; save it and report the message.
    Persist(&'static str),
    Launch(ConnectionProfile),
    OpenWizard,
    Quit,
}

/// Root screen state. `cursor` is `None` exactly when there are no entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ListView {
    cursor: Option<usize>,
}

impl ListView {
    pub(crate) fn new(len: usize) -> Self {
        let mut view = Self::default();
        view.clamp(len);
        view
    }

    pub(crate) fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub(crate) fn clamp(&mut self, len: usize) {
        self.cursor = match (self.cursor, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(index), len) => Some(index.min(len - 1)),
        };
    }

    pub(crate) fn move_up(&mut self) {
        if let Some(index) = self.cursor.as_mut() {
            *index = index.saturating_sub(1);
        }
    }

    pub(crate) fn move_down(&mut self, len: usize) {
        if let Some(index) = self.cursor.as_mut() {
            if *index + 1 < len {
                *index += 1;
            }
        }
    }

    /// Removes the entry under the cursor. Returns false when the list is empty.
    pub(crate) fn delete_selected(&mut self, store: &mut ConnectionStore) -> bool {
        let Some(index) = self.cursor.filter(|&i| i < store.ssh_entries.len()) else {
            return false;
        };
        store.ssh_entries.remove(index);
        self.clamp(store.ssh_entries.len());
        true
    }

    pub(crate) fn selected<'a>(&self, store: &'a ConnectionStore) -> Option<&'a ConnectionProfile> {
        self.cursor.and_then(|index| store.ssh_entries.get(index))
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent, store: &mut ConnectionStore) -> ListOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => ListOutcome::Quit,
                _ => ListOutcome::Stay,
            };
        }
        match key.code {
            KeyCode::Char('q') => ListOutcome::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_up();
                ListOutcome::Stay
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_down(store.ssh_entries.len());
                ListOutcome::Stay
            }
            KeyCode::Home => {
                store.hide_data = !store.hide_data;
                ListOutcome::Persist(if store.hide_data {
                    STATUS_HIDDEN
                } else {
                    STATUS_SHOWN
                })
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.selected(store) {
                Some(profile) => ListOutcome::Launch(profile.clone()),
                None => ListOutcome::Stay,
            },
            KeyCode::Char('n') => ListOutcome::OpenWizard,
            KeyCode::Char('d') => {
                if self.delete_selected(store) {
                    ListOutcome::Persist(STATUS_REMOVED)
                } else {
                    ListOutcome::Stay
                }
            }
            _ => ListOutcome::Stay,
        }
    }
}
