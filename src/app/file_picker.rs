use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::constants::PICKER_PAGE_FALLBACK;
use crate::app::helpers::{is_selectable_file, read_dir_entries, resolve_picker_start};
use crate::model::FileEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PickerOutcome {
    Pending,
    Selected(PathBuf),
    Disabled(PathBuf),
}

/// Interactive file chooser used for the private key step.
pub(crate) trait FilePicker {
    fn handle_key(&mut self, key: KeyEvent) -> PickerOutcome;
    fn set_height(&mut self, rows: u16);
    fn draw(&self, frame: &mut Frame<'_>, area: Rect);
}

pub(crate) trait PickerFactory: Send + Sync {
    fn open(&self, rows: u16) -> Box<dyn FilePicker>;
}

#[derive(Debug, Default)]
pub(crate) struct HomePickerFactory;

impl PickerFactory for HomePickerFactory {
    fn open(&self, rows: u16) -> Box<dyn FilePicker> {
        Box::new(DirectoryPicker::open(resolve_picker_start(), rows))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DirectoryPicker {
    pub(crate) cwd: PathBuf,
    pub(crate) entries: Vec<FileEntry>,
    pub(crate) selected: usize,
    pub(crate) show_hidden: bool,
    pub(crate) height: u16,
    pub(crate) error: Option<String>,
}

impl DirectoryPicker {
    pub(crate) fn open(start: PathBuf, rows: u16) -> Self {
        let mut picker = Self {
            cwd: start,
            entries: vec![],
            selected: 0,
            show_hidden: true,
            height: rows,
            error: None,
        };
        picker.reload();
        picker
    }

    fn reload(&mut self) {
        match read_dir_entries(&self.cwd, self.show_hidden) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(err) => {
                self.entries.clear();
                self.error = Some(format!("{err:#}"));
            }
        }
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }

    fn change_dir(&mut self, dir: PathBuf) {
        self.cwd = dir;
        self.selected = 0;
        self.reload();
    }

    fn go_parent(&mut self) {
        let Some(parent) = self.cwd.parent().map(|p| p.to_path_buf()) else {
            return;
        };
        let previous = self.cwd.clone();
        self.change_dir(parent);
        if let Some(index) = self.entries.iter().position(|e| e.path == previous) {
            self.selected = index;
        }
    }

    fn page(&self) -> usize {
        match self.height.saturating_sub(4) {
            0 => PICKER_PAGE_FALLBACK,
            rows => rows as usize,
        }
    }

    fn open_selected(&mut self) -> PickerOutcome {
        let Some(entry) = self.entries.get(self.selected).cloned() else {
            return PickerOutcome::Pending;
        };
        if entry.is_dir {
            self.change_dir(entry.path);
            return PickerOutcome::Pending;
        }
        if entry.disabled || !is_selectable_file(&entry.path) {
            return PickerOutcome::Disabled(entry.path);
        }
        PickerOutcome::Selected(entry.path)
    }
}

impl FilePicker for DirectoryPicker {
    fn handle_key(&mut self, key: KeyEvent) -> PickerOutcome {
        let last = self.entries.len().saturating_sub(1);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected < last {
                    self.selected += 1;
                }
            }
            KeyCode::PageUp => {
                self.selected = self.selected.saturating_sub(self.page());
            }
            KeyCode::PageDown => {
                self.selected = (self.selected + self.page()).min(last);
            }
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = last,
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => self.go_parent(),
            KeyCode::Char('.') => {
                self.show_hidden = !self.show_hidden;
                self.reload();
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => return self.open_selected(),
            _ => {}
        }
        PickerOutcome::Pending
    }

    fn set_height(&mut self, rows: u16) {
        self.height = rows;
    }

    fn draw(&self, frame: &mut Frame<'_>, area: Rect) {
        crate::ui::pickers::draw_directory_picker(frame, area, self);
    }
}

/// What a `ScriptedPicker` has been told, readable after it is boxed.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct PickerLog {
    pub(crate) keys_seen: usize,
    pub(crate) height: u16,
}

/// Replays canned outcomes, one per key.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedPicker {
    outcomes: std::collections::VecDeque<PickerOutcome>,
    log: std::sync::Arc<std::sync::Mutex<PickerLog>>,
}

#[cfg(test)]
impl ScriptedPicker {
    pub(crate) fn new(outcomes: Vec<PickerOutcome>) -> Self {
        Self {
            outcomes: outcomes.into(),
            log: Default::default(),
        }
    }

    pub(crate) fn log(&self) -> std::sync::Arc<std::sync::Mutex<PickerLog>> {
        self.log.clone()
    }
}

#[cfg(test)]
impl FilePicker for ScriptedPicker {
    fn handle_key(&mut self, _key: KeyEvent) -> PickerOutcome {
        self.log.lock().unwrap().keys_seen += 1;
        self.outcomes.pop_front().unwrap_or(PickerOutcome::Pending)
    }

    fn set_height(&mut self, rows: u16) {
        self.log.lock().unwrap().height = rows;
    }

    fn draw(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(ratatui::widgets::Paragraph::new("scripted picker"), area);
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct ScriptedPickerFactory {
    outcomes: std::sync::Mutex<Vec<PickerOutcome>>,
    last: std::sync::Mutex<Option<std::sync::Arc<std::sync::Mutex<PickerLog>>>>,
}

#[cfg(test)]
impl ScriptedPickerFactory {
    pub(crate) fn set_outcomes(&self, outcomes: Vec<PickerOutcome>) {
        *self.outcomes.lock().unwrap() = outcomes;
    }

    /// Height last given to the most recently opened picker.
    pub(crate) fn last_height(&self) -> Option<u16> {
        self.last
            .lock()
            .unwrap()
            .as_ref()
            .map(|log| log.lock().unwrap().height)
    }
}

#[cfg(test)]
impl PickerFactory for ScriptedPickerFactory {
    fn open(&self, rows: u16) -> Box<dyn FilePicker> {
        let mut picker = ScriptedPicker::new(self.outcomes.lock().unwrap().clone());
        picker.set_height(rows);
        *self.last.lock().unwrap() = Some(picker.log());
        Box::new(picker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::helpers::temp_dir_with;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_on_directory_descends() {
        let dir = temp_dir_with("descend", &["inner/id_rsa"], &["inner"]);
        let mut picker = DirectoryPicker::open(dir.clone(), 20);
        assert_eq!(picker.entries[0].name, "inner");
        assert_eq!(picker.handle_key(key(KeyCode::Enter)), PickerOutcome::Pending);
        assert_eq!(picker.cwd, dir.join("inner"));
        assert_eq!(
            picker.handle_key(key(KeyCode::Enter)),
            PickerOutcome::Selected(dir.join("inner").join("id_rsa"))
        );
    }

    #[test]
    fn backspace_returns_to_parent_and_reselects() {
        let dir = temp_dir_with("parent", &[], &["a", "b"]);
        let mut picker = DirectoryPicker::open(dir.clone(), 20);
        picker.handle_key(key(KeyCode::Down));
        picker.handle_key(key(KeyCode::Enter));
        assert_eq!(picker.cwd, dir.join("b"));
        picker.handle_key(key(KeyCode::Backspace));
        assert_eq!(picker.cwd, dir);
        assert_eq!(picker.selected, 1);
    }

    #[test]
    fn cursor_is_clamped() {
        let dir = temp_dir_with("clamp", &["one", "two"], &[]);
        let mut picker = DirectoryPicker::open(dir, 20);
        picker.handle_key(key(KeyCode::Up));
        assert_eq!(picker.selected, 0);
        for _ in 0..5 {
            picker.handle_key(key(KeyCode::Down));
        }
        assert_eq!(picker.selected, 1);
        picker.handle_key(key(KeyCode::PageUp));
        assert_eq!(picker.selected, 0);
        picker.handle_key(key(KeyCode::PageDown));
        assert_eq!(picker.selected, 1);
    }

    #[test]
    fn dot_toggles_hidden_entries() {
        let dir = temp_dir_with("dot", &[".secret", "visible"], &[]);
        let mut picker = DirectoryPicker::open(dir, 20);
        assert_eq!(picker.entries.len(), 2);
        picker.handle_key(key(KeyCode::Char('.')));
        assert!(!picker.show_hidden);
        assert_eq!(picker.entries.len(), 1);
    }

    #[test]
    fn missing_directory_shows_error() {
        let dir = temp_dir_with("missing", &[], &[]).join("gone");
        let mut picker = DirectoryPicker::open(dir, 20);
        assert!(picker.error.is_some());
        assert!(picker.entries.is_empty());
        assert_eq!(picker.handle_key(key(KeyCode::Enter)), PickerOutcome::Pending);
    }

    #[cfg(unix)]
    #[test]
    fn selecting_dangling_link_is_disabled() {
        let dir = temp_dir_with("disabled", &[], &[]);
        std::os::unix::fs::symlink(dir.join("missing"), dir.join("broken")).unwrap();
        let mut picker = DirectoryPicker::open(dir.clone(), 20);
        assert_eq!(
            picker.handle_key(key(KeyCode::Enter)),
            PickerOutcome::Disabled(dir.join("broken"))
        );
    }
}
