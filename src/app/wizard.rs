use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::file_picker::{FilePicker, PickerOutcome};
use crate::error::{PickerError, ValidationError};
use crate::model::{ConnectionProfile, parse_port, require};

/// Wizard position. Text steps carry the buffer typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Name(String),
    Host(String),
    Port(String),
    User(String),
    AskKey(String),
    Key,
    Summary,
}

impl Step {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Step::Name(_) => "Name",
            Step::Host(_) => "Host",
            Step::Port(_) => "Port",
            Step::User(_) => "User",
            Step::AskKey(_) => "Key? (y/N)",
            Step::Key => "Private Key",
            Step::Summary => "Done",
        }
    }

    pub(crate) fn input(&self) -> Option<&str> {
        match self {
            Step::Name(input)
            | Step::Host(input)
            | Step::Port(input)
            | Step::User(input)
            | Step::AskKey(input) => Some(input),
            Step::Key | Step::Summary => None,
        }
    }

    fn input_mut(&mut self) -> Option<&mut String> {
        match self {
            Step::Name(input)
            | Step::Host(input)
            | Step::Port(input)
            | Step::User(input)
            | Step::AskKey(input) => Some(input),
            Step::Key | Step::Summary => None,
        }
    }

    /// Validates the buffer, records it in `draft` and returns the following step.
    /// `draft` is untouched on error.
    pub(crate) fn submit(&self, draft: &mut Draft) -> Result<Step, ValidationError> {
        match self {
            Step::Name(input) => {
                require("Name", input)?;
                draft.name = input.trim().to_string();
                Ok(Step::Host(String::new()))
            }
            Step::Host(input) => {
                require("Host", input)?;
                draft.host = input.trim().to_string();
                Ok(Step::Port(String::new()))
            }
            Step::Port(input) => {
                draft.port = parse_port(input.trim())?;
                Ok(Step::User(String::new()))
            }
            Step::User(input) => {
                require("User", input)?;
                draft.user = input.trim().to_string();
                Ok(Step::AskKey(String::new()))
            }
            Step::AskKey(input) => {
                if input == "y" || input == "Y" {
                    Ok(Step::Key)
                } else {
                    draft.key = None;
                    Ok(Step::Summary)
                }
            }
            Step::Key | Step::Summary => Ok(self.clone()),
        }
    }
}

/// Fields collected so far, already parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Draft {
    pub(crate) name: String,
    pub(crate) host: String,
    pub(crate) port: Option<u16>,
    pub(crate) user: String,
    pub(crate) key: Option<PathBuf>,
}

impl Draft {
    pub(crate) fn to_profile(&self) -> ConnectionProfile {
        ConnectionProfile {
            name: self.name.clone(),
            host: self.host.clone(),
            port: self.port.map(|port| port.to_string()).unwrap_or_default(),
            user: self.user.clone(),
            password: None,
            key: self
                .key
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned())
                .unwrap_or_default(),
            key_password: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PickerNotice {
    pub(crate) error: PickerError,
    pub(crate) generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WizardOutcome {
    Stay,
    /// A transient picker error is showing; clear it later with this generation.
    ScheduleClear(u64),
    Commit(ConnectionProfile),
    Cancel,
}

pub(crate) struct Wizard {
    step: Step,
    draft: Draft,
    picker: Box<dyn FilePicker>,
    picker_error: Option<PickerNotice>,
    generation: u64,
}

impl Wizard {
    pub(crate) fn new(picker: Box<dyn FilePicker>) -> Self {
        Self {
            step: Step::Name(String::new()),
            draft: Draft::default(),
            picker,
            picker_error: None,
            generation: 0,
        }
    }

    pub(crate) fn step(&self) -> &Step {
        &self.step
    }

    pub(crate) fn draft(&self) -> &Draft {
        &self.draft
    }

    pub(crate) fn picker(&self) -> &dyn FilePicker {
        self.picker.as_ref()
    }

    pub(crate) fn picker_error(&self) -> Option<&PickerNotice> {
        self.picker_error.as_ref()
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> WizardOutcome {
        if is_cancel(key) {
            return WizardOutcome::Cancel;
        }
        match self.step {
            Step::Key => return self.handle_picker_key(key),
            Step::Summary => {
                return match key.code {
                    KeyCode::Enter => WizardOutcome::Commit(self.draft.to_profile()),
                    _ => WizardOutcome::Stay,
                };
            }
            _ => {}
        }
        match key.code {
            KeyCode::Enter => {
                if let Ok(next) = self.step.submit(&mut self.draft) {
                    self.step = next;
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = self.step.input_mut() {
                    input.pop();
                }
            }
            KeyCode::Char(ch) if is_printable(key, ch) => {
                if let Some(input) = self.step.input_mut() {
                    input.push(ch);
                }
            }
            _ => {}
        }
        WizardOutcome::Stay
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> WizardOutcome {
        match self.picker.handle_key(key) {
            PickerOutcome::Pending => WizardOutcome::Stay,
            PickerOutcome::Selected(path) => {
                self.draft.key = Some(path);
                self.picker_error = None;
                self.step = Step::Summary;
                WizardOutcome::Stay
            }
            PickerOutcome::Disabled(path) => {
                self.generation += 1;
                self.picker_error = Some(PickerNotice {
                    error: PickerError::Disabled(path),
                    generation: self.generation,
                });
                WizardOutcome::ScheduleClear(self.generation)
            }
        }
    }

    /// Timer callback; ignored when a newer error replaced the one it was scheduled for.
    pub(crate) fn clear_picker_error(&mut self, generation: u64) {
        if self
            .picker_error
            .as_ref()
            .is_some_and(|notice| notice.generation == generation)
        {
            self.picker_error = None;
        }
    }

    pub(crate) fn resize(&mut self, rows: u16) {
        self.picker.set_height(rows.saturating_sub(1));
    }
}

fn is_cancel(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn is_printable(key: KeyEvent, ch: char) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) && !ch.is_control()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::file_picker::ScriptedPicker;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn wizard() -> Wizard {
        Wizard::new(Box::new(ScriptedPicker::default()))
    }

    fn wizard_with(outcomes: Vec<PickerOutcome>) -> Wizard {
        Wizard::new(Box::new(ScriptedPicker::new(outcomes)))
    }

    fn type_text(wizard: &mut Wizard, text: &str) {
        for ch in text.chars() {
            wizard.handle_key(key(KeyCode::Char(ch)));
        }
    }

    fn enter(wizard: &mut Wizard, text: &str) -> WizardOutcome {
        type_text(wizard, text);
        wizard.handle_key(key(KeyCode::Enter))
    }

    fn at_port() -> Wizard {
        let mut wizard = wizard();
        enter(&mut wizard, "db");
        enter(&mut wizard, "10.0.0.5");
        wizard
    }

    #[test]
    fn typing_and_backspace_edit_buffer() {
        let mut wizard = wizard();
        type_text(&mut wizard, "dbx");
        wizard.handle_key(key(KeyCode::Backspace));
        assert_eq!(wizard.step(), &Step::Name("db".to_string()));
        wizard.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));
        wizard.handle_key(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT));
        assert_eq!(wizard.step().input(), Some("db"));
        wizard.handle_key(KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT));
        assert_eq!(wizard.step().input(), Some("dbB"));
    }

    #[test]
    fn empty_required_fields_do_not_advance() {
        let mut wizard = wizard();
        enter(&mut wizard, "");
        assert_eq!(wizard.step(), &Step::Name(String::new()));
        enter(&mut wizard, "   ");
        assert_eq!(wizard.step().label(), "Name");
        wizard.handle_key(key(KeyCode::Backspace));
        wizard.handle_key(key(KeyCode::Backspace));
        wizard.handle_key(key(KeyCode::Backspace));
        enter(&mut wizard, "db");
        enter(&mut wizard, "");
        assert_eq!(wizard.step(), &Step::Host(String::new()));
        enter(&mut wizard, "h");
        enter(&mut wizard, "");
        enter(&mut wizard, "");
        assert_eq!(wizard.step(), &Step::User(String::new()));
    }

    #[test]
    fn invalid_ports_are_rejected_and_kept() {
        for bad in ["0", "65536", "abc", "99999", "+22", "0022"] {
            let mut wizard = at_port();
            enter(&mut wizard, bad);
            assert_eq!(wizard.step(), &Step::Port(bad.to_string()), "port {bad}");
        }
    }

    #[test]
    fn valid_or_empty_port_advances() {
        let mut wizard = at_port();
        enter(&mut wizard, "");
        assert_eq!(wizard.step(), &Step::User(String::new()));
        assert_eq!(wizard.draft().port, None);

        let mut wizard = at_port();
        enter(&mut wizard, "22");
        assert_eq!(wizard.step(), &Step::User(String::new()));
        assert_eq!(wizard.draft().port, Some(22));
    }

    #[test]
    fn rejected_port_can_be_corrected() {
        let mut wizard = at_port();
        enter(&mut wizard, "70000");
        for _ in 0..5 {
            wizard.handle_key(key(KeyCode::Backspace));
        }
        enter(&mut wizard, "2222");
        assert_eq!(wizard.draft().port, Some(2222));
    }

    #[test]
    fn ask_key_branches() {
        let mut wizard = at_port();
        enter(&mut wizard, "");
        enter(&mut wizard, "ops");
        enter(&mut wizard, "n");
        assert_eq!(wizard.step(), &Step::Summary);
        assert_eq!(wizard.draft().key, None);

        let mut wizard = at_port();
        enter(&mut wizard, "");
        enter(&mut wizard, "ops");
        enter(&mut wizard, "Y");
        assert_eq!(wizard.step(), &Step::Key);

        let mut wizard = at_port();
        enter(&mut wizard, "");
        enter(&mut wizard, "ops");
        enter(&mut wizard, "");
        assert_eq!(wizard.step(), &Step::Summary);
    }

    #[test]
    fn summary_commits_assembled_profile() {
        let mut wizard = wizard();
        enter(&mut wizard, "db");
        enter(&mut wizard, "10.0.0.5");
        enter(&mut wizard, "2222");
        enter(&mut wizard, "ops");
        enter(&mut wizard, "n");
        let outcome = wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(
            outcome,
            WizardOutcome::Commit(ConnectionProfile {
                name: "db".to_string(),
                host: "10.0.0.5".to_string(),
                port: "2222".to_string(),
                user: "ops".to_string(),
                password: None,
                key: String::new(),
                key_password: None,
            })
        );
    }

    #[test]
    fn summary_ignores_other_keys() {
        let mut wizard = at_port();
        enter(&mut wizard, "");
        enter(&mut wizard, "ops");
        enter(&mut wizard, "");
        assert_eq!(wizard.handle_key(key(KeyCode::Char('x'))), WizardOutcome::Stay);
        assert_eq!(wizard.step(), &Step::Summary);
    }

    #[test]
    fn cancel_from_any_step() {
        let mut wizard = wizard();
        assert_eq!(wizard.handle_key(key(KeyCode::Esc)), WizardOutcome::Cancel);
        let mut wizard = at_port();
        assert_eq!(
            wizard.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            WizardOutcome::Cancel
        );
        let mut wizard = at_port();
        enter(&mut wizard, "");
        enter(&mut wizard, "ops");
        enter(&mut wizard, "y");
        assert_eq!(wizard.handle_key(key(KeyCode::Esc)), WizardOutcome::Cancel);
    }

    #[test]
    fn key_step_forwards_to_picker_until_selection() {
        let picker = ScriptedPicker::new(vec![
            PickerOutcome::Pending,
            PickerOutcome::Selected(PathBuf::from("/home/ops/.ssh/id_ed25519")),
        ]);
        let log = picker.log();
        let mut wizard = Wizard::new(Box::new(picker));
        enter(&mut wizard, "db");
        enter(&mut wizard, "h");
        enter(&mut wizard, "");
        enter(&mut wizard, "ops");
        enter(&mut wizard, "y");
        assert_eq!(wizard.handle_key(key(KeyCode::Down)), WizardOutcome::Stay);
        assert_eq!(wizard.step(), &Step::Key);
        // backspace belongs to the picker here, not a text buffer
        wizard.handle_key(key(KeyCode::Backspace));
        assert_eq!(wizard.step(), &Step::Summary);
        assert_eq!(wizard.draft().to_profile().key, "/home/ops/.ssh/id_ed25519");
        assert_eq!(log.lock().unwrap().keys_seen, 2);
        // summary keys are not forwarded
        wizard.handle_key(key(KeyCode::Enter));
        assert_eq!(log.lock().unwrap().keys_seen, 2);
    }

    #[test]
    fn resize_sets_picker_height_below_status_row() {
        let picker = ScriptedPicker::default();
        let log = picker.log();
        let mut wizard = Wizard::new(Box::new(picker));
        wizard.resize(24);
        assert_eq!(log.lock().unwrap().height, 23);
        wizard.resize(0);
        assert_eq!(log.lock().unwrap().height, 0);
    }

    #[test]
    fn disabled_file_shows_transient_error() {
        let mut wizard = wizard_with(vec![
            PickerOutcome::Disabled(PathBuf::from("/dev/null")),
            PickerOutcome::Disabled(PathBuf::from("/dev/zero")),
        ]);
        enter(&mut wizard, "db");
        enter(&mut wizard, "h");
        enter(&mut wizard, "");
        enter(&mut wizard, "ops");
        enter(&mut wizard, "y");
        assert_eq!(wizard.handle_key(key(KeyCode::Enter)), WizardOutcome::ScheduleClear(1));
        assert_eq!(wizard.step(), &Step::Key);
        assert_eq!(
            wizard.picker_error().unwrap().error.to_string(),
            "/dev/null is not valid."
        );
        assert_eq!(wizard.handle_key(key(KeyCode::Enter)), WizardOutcome::ScheduleClear(2));
        wizard.clear_picker_error(1);
        assert!(wizard.picker_error().is_some());
        wizard.clear_picker_error(2);
        assert!(wizard.picker_error().is_none());
    }

    #[test]
    fn submit_leaves_draft_untouched_on_error() {
        let mut draft = Draft::default();
        let step = Step::Port("abc".to_string());
        assert_eq!(step.submit(&mut draft), Err(ValidationError::Port));
        assert_eq!(draft, Draft::default());
    }
}
