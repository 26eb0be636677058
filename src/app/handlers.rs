use std::time::Instant;

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::app::constants::{PICKER_ERROR_TTL, STATUS_CANCELLED, STATUS_NEW_CONNECTION};
use crate::app::launcher::ssh_args;
use crate::app::list_view::ListOutcome;
use crate::app::wizard::{Wizard, WizardOutcome};
use crate::app::{ActiveView, App, Timer, TimerEvent};
use crate::model::ConnectionProfile;

impl App {
    /// Routes a key to the active view. Returns true when the app should quit.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        if let ActiveView::Wizard(wizard) = &mut self.active {
            let outcome = wizard.handle_key(key);
            self.run_wizard_outcome(outcome);
            return false;
        }
        let outcome = self.list.handle_key(key, &mut self.store);
        self.run_list_outcome(outcome)
    }

    pub(crate) fn handle_resize(&mut self, rows: u16) {
        self.terminal_rows = rows;
        if let ActiveView::Wizard(wizard) = &mut self.active {
            wizard.resize(rows);
        }
    }

    /// Delivers every timer whose deadline has passed.
    pub(crate) fn fire_due_timers(&mut self, now: Instant) {
        let (due, pending): (Vec<Timer>, Vec<Timer>) =
            self.timers.drain(..).partition(|timer| timer.due <= now);
        self.timers = pending;
        for timer in due {
            self.handle_timer(timer.event);
        }
    }

    pub(crate) fn next_timer_due(&self) -> Option<Instant> {
        self.timers.iter().map(|timer| timer.due).min()
    }

    fn handle_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::ClearPickerError(generation) => {
                if let ActiveView::Wizard(wizard) = &mut self.active {
                    wizard.clear_picker_error(generation);
                }
            }
        }
    }

    fn run_list_outcome(&mut self, outcome: ListOutcome) -> bool {
        match outcome {
            ListOutcome::Stay => {}
            ListOutcome::Persist(message) => self.persist(message),
            ListOutcome::Launch(profile) => self.launch(&profile),
            ListOutcome::OpenWizard => {
                let picker = self.pickers.open(self.terminal_rows.saturating_sub(1));
                self.active = ActiveView::Wizard(Wizard::new(picker));
                self.set_status(STATUS_NEW_CONNECTION);
            }
            ListOutcome::Quit => return true,
        }
        false
    }

    fn run_wizard_outcome(&mut self, outcome: WizardOutcome) {
        match outcome {
            WizardOutcome::Stay => {}
            WizardOutcome::ScheduleClear(generation) => {
                if let Some(notice) = self.wizard().and_then(|w| w.picker_error()) {
                    let message = notice.error.to_string();
                    self.log_line(&message);
                }
                self.timers.push(Timer {
                    due: Instant::now() + PICKER_ERROR_TTL,
                    event: TimerEvent::ClearPickerError(generation),
                });
            }
            WizardOutcome::Commit(profile) => {
                self.close_wizard();
                self.add_connection(profile);
            }
            WizardOutcome::Cancel => {
                self.close_wizard();
                self.set_status(STATUS_CANCELLED);
            }
        }
    }

    fn close_wizard(&mut self) {
        self.active = ActiveView::List;
        self.timers.clear();
    }

    fn add_connection(&mut self, profile: ConnectionProfile) {
        if let Err(err) = profile.validate() {
            self.set_status(format!("Connection not saved: {err}"));
            return;
        }
        let message = format!("Saved connection {}", profile.name);
        self.store.ssh_entries.push(profile);
        self.list.clamp(self.store.ssh_entries.len());
        self.persist(message);
    }

    /// Saves the store. Failures are reported; the in-memory store is kept either way.
    fn persist(&mut self, success: impl Into<String>) {
        match self.store_backend.save(&self.store) {
            Ok(()) => self.set_status(success),
            Err(err) => self.set_status(format!("Save failed: {err}")),
        }
    }

    fn launch(&mut self, profile: &ConnectionProfile) {
        let args = ssh_args(profile);
        match self.launcher.launch(&self.store.terminal_name, &args) {
            Ok(()) => self.set_status(format!(
                "Opened {} in {}",
                profile.name, self.store.terminal_name
            )),
            Err(err) => self.set_status(format!("Launch failed: {err}")),
        }
    }
}
