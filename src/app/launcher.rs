use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::JoinHandle;

use crate::error::LaunchError;
use crate::model::ConnectionProfile;

/// Starts an external program without waiting for it.
pub(crate) trait CommandLauncher: Send + Sync {
    fn launch(&self, program: &str, args: &[String]) -> Result<(), LaunchError>;
}

/// Spawns the program in its own process group so it outlives us.
#[derive(Debug, Default)]
pub(crate) struct ProcessLauncher;

impl CommandLauncher for ProcessLauncher {
    fn launch(&self, program: &str, args: &[String]) -> Result<(), LaunchError> {
        if program.trim().is_empty() {
            return Err(LaunchError::NoProgram);
        }
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }
        spawn_reaped(&mut command).map_err(|source| LaunchError::Spawn {
            program: program.to_string(),
            source,
        })?;
        Ok(())
    }
}

/// Spawns the command and reaps it on a background thread, so exited
/// terminals do not linger as zombies while the list stays open.
fn spawn_reaped(command: &mut Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command.spawn()?;
    Ok(std::thread::spawn(move || child.wait()))
}

pub(crate) fn ssh_args(profile: &ConnectionProfile) -> Vec<String> {
    let mut args = vec![
        "ssh".to_string(),
        format!("{}@{}", profile.user, profile.host),
    ];
    if !profile.port.is_empty() {
        args.push("-p".to_string());
        args.push(profile.port.clone());
    }
    if !profile.key.is_empty() {
        args.push("-i".to_string());
        args.push(profile.key.clone());
    }
    args
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingLauncher {
    launched: std::sync::Mutex<Vec<(String, Vec<String>)>>,
    fail: std::sync::Mutex<bool>,
}

#[cfg(test)]
impl RecordingLauncher {
    pub(crate) fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub(crate) fn launched(&self) -> Vec<(String, Vec<String>)> {
        self.launched.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl CommandLauncher for RecordingLauncher {
    fn launch(&self, program: &str, args: &[String]) -> Result<(), LaunchError> {
        if *self.fail.lock().unwrap() {
            return Err(LaunchError::Spawn {
                program: program.to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        self.launched
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        Ok(())
    }
}
