use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{Datelike, NaiveDateTime};

use crate::app::App;
use crate::app::constants::{
    LOG_MAX_ENTRIES, LOG_MAX_IN_MEMORY, LOG_NO_LOGS_MESSAGE, LOG_RETENTION_DAYS, LOG_SEPARATOR,
    LOG_TIMESTAMP_FORMAT,
};

impl App {
    pub(crate) fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.log_line(&message);
    }

    pub(crate) fn last_log(&self) -> &str {
        self.log_lines
            .back()
            .map(String::as_str)
            .unwrap_or(LOG_NO_LOGS_MESSAGE)
    }

    /// Most recent `count` log lines, oldest first.
    pub(crate) fn recent_logs(&self, count: usize) -> impl Iterator<Item = &str> {
        let skip = self.log_lines.len().saturating_sub(count);
        self.log_lines.iter().skip(skip).map(String::as_str)
    }

    pub(super) fn log_line(&mut self, message: &str) {
        let timestamp = chrono::Local::now().format(LOG_TIMESTAMP_FORMAT);
        let line = format!("{timestamp}{LOG_SEPARATOR}{message}");
        if let Some(parent) = self.log_path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(mut file) = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
        {
            let _ = writeln!(file, "{line}");
        }
        self.log_lines.push_back(line);
        while self.log_lines.len() > LOG_MAX_IN_MEMORY {
            self.log_lines.pop_front();
        }
    }
}

/// Drops lines older than the retention window and caps the file length.
pub(crate) fn prune_log_file(path: &Path) {
    prune_log_file_at(path, chrono::Local::now().naive_local());
}

fn prune_log_file_at(path: &Path, now: NaiveDateTime) {
    let Ok(content) = fs::read_to_string(path) else {
        return;
    };
    let cutoff = now - chrono::Duration::days(LOG_RETENTION_DAYS);
    let mut kept: Vec<&str> = content
        .lines()
        .filter(|line| {
            line.split_once(LOG_SEPARATOR)
                .and_then(|(timestamp, _)| parse_log_time(timestamp, now))
                .is_some_and(|written| written >= cutoff)
        })
        .collect();
    if kept.len() > LOG_MAX_ENTRIES {
        kept.drain(..kept.len() - LOG_MAX_ENTRIES);
    }
    if kept.is_empty() {
        let _ = fs::remove_file(path);
    } else {
        let _ = fs::write(path, kept.join("\n") + "\n");
    }
}

/// Year-less legacy stamps take the most recent year that is not in the future.
fn parse_log_time(timestamp: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    if let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, LOG_TIMESTAMP_FORMAT) {
        return Some(parsed);
    }
    let year = now.year();
    let parsed =
        NaiveDateTime::parse_from_str(&format!("{year}-{timestamp}"), LOG_TIMESTAMP_FORMAT).ok()?;
    if parsed <= now {
        return Some(parsed);
    }
    NaiveDateTime::parse_from_str(&format!("{}-{timestamp}", year - 1), LOG_TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log_path() -> std::path::PathBuf {
        let mut base = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        base.push(format!("sshtui-log-test-{nanos}.log"));
        base
    }

    #[test]
    fn prune_log_file_removes_old_entries() {
        let path = temp_log_path();
        let now = chrono::Local::now().naive_local();
        let old = now - chrono::Duration::days(LOG_RETENTION_DAYS + 1);
        let recent = now - chrono::Duration::days(1);
        let old_line = format!("{}{}old", old.format(LOG_TIMESTAMP_FORMAT), LOG_SEPARATOR);
        let recent_line = format!("{}{}recent", recent.format(LOG_TIMESTAMP_FORMAT), LOG_SEPARATOR);
        fs::write(&path, format!("{old_line}\n{recent_line}\n")).unwrap();
        prune_log_file(&path);
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("old"));
        assert!(content.contains("recent"));
    }

    fn at(stamp: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(stamp, LOG_TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn prune_log_file_handles_year_boundary() {
        let path = temp_log_path();
        let lines = [
            "2025-12-28 10:00:00 | late december",
            "2025-12-01 10:00:00 | early december",
            "12-30 08:00:00 | legacy recent",
            "06-01 08:00:00 | legacy stale",
            "garbage without stamp",
        ];
        fs::write(&path, lines.join("\n") + "\n").unwrap();
        prune_log_file_at(&path, at("2026-01-03 12:00:00"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("late december"));
        assert!(content.contains("legacy recent"));
        assert!(!content.contains("early december"));
        assert!(!content.contains("legacy stale"));
        assert!(!content.contains("garbage"));
    }

    #[test]
    fn legacy_stamp_never_lands_in_the_future() {
        let now = at("2026-01-03 12:00:00");
        assert_eq!(parse_log_time("12-28 10:00:00", now), Some(at("2025-12-28 10:00:00")));
        assert_eq!(parse_log_time("01-02 10:00:00", now), Some(at("2026-01-02 10:00:00")));
        assert_eq!(parse_log_time("not a time", now), None);
    }

    #[test]
    fn prune_log_file_caps_entry_count() {
        let path = temp_log_path();
        let now = at("2026-03-01 12:00:00");
        let lines: Vec<String> = (0..LOG_MAX_ENTRIES + 3)
            .map(|i| format!("2026-03-01 11:00:00{LOG_SEPARATOR}entry {i}"))
            .collect();
        fs::write(&path, lines.join("\n")).unwrap();
        prune_log_file_at(&path, now);
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), LOG_MAX_ENTRIES);
        assert!(!content.contains("entry 2\n"));
        assert!(content.ends_with(&format!("entry {}\n", LOG_MAX_ENTRIES + 2)));
    }

    #[test]
    fn set_status_updates_last_log_and_file() {
        let mut app = App::for_test();
        assert_eq!(app.last_log(), LOG_NO_LOGS_MESSAGE);
        app.set_status("hello there");
        assert!(app.last_log().ends_with("hello there"));
        assert_eq!(app.log_lines.len(), 1);
        let content = fs::read_to_string(&app.log_path).unwrap();
        assert!(content.contains("hello there"));
    }

    #[test]
    fn log_lines_are_capped_in_memory() {
        let mut app = App::for_test();
        for i in 0..(LOG_MAX_IN_MEMORY + 5) {
            app.set_status(format!("line {i}"));
        }
        assert_eq!(app.log_lines.len(), LOG_MAX_IN_MEMORY);
        assert!(app.log_lines.back().unwrap().ends_with(&format!("line {}", LOG_MAX_IN_MEMORY + 4)));
    }
}
