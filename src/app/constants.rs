use std::time::Duration;

pub(crate) const STATUS_READY: &str = "Ready";
pub(crate) const STATUS_CANCELLED: &str = "Cancelled";
pub(crate) const STATUS_NEW_CONNECTION: &str = "Fill in the fields, Enter to continue";
pub(crate) const STATUS_REMOVED: &str = "Connection removed";
pub(crate) const STATUS_HIDDEN: &str = "Sensitive data hidden";
pub(crate) const STATUS_SHOWN: &str = "Sensitive data shown";

pub(crate) const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub(crate) const LOG_SEPARATOR: &str = " | ";
pub(crate) const LOG_NO_LOGS_MESSAGE: &str = "No logs yet";

pub(crate) const LOG_RETENTION_DAYS: i64 = 7;
pub(crate) const LOG_MAX_ENTRIES: usize = 10_000;
pub(crate) const LOG_MAX_IN_MEMORY: usize = 100;

pub(crate) const PICKER_ERROR_TTL: Duration = Duration::from_secs(2);
pub(crate) const PICKER_PAGE_FALLBACK: usize = 10;
