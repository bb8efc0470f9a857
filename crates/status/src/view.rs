//! Window contents derived from a status snapshot.

use chrono::{Local, TimeZone};

use crate::snapshot::{Action, InternetStatus, Server, Snapshot};

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;

/// Date format of the last-backup line (`MM/DD/YYYY hh:mm:ss AM/PM`).
const LAST_BACKUP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Everything the window shows, as plain values.
///
/// Rebuilt from scratch for every poll result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub status_text: String,
    pub eta_text: String,
    /// Progress bar value, 0-100.
    pub progress: u8,
    pub last_backup_text: String,
    /// One line per known server.
    pub servers: Vec<String>,
    pub connection_text: String,
}

impl Default for StatusView {
    /// The unknown state.
    fn default() -> Self {
        Self {
            status_text: "Could not get status!".into(),
            eta_text: String::new(),
            progress: 0,
            last_backup_text: String::new(),
            servers: Vec::new(),
            connection_text: "Unknown".into(),
        }
    }
}

impl StatusView {
    /// Renders a poll result with last-backup times in local time.
    pub fn render(status: Option<&Snapshot>) -> Self {
        Self::render_in(status, &Local)
    }

    /// Renders a poll result with last-backup times in `tz`.
    pub fn render_in<Tz>(status: Option<&Snapshot>, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let Some(snap) = status else {
            return Self::default();
        };

        let (action, progress_text, progress, eta) = match snap.current_process() {
            Some(proc) if proc.is_indexing() => {
                (proc.action, "Indexing.".to_string(), 0, proc.known_eta_ms())
            }
            Some(proc) => (
                proc.action,
                format!("{}% done.", proc.percent_done),
                proc.percent_done.clamp(0, 100) as u8,
                proc.known_eta_ms(),
            ),
            None => (Action::Idle, String::new(), 0, None),
        };

        let eta_text = eta
            .map(|ms| format!("ETA: {}", format_eta(ms)))
            .unwrap_or_default();

        let last_backup_text = snap
            .last_backup_time
            .and_then(|ts| format_timestamp(ts, tz))
            .map(|date| format!("Last backup on {date}"))
            .unwrap_or_default();

        Self {
            status_text: format!("{} {progress_text}", action.description()),
            eta_text,
            progress,
            last_backup_text,
            servers: snap.servers.iter().map(server_line).collect(),
            connection_text: connection_text(
                &snap.internet_status,
                snap.time_since_last_lan_connection,
            ),
        }
    }

    /// Progress as a fraction for bar widgets.
    pub fn progress_fraction(&self) -> f32 {
        f32::from(self.progress) / 100.0
    }
}

/// Formats a remaining time as `H hours M minutes`.
///
/// Minutes are the remainder after whole hours.
pub fn format_eta(eta_ms: i64) -> String {
    let hours = eta_ms / MS_PER_HOUR;
    let minutes = (eta_ms % MS_PER_HOUR) / MS_PER_MINUTE;
    format!("{hours} hours {minutes} minutes")
}

fn format_timestamp<Tz>(ts: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let time = tz.timestamp_opt(ts, 0).single()?;
    Some(time.format(LAST_BACKUP_FORMAT).to_string())
}

fn server_line(server: &Server) -> String {
    let internet = if server.internet_connection { "Yes" } else { "No" };
    format!("{} (Internet: {internet})", server.name)
}

fn connection_text(status: &InternetStatus, since_lan_ms: i64) -> String {
    match status {
        InternetStatus::WaitLocal => "Waiting for local UrBackup server.".into(),
        InternetStatus::NoServer => "No servers".into(),
        other => {
            let prefix = if other.is_connected_local() { "C" } else { "Not c" };
            format!(
                "{prefix}onnected to local UrBackup server.\nLocal server last seen {} minutes ago.",
                since_lan_ms / MS_PER_MINUTE
            )
        }
    }
}
