//! Status document printed by `urbackupclientctl status`.

use serde::{Deserialize, Serialize};

/// One decoded status report from the control utility.
///
/// Extra fields the daemon adds are ignored. A document missing any
/// required field does not decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Active jobs, most relevant first.
    pub running_processes: Vec<RunningProcess>,
    /// Unix timestamp (seconds) of the last finished backup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_backup_time: Option<i64>,
    pub servers: Vec<Server>,
    pub internet_status: InternetStatus,
    /// Milliseconds since the local server was last reachable.
    pub time_since_last_lan_connection: i64,
}

impl Snapshot {
    /// Returns the job shown in the window, if any.
    pub fn current_process(&self) -> Option<&RunningProcess> {
        self.running_processes.first()
    }

    /// Returns true when at least one job is running.
    pub fn is_busy(&self) -> bool {
        !self.running_processes.is_empty()
    }
}

/// A backup job reported by the daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningProcess {
    pub action: Action,
    /// Estimated time remaining in milliseconds, `-1` when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta_ms: Option<i64>,
    /// 0-100, or `-1` while the client is still indexing.
    pub percent_done: i32,
}

impl RunningProcess {
    /// Marker value of `percent_done` during the indexing phase.
    pub const INDEXING: i32 = -1;
    /// Marker value of `eta_ms` when the daemon has no estimate.
    pub const ETA_UNKNOWN: i64 = -1;

    pub fn is_indexing(&self) -> bool {
        self.percent_done == Self::INDEXING
    }

    /// Returns the ETA in milliseconds when the daemon provided one.
    pub fn known_eta_ms(&self) -> Option<i64> {
        self.eta_ms.filter(|&eta| eta != Self::ETA_UNKNOWN)
    }
}

/// Kind of backup job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Full,
    Incr,
    Idle,
}

impl Action {
    /// Human-readable description shown in the window.
    pub fn description(self) -> &'static str {
        match self {
            Self::Full => "Full file backup running.",
            Self::Incr => "Incremental file backup running.",
            Self::Idle => "Idle.",
        }
    }
}

/// A backup server known to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub name: String,
    pub internet_connection: bool,
}

/// Connection state of the client towards its local server.
///
/// Values other than the three known ones are kept verbatim and treated as
/// "not connected".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InternetStatus {
    ConnectedLocal,
    WaitLocal,
    NoServer,
    Other(String),
}

impl InternetStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ConnectedLocal => "connected_local",
            Self::WaitLocal => "wait_local",
            Self::NoServer => "no_server",
            Self::Other(s) => s,
        }
    }

    pub fn is_connected_local(&self) -> bool {
        matches!(self, Self::ConnectedLocal)
    }
}

impl From<String> for InternetStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "connected_local" => Self::ConnectedLocal,
            "wait_local" => Self::WaitLocal,
            "no_server" => Self::NoServer,
            _ => Self::Other(s),
        }
    }
}

impl From<InternetStatus> for String {
    fn from(status: InternetStatus) -> Self {
        match status {
            InternetStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}
