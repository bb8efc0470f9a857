//! Icon state shared by the tray and the window.

use crate::snapshot::Snapshot;

/// Which of the three icons represents the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusIcon {
    #[default]
    NotConnected,
    Connected,
    Busy,
}

impl StatusIcon {
    /// Picks the icon for a poll result.
    ///
    /// A running job wins over the connection state.
    pub fn select(status: Option<&Snapshot>) -> Self {
        match status {
            None => Self::NotConnected,
            Some(snap) if snap.is_busy() => Self::Busy,
            Some(snap) if snap.internet_status.is_connected_local() => Self::Connected,
            Some(_) => Self::NotConnected,
        }
    }

    /// Short state label, used in tooltips.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotConnected => "Not connected",
            Self::Connected => "Connected",
            Self::Busy => "Backup running",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Action, InternetStatus, RunningProcess};

    fn snapshot(busy: bool, internet_status: InternetStatus) -> Snapshot {
        let running_processes = if busy {
            vec![RunningProcess {
                action: Action::Incr,
                eta_ms: Some(60_000),
                percent_done: 10,
            }]
        } else {
            Vec::new()
        };
        Snapshot {
            running_processes,
            last_backup_time: None,
            servers: Vec::new(),
            internet_status,
            time_since_last_lan_connection: 0,
        }
    }

    #[test]
    fn selection_table() {
        use StatusIcon::*;

        let statuses = [
            InternetStatus::ConnectedLocal,
            InternetStatus::WaitLocal,
            InternetStatus::NoServer,
            InternetStatus::Other("connected_internet".into()),
        ];

        for busy in [false, true] {
            for status in &statuses {
                for is_none in [false, true] {
                    let snap = snapshot(busy, status.clone());
                    let input = if is_none { None } else { Some(&snap) };

                    let expected = match (is_none, busy, status) {
                        (true, _, _) => NotConnected,
                        (false, true, _) => Busy,
                        (false, false, InternetStatus::ConnectedLocal) => Connected,
                        (false, false, _) => NotConnected,
                    };

                    assert_eq!(
                        StatusIcon::select(input),
                        expected,
                        "busy={busy} status={status:?} none={is_none}"
                    );
                }
            }
        }
    }

    #[test]
    fn default_is_not_connected() {
        assert_eq!(StatusIcon::default(), StatusIcon::NotConnected);
    }

    #[test]
    fn labels() {
        assert_eq!(StatusIcon::NotConnected.label(), "Not connected");
        assert_eq!(StatusIcon::Connected.label(), "Connected");
        assert_eq!(StatusIcon::Busy.label(), "Backup running");
    }
}
