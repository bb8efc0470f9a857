//! Status poller: runs the control utility and decodes its report.

use std::process::Stdio;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::bus::StatusBus;
use crate::control::ControlTool;
use crate::error::PollError;
use crate::snapshot::Snapshot;

/// Interval between two polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Lower bound for the poll interval.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Argument that makes the control utility print its JSON status.
const STATUS_ARG: &str = "status";

/// Queries the daemon through its control utility.
#[derive(Debug, Clone)]
pub struct Poller {
    tool: ControlTool,
}

impl Poller {
    pub fn new(tool: ControlTool) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> &ControlTool {
        &self.tool
    }

    /// Runs `<tool> status` to completion and decodes its stdout.
    ///
    /// Returns `Ok(None)` when the tool exits nonzero or prints something
    /// that is not a status document. Only a tool that cannot be started at
    /// all is an error.
    pub async fn poll(&self) -> Result<Option<Snapshot>, PollError> {
        let output = tokio::process::Command::new(self.tool.program())
            .arg(STATUS_ARG)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| PollError::from_spawn(self.tool.program(), e))?;

        if !output.status.success() {
            tracing::debug!(
                tool = %self.tool,
                code = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "control utility reported failure"
            );
        }

        Ok(decode_status(output.status.success(), &output.stdout))
    }
}

/// Turns the outcome of one control utility run into a status.
///
/// Malformed output degrades to the unknown status, like a failed run.
pub fn decode_status(success: bool, stdout: &[u8]) -> Option<Snapshot> {
    if !success {
        return None;
    }

    match serde_json::from_slice(stdout) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            tracing::warn!(error = %e, "control utility printed a malformed status");
            None
        }
    }
}

/// Polls on a fixed interval and publishes every result until cancelled.
///
/// The first poll happens one `period` after the call; the startup poll is
/// the caller's job. Polls never overlap: a tick that falls due while a poll
/// is running is delayed until it finishes.
pub async fn run_poll_loop(
    poller: Poller,
    period: Duration,
    mut bus: StatusBus,
    cancel: CancellationToken,
) {
    let period = period.max(MIN_POLL_INTERVAL);
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        tool = %poller.tool(),
        period_ms = period.as_millis() as u64,
        "poll loop started"
    );

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let status = match poller.poll().await {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(error = %e, "status poll failed");
                None
            }
        };
        bus.publish(status.as_ref());
    }

    tracing::info!("poll loop stopped");
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::snapshot::InternetStatus;

    const IDLE_STATUS: &str = r#"{"running_processes":[],"servers":[{"name":"srv1","internet_connection":true}],"internet_status":"connected_local","time_since_last_lan_connection":120000}"#;

    const NO_JOBS_OR_SERVERS: &str =
        r#"{"internet_status":"connected_local","time_since_last_lan_connection":0}"#;
    const NO_SERVERS: &str = r#"{"running_processes":[],"internet_status":"connected_local","time_since_last_lan_connection":0}"#;
    const NO_JOBS: &str =
        r#"{"servers":[],"internet_status":"connected_local","time_since_last_lan_connection":0}"#;

    #[test]
    fn decode_success() {
        let snap = decode_status(true, IDLE_STATUS.as_bytes()).unwrap();
        assert!(snap.running_processes.is_empty());
        assert_eq!(snap.internet_status, InternetStatus::ConnectedLocal);
        assert_eq!(snap.time_since_last_lan_connection, 120_000);
    }

    #[test]
    fn decode_failure_exit_ignores_stdout() {
        assert!(decode_status(false, IDLE_STATUS.as_bytes()).is_none());
    }

    #[test]
    fn decode_malformed_json() {
        assert!(decode_status(true, b"{\"running_processes\": [").is_none());
        assert!(decode_status(true, b"").is_none());
        assert!(decode_status(true, b"Error: could not connect to backend").is_none());
    }

    #[test]
    fn decode_wrong_shape() {
        // Valid JSON, but missing required fields.
        assert!(decode_status(true, br#"{"servers": []}"#).is_none());
        // A document without the job or server lists is not a partial status.
        for doc in [NO_JOBS_OR_SERVERS, NO_SERVERS, NO_JOBS] {
            assert!(decode_status(true, doc.as_bytes()).is_none(), "decoded {doc}");
        }
    }

    #[tokio::test]
    async fn missing_tool() {
        let poller = Poller::new(ControlTool::new("/nonexistent/dir/urbackupclientctl"));
        let err = poller.poll().await.unwrap_err();
        assert!(err.is_tool_missing(), "unexpected error: {err}");
    }

    #[cfg(unix)]
    fn fake_tool(dir: &std::path::Path, script: &str) -> ControlTool {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("urbackupclientctl");
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        ControlTool::new(path.to_string_lossy())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn poll_reads_stdout() {
        let tmp = tempfile::tempdir().unwrap();
        let script = format!(
            "#!/bin/sh\n[ \"$1\" = status ] || exit 2\necho '{IDLE_STATUS}'\n"
        );
        let poller = Poller::new(fake_tool(tmp.path(), &script));

        let snap = poller.poll().await.unwrap().unwrap();
        assert_eq!(snap.servers.len(), 1);
        assert_eq!(snap.servers[0].name, "srv1");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn poll_nonzero_exit_is_unknown() {
        let tmp = tempfile::tempdir().unwrap();
        let script = format!("#!/bin/sh\necho '{IDLE_STATUS}'\nexit 1\n");
        let poller = Poller::new(fake_tool(tmp.path(), &script));

        assert!(poller.poll().await.unwrap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn poll_malformed_output_is_unknown() {
        let tmp = tempfile::tempdir().unwrap();
        let poller = Poller::new(fake_tool(tmp.path(), "#!/bin/sh\necho 'not json'\n"));

        assert!(poller.poll().await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn loop_publishes_until_cancelled() {
        let cancel = CancellationToken::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut bus = StatusBus::new();
        let sink = Arc::clone(&seen);
        let stop = cancel.clone();
        bus.subscribe(move |status| {
            let mut seen = sink.lock().unwrap();
            seen.push(status.is_some());
            if seen.len() == 3 {
                stop.cancel();
            }
        });

        // A missing tool degrades to the unknown status on every tick.
        let poller = Poller::new(ControlTool::new("/nonexistent/dir/urbackupclientctl"));
        run_poll_loop(poller, DEFAULT_POLL_INTERVAL, bus, cancel).await;

        assert_eq!(*seen.lock().unwrap(), vec![false, false, false]);
    }

    #[tokio::test(start_paused = true)]
    async fn loop_exits_immediately_when_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let count = Arc::new(Mutex::new(0));
        let mut bus = StatusBus::new();
        let sink = Arc::clone(&count);
        bus.subscribe(move |_| *sink.lock().unwrap() += 1);

        let poller = Poller::new(ControlTool::new("/nonexistent/dir/urbackupclientctl"));
        run_poll_loop(poller, DEFAULT_POLL_INTERVAL, bus, cancel).await;

        assert_eq!(*count.lock().unwrap(), 0);
    }
}
