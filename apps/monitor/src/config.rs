//! Monitor configuration.
//!
//! There is no configuration file. Defaults come from the platform and can
//! be overridden from the environment:
//! - `URBACKUP_MONITOR_CONTROL_TOOL`: control utility program name or path
//! - `URBACKUP_MONITOR_POLL_SECS`: seconds between polls (minimum 1)

use std::time::Duration;

use urbackup_monitor_status::{ControlTool, DEFAULT_POLL_INTERVAL, Platform};

const ENV_CONTROL_TOOL: &str = "URBACKUP_MONITOR_CONTROL_TOOL";
const ENV_POLL_SECS: &str = "URBACKUP_MONITOR_POLL_SECS";

/// Monitor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Program run as `<control_tool> status`.
    pub control_tool: ControlTool,

    /// Seconds between two polls.
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            control_tool: Platform::detect().default_control_tool(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
        }
    }
}

impl Config {
    /// Builds the configuration from defaults and the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from defaults and `lookup`.
    ///
    /// Unusable values are ignored with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(tool) = lookup(ENV_CONTROL_TOOL) {
            let tool = tool.trim();
            if tool.is_empty() {
                tracing::warn!(var = ENV_CONTROL_TOOL, "ignoring empty control tool");
            } else {
                config.control_tool = ControlTool::new(tool);
            }
        }

        if let Some(raw) = lookup(ENV_POLL_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs >= 1 => config.poll_interval_secs = secs,
                _ => tracing::warn!(
                    var = ENV_POLL_SECS,
                    value = %raw,
                    "ignoring invalid poll interval"
                ),
            }
        }

        config
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
