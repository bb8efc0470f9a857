//! Control utility selection.
//!
//! The UrBackup client ships its command-line front end under a different
//! name per platform. The name is resolved once here and then carried as a
//! plain configuration value.

use std::fmt;

/// Control utility name on Windows.
pub const WINDOWS_CONTROL_TOOL: &str = "UrBackupClient_cmd";

/// Control utility name on every other platform.
pub const UNIX_CONTROL_TOOL: &str = "urbackupclientctl";

/// Host platform as far as the monitor cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    Other,
}

impl Platform {
    /// Returns the platform the binary was built for.
    pub fn detect() -> Self {
        detect_inner()
    }

    /// Returns the control utility installed by the client on this platform.
    pub fn default_control_tool(self) -> ControlTool {
        match self {
            Self::Windows => ControlTool::new(WINDOWS_CONTROL_TOOL),
            Self::Linux | Self::Other => ControlTool::new(UNIX_CONTROL_TOOL),
        }
    }

    /// Whether the monitor can run here.
    ///
    /// The Windows client has its own tray application.
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Windows)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Other => "other",
        }
    }
}

#[cfg(target_os = "windows")]
fn detect_inner() -> Platform {
    Platform::Windows
}

#[cfg(target_os = "linux")]
fn detect_inner() -> Platform {
    Platform::Linux
}

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
fn detect_inner() -> Platform {
    Platform::Other
}

/// Program invoked as `<program> status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlTool {
    program: String,
}

impl ControlTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for ControlTool {
    fn default() -> Self {
        Platform::detect().default_control_tool()
    }
}

impl fmt::Display for ControlTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tool_per_platform() {
        assert_eq!(
            Platform::Windows.default_control_tool().program(),
            "UrBackupClient_cmd"
        );
        assert_eq!(
            Platform::Linux.default_control_tool().program(),
            "urbackupclientctl"
        );
        assert_eq!(
            Platform::Other.default_control_tool().program(),
            "urbackupclientctl"
        );
    }

    #[test]
    fn windows_is_unsupported() {
        assert!(!Platform::Windows.is_supported());
        assert!(Platform::Linux.is_supported());
        assert!(Platform::Other.is_supported());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn detect_linux() {
        assert_eq!(Platform::detect(), Platform::Linux);
        assert_eq!(ControlTool::default().program(), "urbackupclientctl");
    }

    #[test]
    fn display_is_program_name() {
        let tool = ControlTool::new("/opt/urbackup/bin/urbackupclientctl");
        assert_eq!(tool.to_string(), "/opt/urbackup/bin/urbackupclientctl");
    }
}
