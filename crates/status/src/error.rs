//! Error types for status polling.

/// Errors that prevent a poll from producing any result.
///
/// A tool that runs but fails, or prints garbage, is not an error; it
/// yields the unknown status instead.
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("control utility `{0}` not found")]
    ToolMissing(String),

    #[error("failed to run control utility `{tool}`: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
}

impl PollError {
    /// Builds the error for a failed spawn, separating "not installed" from
    /// other I/O failures.
    pub(crate) fn from_spawn(tool: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::ToolMissing(tool.to_string())
        } else {
            Self::Spawn {
                tool: tool.to_string(),
                source: err,
            }
        }
    }

    pub fn is_tool_missing(&self) -> bool {
        matches!(self, Self::ToolMissing(_))
    }
}
