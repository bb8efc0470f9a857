//! Blocking dialogs for startup failures.

use rfd::{MessageButtons, MessageDialog, MessageLevel};

/// Exit code for fatal startup errors.
pub const FATAL_EXIT_CODE: i32 = 1;

/// A startup condition the monitor cannot run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fatal {
    UnsupportedPlatform,
    ControlToolMissing,
}

impl Fatal {
    pub fn title(self) -> &'static str {
        match self {
            Self::UnsupportedPlatform => "Not supported",
            Self::ControlToolMissing => "UrBackup Error",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::UnsupportedPlatform => "Windows is currently not supported",
            Self::ControlToolMissing => "Could not find the UrBackup control executable!",
        }
    }
}

/// Shows a modal error dialog and terminates the process.
pub fn exit_with(fatal: Fatal) -> ! {
    tracing::error!(title = fatal.title(), "{}", fatal.message());

    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(fatal.title())
        .set_description(fatal.message())
        .set_buttons(MessageButtons::Ok)
        .show();

    std::process::exit(FATAL_EXIT_CODE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_texts() {
        assert_eq!(Fatal::UnsupportedPlatform.title(), "Not supported");
        assert_eq!(
            Fatal::UnsupportedPlatform.message(),
            "Windows is currently not supported"
        );
        assert_eq!(Fatal::ControlToolMissing.title(), "UrBackup Error");
        assert_eq!(
            Fatal::ControlToolMissing.message(),
            "Could not find the UrBackup control executable!"
        );
    }
}
