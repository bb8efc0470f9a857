//! Window lifecycle decisions, kept free of any windowing calls.

/// What to do when the window manager asks to close the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// Stop polling and let the window close.
    Exit,
    /// Keep running in the tray.
    HideToTray,
}

/// Tracks user intent across frames.
#[derive(Debug, Default)]
pub struct WindowLifecycle {
    /// "Exit" was chosen from the tray menu.
    exit_requested: bool,
    /// Minimized state seen on the previous frame.
    was_minimized: bool,
}

impl WindowLifecycle {
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Closing only exits after "Exit", or when there is no tray to hide to.
    pub fn on_close_requested(&self, tray_available: bool) -> CloseAction {
        if self.exit_requested || !tray_available {
            CloseAction::Exit
        } else {
            CloseAction::HideToTray
        }
    }

    /// Feeds this frame's minimized state. Returns true when the window was
    /// just minimized and should be hidden to the tray instead.
    pub fn on_minimized_changed(&mut self, minimized: bool, tray_available: bool) -> bool {
        let just_minimized = minimized && !self.was_minimized;
        self.was_minimized = minimized;
        just_minimized && tray_available
    }

    /// The window is being shown and restored from the tray.
    pub fn on_restored(&mut self) {
        self.was_minimized = false;
    }
}
