//! Context menu for the system tray.

use urbackup_monitor_status::StatusIcon;

/// Actions that can be triggered from the tray context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Show and restore the window.
    Open,
    /// Quit the application.
    Exit,
}

/// A single menu item.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Display text.
    pub label: String,
    /// Whether the item is enabled (clickable).
    pub enabled: bool,
    pub action: MenuAction,
}

/// Current state shown by the tray.
#[derive(Debug, Clone)]
pub struct MenuState {
    /// Application display name.
    pub app_name: String,
    /// Icon currently shown.
    pub icon: StatusIcon,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            app_name: "UrBackup".into(),
            icon: StatusIcon::NotConnected,
        }
    }
}

impl MenuState {
    /// Builds the menu items. The menu is always "Open" then "Exit".
    pub fn build_menu(&self) -> Vec<MenuItem> {
        vec![
            MenuItem {
                label: "Open".into(),
                enabled: true,
                action: MenuAction::Open,
            },
            MenuItem {
                label: "Exit".into(),
                enabled: true,
                action: MenuAction::Exit,
            },
        ]
    }

    /// Tooltip text for the current icon.
    pub fn tooltip(&self) -> String {
        format!("{}: {}", self.app_name, self.icon.label())
    }
}
