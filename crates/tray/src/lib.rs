//! System tray interface for the UrBackup client monitor.
//!
//! Defines the tray's context menu, its icon bitmaps, and the channel-based
//! handle the rest of the app uses to talk to it:
//! - [`TrayEvent`] — events from tray to app (open window, exit)
//! - [`TrayUpdate`] — updates from app to tray (icon change, shutdown)
//!
//! The native tray lives in the app crate; this crate has no GUI
//! dependencies.
//!
//! # Platform notes
//! - Linux: the tray needs its own GTK main loop thread
//! - The window and the tray never share state except through channels

mod error;
mod icon;
mod menu;
mod tray;

pub use error::TrayError;
pub use icon::{ICON_SIZE, IconImage};
pub use menu::{MenuAction, MenuItem, MenuState};
pub use tray::{TrayConfig, TrayEndpoint, TrayEvent, TrayHandle, TrayNotifier, TrayUpdate};
