//! Tray handle, events, and update types.
//!
//! The native tray runs on its own thread (a GTK main loop on Linux). This
//! module defines the channel-based interface between that thread and the
//! rest of the app, independent of the GUI backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use urbackup_monitor_status::StatusIcon;

use crate::menu::{MenuAction, MenuState};

/// Configuration for the system tray.
#[derive(Debug, Clone)]
pub struct TrayConfig {
    /// Name shown in the tray tooltip.
    pub app_name: String,
    /// Icon shown until the first status arrives.
    pub initial_icon: StatusIcon,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            app_name: "UrBackup".into(),
            initial_icon: StatusIcon::NotConnected,
        }
    }
}

/// Events emitted by the tray to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    /// "Open" in the menu, or a left click on the icon.
    OpenRequested,
    /// "Exit" in the menu.
    ExitRequested,
}

impl From<MenuAction> for TrayEvent {
    fn from(action: MenuAction) -> Self {
        match action {
            MenuAction::Open => Self::OpenRequested,
            MenuAction::Exit => Self::ExitRequested,
        }
    }
}

/// Updates sent from the app to the tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayUpdate {
    /// A new poll result selected a (possibly unchanged) icon.
    IconChanged(StatusIcon),
    /// Request tray shutdown.
    Shutdown,
}

/// App-side handle to the system tray.
///
/// Owned by the window. Icon changes usually come from the poll thread
/// through a [`TrayNotifier`] instead.
pub struct TrayHandle {
    /// Send updates to the tray.
    update_tx: mpsc::Sender<TrayUpdate>,
    /// Receive events from the tray.
    event_rx: mpsc::Receiver<TrayEvent>,
    /// Set by the backend once the native icon exists.
    available: Arc<AtomicBool>,
    state: MenuState,
}

impl TrayHandle {
    /// Creates a new tray handle with its channel pair.
    ///
    /// Returns `(handle, endpoint)`. The endpoint is given to the native
    /// tray backend.
    pub fn new(config: TrayConfig) -> (Self, TrayEndpoint) {
        let (update_tx, update_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let available = Arc::new(AtomicBool::new(false));

        let state = MenuState {
            app_name: config.app_name,
            icon: config.initial_icon,
        };

        let handle = Self {
            update_tx,
            event_rx,
            available: Arc::clone(&available),
            state: state.clone(),
        };

        let endpoint = TrayEndpoint {
            event_tx,
            update_rx,
            available,
            state,
        };

        (handle, endpoint)
    }

    /// Returns a cloneable sender for icon updates.
    pub fn notifier(&self) -> TrayNotifier {
        TrayNotifier {
            update_tx: self.update_tx.clone(),
        }
    }

    /// Shows `icon` in the tray.
    pub fn set_icon(&mut self, icon: StatusIcon) {
        self.state.icon = icon;
        let _ = self.update_tx.send(TrayUpdate::IconChanged(icon));
    }

    /// Requests the tray to shut down.
    pub fn shutdown(&self) {
        let _ = self.update_tx.send(TrayUpdate::Shutdown);
    }

    /// Tries to receive a tray event (non-blocking).
    pub fn try_recv_event(&self) -> Option<TrayEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Whether a native tray icon is currently shown.
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::Acquire)
    }

    /// Returns the last state set through this handle.
    pub fn state(&self) -> &MenuState {
        &self.state
    }
}

/// Cloneable, sendable icon update channel.
#[derive(Clone)]
pub struct TrayNotifier {
    update_tx: mpsc::Sender<TrayUpdate>,
}

impl TrayNotifier {
    /// Shows `icon` in the tray. Returns false once the tray is gone.
    pub fn set_icon(&self, icon: StatusIcon) -> bool {
        self.update_tx.send(TrayUpdate::IconChanged(icon)).is_ok()
    }
}

/// Backend side of the tray channels.
pub struct TrayEndpoint {
    event_tx: mpsc::Sender<TrayEvent>,
    update_rx: mpsc::Receiver<TrayUpdate>,
    available: Arc<AtomicBool>,
    state: MenuState,
}

impl TrayEndpoint {
    /// Forwards a user action to the app.
    pub fn send_event(&self, event: TrayEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::debug!(?event, "tray event dropped, app is gone");
        }
    }

    /// Takes the next pending update (non-blocking), tracking icon changes.
    ///
    /// Reports [`TrayUpdate::Shutdown`] once every app-side sender is gone.
    pub fn try_recv_update(&mut self) -> Option<TrayUpdate> {
        match self.update_rx.try_recv() {
            Ok(update) => {
                if let TrayUpdate::IconChanged(icon) = update {
                    self.state.icon = icon;
                }
                Some(update)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(TrayUpdate::Shutdown),
        }
    }

    /// Records whether the native icon is up.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::Release);
    }

    /// Menu state as of the last processed update.
    pub fn state(&self) -> &MenuState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tray_handle_creation() {
        let (handle, endpoint) = TrayHandle::new(TrayConfig::default());
        assert_eq!(handle.state().app_name, "UrBackup");
        assert_eq!(handle.state().icon, StatusIcon::NotConnected);
        assert_eq!(endpoint.state().icon, StatusIcon::NotConnected);
        assert!(!handle.is_available());
    }

    #[test]
    fn icon_updates_reach_endpoint() {
        let (mut handle, mut endpoint) = TrayHandle::new(TrayConfig::default());

        handle.set_icon(StatusIcon::Busy);
        assert_eq!(handle.state().icon, StatusIcon::Busy);

        let notifier = handle.notifier();
        assert!(notifier.set_icon(StatusIcon::Connected));

        assert_eq!(
            endpoint.try_recv_update(),
            Some(TrayUpdate::IconChanged(StatusIcon::Busy))
        );
        assert_eq!(
            endpoint.try_recv_update(),
            Some(TrayUpdate::IconChanged(StatusIcon::Connected))
        );
        assert_eq!(endpoint.state().icon, StatusIcon::Connected);
        assert_eq!(endpoint.try_recv_update(), None);
    }

    #[test]
    fn tray_handle_events() {
        let (handle, endpoint) = TrayHandle::new(TrayConfig::default());

        // No events yet.
        assert!(handle.try_recv_event().is_none());

        endpoint.send_event(MenuAction::Open.into());
        endpoint.send_event(TrayEvent::ExitRequested);
        assert_eq!(handle.try_recv_event(), Some(TrayEvent::OpenRequested));
        assert_eq!(handle.try_recv_event(), Some(TrayEvent::ExitRequested));
        assert!(handle.try_recv_event().is_none());
    }

    #[test]
    fn tray_handle_shutdown() {
        let (handle, mut endpoint) = TrayHandle::new(TrayConfig::default());

        handle.shutdown();
        assert_eq!(endpoint.try_recv_update(), Some(TrayUpdate::Shutdown));
    }

    #[test]
    fn availability_is_shared() {
        let (handle, endpoint) = TrayHandle::new(TrayConfig::default());

        endpoint.set_available(true);
        assert!(handle.is_available());

        endpoint.set_available(false);
        assert!(!handle.is_available());
    }

    #[test]
    fn endpoint_sees_disconnect() {
        let (handle, mut endpoint) = TrayHandle::new(TrayConfig::default());
        assert_eq!(endpoint.try_recv_update(), None);

        drop(handle);
        assert_eq!(endpoint.try_recv_update(), Some(TrayUpdate::Shutdown));
    }

    #[test]
    fn notifier_fails_after_backend_exit() {
        let (handle, endpoint) = TrayHandle::new(TrayConfig::default());
        let notifier = handle.notifier();

        drop(endpoint);
        assert!(!notifier.set_icon(StatusIcon::Busy));
    }

    #[test]
    fn menu_actions_map_to_events() {
        assert_eq!(TrayEvent::from(MenuAction::Open), TrayEvent::OpenRequested);
        assert_eq!(TrayEvent::from(MenuAction::Exit), TrayEvent::ExitRequested);
    }
}
