//! Native system tray built on `tray-icon`.
//!
//! On Linux the icon must live on a thread running a GTK main loop, so
//! [`spawn`] starts one. Elsewhere the app creates a [`NativeTray`] on the UI
//! thread and pumps it every frame.

use std::time::Duration;

use eframe::egui;
use tray_icon::menu::{Menu, MenuEvent, MenuId, MenuItem as NativeMenuItem};
use tray_icon::{Icon, MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};
use urbackup_monitor_status::StatusIcon;
use urbackup_monitor_tray::{IconImage, MenuAction, TrayEndpoint, TrayError, TrayEvent, TrayUpdate};

/// How often pending tray traffic is processed.
pub const PUMP_INTERVAL: Duration = Duration::from_millis(100);

/// A live tray icon wired to its channel endpoint.
pub struct NativeTray {
    icon: TrayIcon,
    endpoint: TrayEndpoint,
    actions: Vec<(MenuId, MenuAction)>,
    /// Wakes the window so it processes forwarded events.
    wake: egui::Context,
}

impl NativeTray {
    /// Creates the icon and its Open/Exit menu.
    pub fn build(endpoint: TrayEndpoint, wake: egui::Context) -> Result<Self, TrayError> {
        let state = endpoint.state().clone();

        let menu = Menu::new();
        let mut actions = Vec::new();
        for item in state.build_menu() {
            let native = NativeMenuItem::new(&item.label, item.enabled, None);
            menu.append(&native).map_err(|e| TrayError::Build(e.to_string()))?;
            actions.push((native.id().clone(), item.action));
        }

        let icon = TrayIconBuilder::new()
            .with_menu(Box::new(menu))
            .with_tooltip(state.tooltip())
            .with_icon(native_icon(state.icon)?)
            .build()
            .map_err(|e| TrayError::Build(e.to_string()))?;

        endpoint.set_available(true);
        tracing::info!(icon = ?state.icon, "tray icon created");

        Ok(Self {
            icon,
            endpoint,
            actions,
            wake,
        })
    }

    /// Forwards user input and applies pending updates.
    ///
    /// Returns false once the tray has been asked to shut down.
    pub fn pump(&mut self) -> bool {
        while let Ok(event) = MenuEvent::receiver().try_recv() {
            let action = self
                .actions
                .iter()
                .find(|(id, _)| *id == event.id)
                .map(|(_, action)| *action);
            if let Some(action) = action {
                tracing::debug!(?action, "tray menu activated");
                self.forward(action.into());
            }
        }

        while let Ok(event) = TrayIconEvent::receiver().try_recv() {
            if matches!(
                event,
                TrayIconEvent::Click {
                    button: MouseButton::Left,
                    button_state: MouseButtonState::Up,
                    ..
                }
            ) {
                self.forward(TrayEvent::OpenRequested);
            }
        }

        while let Some(update) = self.endpoint.try_recv_update() {
            match update {
                TrayUpdate::IconChanged(icon) => self.apply_icon(icon),
                TrayUpdate::Shutdown => {
                    tracing::info!("tray shutting down");
                    self.endpoint.set_available(false);
                    return false;
                }
            }
        }

        true
    }

    fn forward(&self, event: TrayEvent) {
        self.endpoint.send_event(event);
        self.wake.request_repaint();
    }

    fn apply_icon(&self, icon: StatusIcon) {
        match native_icon(icon) {
            Ok(native) => {
                if let Err(e) = self.icon.set_icon(Some(native)) {
                    tracing::warn!(error = %e, "failed to update tray icon");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to render tray icon"),
        }
        if let Err(e) = self.icon.set_tooltip(Some(self.endpoint.state().tooltip())) {
            tracing::warn!(error = %e, "failed to update tray tooltip");
        }
    }
}

fn native_icon(icon: StatusIcon) -> Result<Icon, TrayError> {
    let image = IconImage::for_status(icon);
    Icon::from_rgba(image.rgba, image.width, image.height)
        .map_err(|e| TrayError::Icon(e.to_string()))
}

/// Starts the tray on a dedicated GTK thread.
///
/// If the tray cannot be created the endpoint is dropped and the app keeps
/// running without one.
#[cfg(target_os = "linux")]
pub fn spawn(endpoint: TrayEndpoint, wake: egui::Context) {
    let spawned = std::thread::Builder::new()
        .name("tray".into())
        .spawn(move || {
            if let Err(e) = run_gtk(endpoint, wake) {
                tracing::warn!(error = %e, "running without tray");
            }
        });

    if let Err(e) = spawned {
        tracing::warn!(error = %e, "failed to start tray thread");
    }
}

/// Builds the tray and runs the GTK main loop until it shuts down.
#[cfg(target_os = "linux")]
fn run_gtk(endpoint: TrayEndpoint, wake: egui::Context) -> Result<(), TrayError> {
    use gtk::glib;

    gtk::init().map_err(|e| TrayError::Backend(e.to_string()))?;
    let mut tray = NativeTray::build(endpoint, wake)?;

    glib::timeout_add_local(PUMP_INTERVAL, move || {
        if tray.pump() {
            glib::ControlFlow::Continue
        } else {
            gtk::main_quit();
            glib::ControlFlow::Break
        }
    });

    gtk::main();
    Ok(())
}
