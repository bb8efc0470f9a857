//! Application orchestrator: wires poller, presenters, window and tray.

use std::sync::{Arc, mpsc};

use eframe::egui;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use urbackup_monitor_status::{Poller, Snapshot, StatusBus, StatusIcon, StatusView, run_poll_loop};
use urbackup_monitor_tray::{IconImage, TrayConfig, TrayEvent, TrayHandle};

use crate::config::Config;
use crate::lifecycle::{CloseAction, WindowLifecycle};
use crate::tray_backend::{self, PUMP_INTERVAL};
use crate::ui;

pub const WINDOW_TITLE: &str = "UrBackup Control Panel";
const WINDOW_SIZE: [f32; 2] = [500.0, 250.0];

/// Runs the window until the user exits.
///
/// `initial` is the result of the startup poll and becomes the first render.
pub fn run(config: Config, rt: &Runtime, initial: Option<Snapshot>) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let initial_icon = StatusIcon::select(initial.as_ref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(WINDOW_SIZE)
            .with_resizable(false)
            .with_icon(icon_data(initial_icon)),
        ..Default::default()
    };

    let poller = Poller::new(config.control_tool.clone());
    let period = config.poll_interval();
    let runtime = rt.handle().clone();
    let loop_cancel = cancel.clone();

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            let ctx = cc.egui_ctx.clone();

            let (tray, endpoint) = TrayHandle::new(TrayConfig {
                initial_icon,
                ..TrayConfig::default()
            });

            #[cfg(target_os = "linux")]
            let native_tray = {
                tray_backend::spawn(endpoint, ctx.clone());
                None
            };
            #[cfg(not(target_os = "linux"))]
            let native_tray = match tray_backend::NativeTray::build(endpoint, ctx.clone()) {
                Ok(tray) => Some(tray),
                Err(e) => {
                    tracing::warn!(error = %e, "running without tray");
                    None
                }
            };

            // Presenters: window body and window icon, then tray icon.
            let (status_tx, status_rx) = mpsc::channel();
            let mut bus = StatusBus::new();
            let repaint = ctx.clone();
            bus.subscribe(move |status| {
                let _ = status_tx.send(status.cloned());
                repaint.request_repaint();
            });
            let notifier = tray.notifier();
            bus.subscribe(move |status| {
                notifier.set_icon(StatusIcon::select(status));
            });

            runtime.spawn(run_poll_loop(poller, period, bus, loop_cancel.clone()));

            Ok(Box::new(MonitorApp::new(
                initial,
                status_rx,
                tray,
                native_tray,
                loop_cancel,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))?;

    // Also covers a window closed without passing through the close handler.
    cancel.cancel();
    Ok(())
}

/// Window-side application state.
pub struct MonitorApp {
    view: StatusView,
    icon: StatusIcon,
    status_rx: mpsc::Receiver<Option<Snapshot>>,
    tray: TrayHandle,
    native_tray: Option<tray_backend::NativeTray>,
    lifecycle: WindowLifecycle,
    cancel: CancellationToken,
}

impl MonitorApp {
    fn new(
        initial: Option<Snapshot>,
        status_rx: mpsc::Receiver<Option<Snapshot>>,
        tray: TrayHandle,
        native_tray: Option<tray_backend::NativeTray>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            view: StatusView::render(initial.as_ref()),
            icon: StatusIcon::select(initial.as_ref()),
            status_rx,
            tray,
            native_tray,
            lifecycle: WindowLifecycle::default(),
            cancel,
        }
    }

    /// Re-renders from one poll result.
    fn apply(&mut self, ctx: &egui::Context, status: Option<&Snapshot>) {
        let icon = StatusIcon::select(status);
        if icon != self.icon {
            tracing::debug!(from = ?self.icon, to = ?icon, "status icon changed");
        }
        self.view = StatusView::render(status);
        self.icon = icon;
        ctx.send_viewport_cmd(egui::ViewportCommand::Icon(Some(Arc::new(icon_data(
            self.icon,
        )))));
    }

    fn show_window(&mut self, ctx: &egui::Context) {
        self.lifecycle.on_restored();
        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
        ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(false));
        ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
    }

    fn handle_tray_events(&mut self, ctx: &egui::Context) {
        if let Some(native) = self.native_tray.as_mut() {
            if !native.pump() {
                self.native_tray = None;
            }
        }

        while let Some(event) = self.tray.try_recv_event() {
            match event {
                TrayEvent::OpenRequested => self.show_window(ctx),
                TrayEvent::ExitRequested => {
                    tracing::info!("exit requested via tray");
                    self.lifecycle.request_exit();
                    // Show first: a hidden window may not process the close request.
                    ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }
    }

    fn handle_window_state(&mut self, ctx: &egui::Context) {
        let tray_available = self.tray.is_available();
        let (close_requested, minimized) = ctx.input(|i| {
            (
                i.viewport().close_requested(),
                i.viewport().minimized.unwrap_or(false),
            )
        });

        if close_requested {
            match self.lifecycle.on_close_requested(tray_available) {
                CloseAction::Exit => {
                    tracing::info!("stopping poll loop");
                    self.cancel.cancel();
                    self.tray.shutdown();
                }
                CloseAction::HideToTray => {
                    ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                    ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
                }
            }
        }

        if self.lifecycle.on_minimized_changed(minimized, tray_available) {
            tracing::debug!("minimized, hiding to tray");
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
        }
    }
}

impl eframe::App for MonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(status) = self.status_rx.try_recv() {
            self.apply(ctx, status.as_ref());
        }

        self.handle_tray_events(ctx);
        self.handle_window_state(ctx);

        ui::draw(ctx, &self.view);

        ctx.request_repaint_after(PUMP_INTERVAL);
    }
}

fn icon_data(icon: StatusIcon) -> egui::IconData {
    let image = IconImage::for_status(icon);
    egui::IconData {
        rgba: image.rgba,
        width: image.width,
        height: image.height,
    }
}
