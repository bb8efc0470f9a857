//! Window body layout.

use eframe::egui;
use urbackup_monitor_status::StatusView;

const SECTION_SPACING: f32 = 10.0;
const SERVER_LIST_HEIGHT: f32 = 50.0;

/// Draws the status window from an already rendered view.
pub fn draw(ctx: &egui::Context, view: &StatusView) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.spacing_mut().item_spacing.y = SECTION_SPACING;

        // Current job.
        ui.label(view.status_text.as_str());
        ui.label(view.eta_text.as_str());
        ui.add(egui::ProgressBar::new(view.progress_fraction()));

        ui.separator();

        // Server and backup information.
        ui.label(view.last_backup_text.as_str());
        ui.horizontal_top(|ui| {
            ui.label("Servers:");
            egui::ScrollArea::vertical()
                .max_height(SERVER_LIST_HEIGHT)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    ui.spacing_mut().item_spacing.y = 2.0;
                    for server in &view.servers {
                        ui.label(server.as_str());
                    }
                });
        });

        ui.add_space(SECTION_SPACING);

        ui.horizontal_top(|ui| {
            ui.label("Connection status:");
            ui.label(view.connection_text.as_str());
        });
    });
}
