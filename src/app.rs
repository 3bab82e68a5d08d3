use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct HomescopeApp {
    pub state: AppState,
}

impl eframe::App for HomescopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: diagnostics, summary, plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    egui::CollapsingHeader::new("Feature dictionary")
                        .default_open(false)
                        .show(ui, |ui| {
                            panels::dictionary_table(ui, &self.state.schema);
                        });
                    egui::CollapsingHeader::new("Schema & missing values")
                        .default_open(false)
                        .show(ui, |ui| {
                            panels::diagnostics_table(ui, &self.state);
                        });
                    egui::CollapsingHeader::new("First rows")
                        .default_open(false)
                        .show(ui, |ui| {
                            panels::preview_table(ui, &self.state, 5);
                        });
                    ui.separator();

                    panels::summary_section(ui, &self.state);
                    ui.separator();

                    let plot_height = ui.available_height().max(240.0);
                    ui.columns(2, |cols| {
                        cols[0].set_min_height(plot_height);
                        plot::histogram(&mut cols[0], &self.state);
                        cols[1].set_min_height(plot_height);
                        plot::scatter(&mut cols[1], &self.state);
                    });
                });
        });
    }
}
