use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{charts, matrix, panels, table, treemap};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EmissionExplorerApp {
    pub state: AppState,
}

impl EmissionExplorerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for EmissionExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: view picker + filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the active analysis page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() && self.state.view != View::Codebook {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open an emissions CSV to begin  (File → Open dataset…)");
                });
                return;
            }

            match self.state.view {
                View::Emissions | View::Temperature => {
                    egui::ScrollArea::vertical()
                        .id_salt("analysis_page")
                        .show(ui, |ui| {
                            charts::time_series_chart(ui, &self.state);
                            ui.separator();
                            charts::country_mean_chart(ui, &self.state);
                            ui.separator();
                            treemap::composition_treemap(ui, &self.state);
                            ui.separator();
                            table::filtered_table(ui, &mut self.state);
                        });
                }
                View::Correlation => {
                    egui::ScrollArea::vertical()
                        .id_salt("correlation_page")
                        .show(ui, |ui| {
                            matrix::correlation_view(ui, &self.state);
                        });
                }
                View::Codebook => {
                    table::codebook_table(ui, &self.state);
                }
            }
        });
    }
}
