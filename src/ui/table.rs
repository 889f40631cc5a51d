use eframe::egui::{ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// Filtered data table
// ---------------------------------------------------------------------------

/// Table of the rows passing the current filters, plus the download button.
pub fn filtered_table(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtered data");

    let has_rows = !state.visible_indices.is_empty();

    if let Some(dataset) = &state.dataset {
        if has_rows {
            let indices = &state.visible_indices;
            let columns = &dataset.metric_columns;

            ScrollArea::horizontal()
                .id_salt("filtered_table")
                .show(ui, |ui: &mut Ui| {
                    TableBuilder::new(ui)
                        .striped(true)
                        .max_scroll_height(300.0)
                        .column(Column::auto().at_least(120.0)) // country
                        .column(Column::auto().at_least(50.0)) // year
                        .columns(Column::auto().at_least(80.0), columns.len())
                        .header(20.0, |mut header| {
                            header.col(|ui| {
                                ui.strong("country");
                            });
                            header.col(|ui| {
                                ui.strong("year");
                            });
                            for col in columns {
                                header.col(|ui| {
                                    ui.strong(col);
                                });
                            }
                        })
                        .body(|body| {
                            body.rows(18.0, indices.len(), |mut row| {
                                let rec = &dataset.records[indices[row.index()]];
                                row.col(|ui| {
                                    ui.label(&rec.country);
                                });
                                row.col(|ui| {
                                    ui.label(rec.year.to_string());
                                });
                                for col in columns {
                                    row.col(|ui| {
                                        match rec.value(col) {
                                            Some(v) => ui.label(format!("{v}")),
                                            None => ui.label(""),
                                        };
                                    });
                                }
                            });
                        });
                });
        } else {
            ui.label("No data available for the selected filters.");
        }
    }

    if has_rows {
        ui.add_space(6.0);
        if ui.button("Download filtered data").clicked() {
            panels::export_filtered(state);
        }
    }
}

// ---------------------------------------------------------------------------
// Codebook table
// ---------------------------------------------------------------------------

/// The data dictionary loaded from the codebook CSV.
pub fn codebook_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Data dictionary and sources");

    if state.codebook.is_empty() {
        ui.label("No codebook loaded (File → Open codebook…).");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(160.0)) // column
        .column(Column::remainder()) // description
        .column(Column::auto().at_least(100.0)) // unit
        .column(Column::auto().at_least(160.0)) // source
        .header(20.0, |mut header| {
            for title in ["column", "description", "unit", "source"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.codebook.len(), |mut row| {
                let entry = &state.codebook[row.index()];
                row.col(|ui| {
                    ui.label(&entry.column);
                });
                row.col(|ui| {
                    ui.label(&entry.description);
                });
                row.col(|ui| {
                    ui.label(&entry.unit);
                });
                row.col(|ui| {
                    ui.label(&entry.source);
                });
            });
        });
}
