use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::export::write_filtered_csv;
use crate::data::model::CORRELATION_METRICS;
use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – view picker and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: analysis page selector plus the filters the
/// active page needs.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Analysis");
    ui.separator();

    for view in View::ALL {
        if ui
            .selectable_label(state.view == view, view.label())
            .clicked()
        {
            state.set_view(view);
        }
    }
    ui.separator();

    if state.view == View::Codebook {
        return;
    }

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the widgets.
    let countries = dataset.countries.clone();
    let (year_min, year_max) = (dataset.year_min, dataset.year_max);

    ui.heading("Filters");

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            ui.strong("Year range");
            let (mut lo, mut hi) = state.selection.years;
            let mut changed = false;
            changed |= ui
                .add(Slider::new(&mut lo, year_min..=year_max).text("from"))
                .changed();
            changed |= ui
                .add(Slider::new(&mut hi, year_min..=year_max).text("to"))
                .changed();
            if changed {
                state.selection.years = (lo, hi);
                state.selection.clamp_years(year_min, year_max);
                state.refilter();
            }
            ui.separator();

            // ---- Metric selector (chart pages only) ----
            if let Some(group) = state.view.metric_group() {
                ui.strong("Metric");
                let current = state.selection.metric.clone();
                egui::ComboBox::from_id_salt("metric")
                    .selected_text(&current)
                    .show_ui(ui, |ui: &mut Ui| {
                        for &metric in group {
                            if ui.selectable_label(current == metric, metric).clicked() {
                                state.selection.metric = metric.to_string();
                            }
                        }
                    });
                ui.separator();
            }

            // ---- Country checkboxes ----
            let n_selected = state.selection.countries.len();
            let header_text = format!("Countries  ({n_selected}/{})", countries.len());
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("countries")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_countries();
                        }
                        if ui.small_button("None").clicked() {
                            state.select_no_countries();
                        }
                    });

                    for country in &countries {
                        let mut checked = state.selection.countries.contains(country);
                        let mut text = RichText::new(country);
                        if checked {
                            if let Some(colors) = &state.country_colors {
                                text = text.color(colors.color_for(country));
                            }
                        }
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_country(country);
                        }
                    }
                });

            // ---- Correlation column checkboxes ----
            if state.view == View::Correlation {
                ui.separator();
                let n_cols = state.selection.corr_columns.len();
                let header_text =
                    format!("Columns to analyze  ({n_cols}/{})", CORRELATION_METRICS.len());
                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt("corr_columns")
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        for &col in CORRELATION_METRICS {
                            let mut checked = state.selection.corr_columns.contains(col);
                            if ui.checkbox(&mut checked, col).changed() {
                                state.toggle_corr_column(col);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_dataset_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open codebook…").clicked() {
                open_codebook_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export filtered data…").clicked() {
                export_filtered(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} match the current filters",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_dataset_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open emissions data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_dataset_from(&path);
    }
}

pub fn open_codebook_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open codebook")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_codebook_from(&path);
    }
}

/// Ask for a target path and write the filtered subset there.
pub fn export_filtered(state: &mut AppState) {
    let Some(dataset) = &state.dataset else {
        state.status_message = Some("Nothing to export: no dataset loaded.".to_string());
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name("filtered_co2_data.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match write_filtered_csv(dataset, &state.visible_indices, &path) {
            Ok(()) => {
                log::info!(
                    "Exported {} rows to {}",
                    state.visible_indices.len(),
                    path.display()
                );
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
