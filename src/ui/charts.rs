use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

use crate::data::analysis::{country_series, mean_by_country};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Time-series line chart
// ---------------------------------------------------------------------------

/// One line per selected country, metric value over the selected years.
pub fn time_series_chart(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let metric = &state.selection.metric;
    let (lo, hi) = state.selection.years;

    ui.heading(format!("{metric} over time ({lo}–{hi})"));

    if state.visible_indices.is_empty() {
        ui.label("No data available for the selected filters.");
        return;
    }

    Plot::new("time_series")
        .height(320.0)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(metric.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for country in &state.selection.countries {
                let points = country_series(dataset, &state.visible_indices, country, metric);
                if points.is_empty() {
                    continue;
                }

                let color = state
                    .country_colors
                    .as_ref()
                    .map(|cm| cm.color_for(country))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let line = Line::new(PlotPoints::from(points))
                    .name(country)
                    .color(color)
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Country comparison bar chart
// ---------------------------------------------------------------------------

/// Average of the selected metric per country, ascending.
pub fn country_mean_chart(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let metric = &state.selection.metric;
    let (lo, hi) = state.selection.years;

    ui.heading(format!("Average {metric} per country ({lo}–{hi})"));

    let means = mean_by_country(dataset, &state.visible_indices, metric);
    if means.is_empty() {
        ui.label("No data available for the selected filters.");
        return;
    }

    let bars: Vec<Bar> = means
        .iter()
        .enumerate()
        .map(|(i, (country, mean))| {
            let color = state
                .country_colors
                .as_ref()
                .map(|cm| cm.color_for(country))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(i as f64, *mean).width(0.6).name(country).fill(color)
        })
        .collect();

    let names: Vec<String> = means.iter().map(|(c, _)| c.clone()).collect();

    Plot::new("country_means")
        .height(320.0)
        .x_axis_label("Country")
        .y_axis_label(metric.clone())
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            names.get(i as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
