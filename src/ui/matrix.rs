use eframe::egui::{Align2, Color32, FontId, Rect, Sense, Ui, epaint::TextShape, pos2, vec2};

use crate::color::diverging;
use crate::data::analysis::correlation_matrix;
use crate::data::model::CORRELATION_METRICS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

const LEFT_GUTTER: f32 = 170.0;
const TOP_GUTTER: f32 = 140.0;

/// Pearson correlation heatmap over the selected columns.  Needs at least
/// two columns; otherwise shows a prompt instead of computing anything.
pub fn correlation_view(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    ui.heading("Correlation analysis");

    // Keep the canonical column order rather than the set's alphabetical one.
    let columns: Vec<String> = CORRELATION_METRICS
        .iter()
        .filter(|c| state.selection.corr_columns.contains(**c))
        .map(|c| c.to_string())
        .collect();

    if columns.len() < 2 {
        ui.label("Select at least two columns for correlation analysis.");
        return;
    }
    if state.visible_indices.is_empty() {
        ui.label("No data available for the selected filters.");
        return;
    }

    let matrix = correlation_matrix(dataset, &state.visible_indices, &columns);

    let n = columns.len();
    let cell: f32 = ((ui.available_width() - LEFT_GUTTER) / n as f32).clamp(28.0, 56.0);
    let size = vec2(LEFT_GUTTER + n as f32 * cell, TOP_GUTTER + n as f32 * cell);
    let (rect, _response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let origin = pos2(rect.left() + LEFT_GUTTER, rect.top() + TOP_GUTTER);
    let label_color = ui.visuals().text_color();
    let label_font = FontId::proportional(11.0);

    // Column labels, rotated upright above each column.
    for (j, col) in columns.iter().enumerate() {
        let galley = painter.layout_no_wrap(col.clone(), label_font.clone(), label_color);
        let pos = pos2(
            origin.x + j as f32 * cell + cell / 2.0 - galley.size().y / 2.0,
            origin.y - 6.0,
        );
        painter.add(
            TextShape::new(pos, galley, label_color)
                .with_angle(-std::f32::consts::FRAC_PI_2),
        );
    }

    for (i, col) in columns.iter().enumerate() {
        let y_center = origin.y + i as f32 * cell + cell / 2.0;

        // Row label, right-aligned against the grid.
        painter.text(
            pos2(origin.x - 6.0, y_center),
            Align2::RIGHT_CENTER,
            col,
            label_font.clone(),
            label_color,
        );

        for j in 0..n {
            let r = matrix[i][j];
            let cell_rect = Rect::from_min_size(
                pos2(origin.x + j as f32 * cell, origin.y + i as f32 * cell),
                vec2(cell, cell),
            )
            .shrink(0.5);
            painter.rect_filled(cell_rect, 0.0, diverging(r));
            painter.text(
                cell_rect.center(),
                Align2::CENTER_CENTER,
                format!("{r:.2}"),
                FontId::proportional(10.0),
                Color32::BLACK,
            );
        }
    }
}
