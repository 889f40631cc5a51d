use eframe::egui::{Align2, Color32, FontId, Rect, Sense, Ui, pos2, vec2};

use crate::color::generate_palette;
use crate::data::analysis::{column_sums, composition_shares};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Squarified treemap layout
// ---------------------------------------------------------------------------

/// An axis-aligned cell produced by the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Cell {
    pub fn area(&self) -> f64 {
        self.w * self.h
    }
}

/// Squarified treemap layout (Bruls, Huizing, van Wijk).
///
/// `weights` must be positive and are laid out in the given order; pass them
/// sorted descending for the canonical near-square result.  The returned
/// cells tile `bounds` exactly, with areas proportional to the weights.
pub fn squarify(weights: &[f64], bounds: Cell) -> Vec<Cell> {
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 || bounds.area() <= 0.0 {
        return Vec::new();
    }
    let scale = bounds.area() / total;
    let areas: Vec<f64> = weights.iter().map(|w| w * scale).collect();

    let mut cells = Vec::with_capacity(areas.len());
    let mut rest = bounds;
    let mut i = 0;

    while i < areas.len() {
        let side = rest.w.min(rest.h);

        // Grow the current row while the worst aspect ratio keeps improving.
        let mut end = i + 1;
        let mut best = worst_ratio(&areas[i..end], side);
        while end < areas.len() {
            let cand = worst_ratio(&areas[i..end + 1], side);
            if cand <= best {
                best = cand;
                end += 1;
            } else {
                break;
            }
        }

        let row_sum: f64 = areas[i..end].iter().sum();

        if rest.w >= rest.h {
            // Vertical strip on the left edge.
            let strip_w = row_sum / rest.h;
            let mut y = rest.y;
            for &a in &areas[i..end] {
                let h = a / strip_w;
                cells.push(Cell {
                    x: rest.x,
                    y,
                    w: strip_w,
                    h,
                });
                y += h;
            }
            rest.x += strip_w;
            rest.w -= strip_w;
        } else {
            // Horizontal strip along the top edge.
            let strip_h = row_sum / rest.w;
            let mut x = rest.x;
            for &a in &areas[i..end] {
                let w = a / strip_h;
                cells.push(Cell {
                    x,
                    y: rest.y,
                    w,
                    h: strip_h,
                });
                x += w;
            }
            rest.y += strip_h;
            rest.h -= strip_h;
        }

        i = end;
    }

    cells
}

/// Worst cell aspect ratio if `row` is laid along a strip of length `side`.
fn worst_ratio(row: &[f64], side: f64) -> f64 {
    let sum: f64 = row.iter().sum();
    let max = row.iter().cloned().fold(f64::MIN, f64::max);
    let min = row.iter().cloned().fold(f64::MAX, f64::min);
    let s2 = sum * sum;
    let side2 = side * side;
    (side2 * max / s2).max(s2 / (side2 * min))
}

// ---------------------------------------------------------------------------
// Composition treemap widget
// ---------------------------------------------------------------------------

/// Treemap of the share each metric contributes over the filtered rows.
pub fn composition_treemap(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let Some(group) = state.view.share_group() else {
        return;
    };

    ui.heading("Emission type distribution");

    let sums = column_sums(dataset, &state.visible_indices, group);
    let mut shares = composition_shares(&sums);
    if shares.is_empty() {
        ui.label("No data available for the selected filters.");
        return;
    }
    shares.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (rect, _response) =
        ui.allocate_exact_size(vec2(ui.available_width(), 320.0), Sense::hover());
    let painter = ui.painter_at(rect);

    let weights: Vec<f64> = shares.iter().map(|(_, pct)| *pct).collect();
    let bounds = Cell {
        x: rect.left() as f64,
        y: rect.top() as f64,
        w: rect.width() as f64,
        h: rect.height() as f64,
    };
    let cells = squarify(&weights, bounds);
    let palette = generate_palette(cells.len());

    for ((cell, (label, pct)), color) in cells.iter().zip(&shares).zip(palette) {
        let cell_rect = Rect::from_min_size(
            pos2(cell.x as f32, cell.y as f32),
            vec2(cell.w as f32, cell.h as f32),
        )
        .shrink(1.0);
        painter.rect_filled(cell_rect, 2.0, color.gamma_multiply(0.85));

        // Only label cells with room for the text.
        if cell_rect.width() > 60.0 && cell_rect.height() > 28.0 {
            painter.text(
                cell_rect.center(),
                Align2::CENTER_CENTER,
                format!("{label}\n{pct:.1}%"),
                FontId::proportional(12.0),
                Color32::WHITE,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Cell = Cell {
        x: 0.0,
        y: 0.0,
        w: 100.0,
        h: 60.0,
    };

    #[test]
    fn cells_tile_the_bounds() {
        let weights = [50.0, 25.0, 15.0, 10.0];
        let cells = squarify(&weights, BOUNDS);
        assert_eq!(cells.len(), weights.len());

        let total_area: f64 = cells.iter().map(Cell::area).sum();
        assert!((total_area - BOUNDS.area()).abs() < 1e-6);

        for cell in &cells {
            assert!(cell.x >= -1e-9 && cell.y >= -1e-9);
            assert!(cell.x + cell.w <= BOUNDS.w + 1e-6);
            assert!(cell.y + cell.h <= BOUNDS.h + 1e-6);
        }
    }

    #[test]
    fn areas_are_proportional_to_weights() {
        let weights = [60.0, 30.0, 10.0];
        let cells = squarify(&weights, BOUNDS);
        let total: f64 = weights.iter().sum();
        for (cell, w) in cells.iter().zip(&weights) {
            let expected = w / total * BOUNDS.area();
            assert!((cell.area() - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn degenerate_inputs_produce_no_cells() {
        assert!(squarify(&[], BOUNDS).is_empty());
        assert!(squarify(&[1.0], Cell { w: 0.0, ..BOUNDS }).is_empty());
    }

    #[test]
    fn single_weight_fills_the_bounds() {
        let cells = squarify(&[42.0], BOUNDS);
        assert_eq!(cells.len(), 1);
        assert!((cells[0].area() - BOUNDS.area()).abs() < 1e-6);
    }
}
