use std::f64::consts::TAU;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{PieChart, ScatterChart};
use crate::color::ColorMap;

/// Largest arc drawn as one polygon; keeps every wedge convex.
const MAX_WEDGE: f64 = TAU / 8.0;
/// Arc points per full turn.
const ARC_RESOLUTION: f64 = 128.0;

// ---------------------------------------------------------------------------
// Proportion chart
// ---------------------------------------------------------------------------

/// Render the success proportion chart as a pie of polygon wedges.
pub fn success_pie(ui: &mut Ui, chart: &PieChart, colors: &ColorMap, height: f32) {
    ui.strong(&chart.title);

    let shares = chart.shares();
    // Per-site slices keep their site colour; class slices get fixed colours.
    let slice_color = |label: &str| match label {
        "0" => Color32::from_rgb(239, 85, 59),
        "1" => Color32::from_rgb(99, 110, 250),
        other => colors.color_for(other),
    };

    Plot::new("success_pie")
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            if shares.is_empty() {
                plot_ui.text(Text::new(PlotPoint::new(0.0, 0.0), "No launches"));
                return;
            }

            let mut start = 0.0;
            for (slice, share) in shares {
                let sweep = share * TAU;
                let color = slice_color(&slice.label);

                for (a, b) in wedge_spans(start, sweep) {
                    let points: PlotPoints = wedge_points(a, b).into_iter().collect();
                    let polygon = Polygon::new(points)
                        .name(&slice.label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE));
                    plot_ui.polygon(polygon);
                }

                let mid = start + sweep / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    format!("{:.1}%", share * 100.0),
                ));
                start += sweep;
            }
        });
}

/// Split `[start, start + sweep]` into arcs no wider than [`MAX_WEDGE`].
fn wedge_spans(start: f64, sweep: f64) -> Vec<(f64, f64)> {
    let pieces = (sweep / MAX_WEDGE).ceil().max(1.0) as usize;
    let step = sweep / pieces as f64;
    (0..pieces)
        .map(|i| (start + step * i as f64, start + step * (i + 1) as f64))
        .collect()
}

/// Centre point plus an arc on the unit circle from `a` to `b`.
fn wedge_points(a: f64, b: f64) -> Vec<[f64; 2]> {
    let segments = ((b - a) / TAU * ARC_RESOLUTION).ceil().max(1.0) as usize;
    std::iter::once([0.0, 0.0])
        .chain((0..=segments).map(|i| {
            let t = a + (b - a) * i as f64 / segments as f64;
            [t.cos(), t.sin()]
        }))
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render payload vs. outcome, one point series per booster category.
pub fn payload_scatter(ui: &mut Ui, chart: &ScatterChart, colors: &ColorMap, height: f32) {
    ui.strong(&chart.title);

    Plot::new("payload_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(chart.x_field)
        .y_axis_label(chart.y_field)
        .include_x(0.0)
        .include_y(-0.2)
        .include_y(1.2)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points: PlotPoints = series.points.iter().copied().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.label)
                        .color(colors.color_for(&series.label))
                        .radius(4.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedges_cover_the_sweep() {
        let spans = wedge_spans(1.0, TAU * 0.6);
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[0].0, 1.0);
        assert!((spans[4].1 - (1.0 + TAU * 0.6)).abs() < 1e-12);
        assert!(spans.iter().all(|(a, b)| b - a <= MAX_WEDGE + 1e-12));
    }

    #[test]
    fn tiny_slice_is_one_wedge() {
        assert_eq!(wedge_spans(0.0, 0.01).len(), 1);
    }
}
