use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

use crate::data::series::{column_series, paired_series};
use crate::state::AppState;

/// Number of equal-width histogram buckets. A visual-encoding choice, which
/// is why it lives here and not in the data layer.
const HISTOGRAM_BINS: usize = 30;

// ---------------------------------------------------------------------------
// Histogram (distribution of one column over the filtered view)
// ---------------------------------------------------------------------------

/// Render the histogram of the selected column.
pub fn histogram(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        placeholder(ui);
        return;
    };
    let Some(column) = &state.hist_column else {
        ui.label("Select a histogram column.");
        return;
    };

    let values = match column_series(dataset, &state.visible_indices, column) {
        Ok(v) => v,
        Err(e) => {
            ui.colored_label(Color32::RED, format!("Error: {e}"));
            return;
        }
    };
    let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();

    if values.is_empty() {
        ui.colored_label(Color32::YELLOW, "No data for the current filters.");
        return;
    }

    let bars = bin_values(&values, HISTOGRAM_BINS);
    let chart = BarChart::new(bars)
        .color(Color32::LIGHT_BLUE)
        .name(column.clone());

    Plot::new("histogram")
        .x_axis_label(column.clone())
        .y_axis_label("Count")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

/// Bucket values into `n_bins` equal-width bars over the observed range.
fn bin_values(values: &[f64], n_bins: usize) -> Vec<Bar> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    // Degenerate single-valued series: one bar carrying everything.
    if span <= 0.0 {
        return vec![Bar::new(min, values.len() as f64).width(1.0)];
    }

    let width = span / n_bins as f64;
    let mut counts = vec![0usize; n_bins];
    for &v in values {
        let mut idx = ((v - min) / width) as usize;
        if idx >= n_bins {
            idx = n_bins - 1; // v == max lands in the last bucket
        }
        counts[idx] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let center = min + (i as f64 + 0.5) * width;
            Bar::new(center, count as f64).width(width * 0.95)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter (two columns of the filtered view)
// ---------------------------------------------------------------------------

/// Render the scatter plot of the selected x/y columns, coloured by the
/// dataset's indicator column when it has one.
pub fn scatter(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        placeholder(ui);
        return;
    };
    let (Some(x_col), Some(y_col)) = (&state.scatter_x, &state.scatter_y) else {
        ui.label("Select scatter columns.");
        return;
    };

    let pairs = match paired_series(dataset, &state.visible_indices, x_col, y_col) {
        Ok(p) => p,
        Err(e) => {
            ui.colored_label(Color32::RED, format!("Error: {e}"));
            return;
        }
    };

    if pairs.is_empty() {
        ui.colored_label(Color32::YELLOW, "No data for the current filters.");
        return;
    }

    // Split points into indicator classes so each gets its own colour and
    // legend entry.
    let class_values: Option<Vec<f64>> = state.class_colors.as_ref().and_then(|cc| {
        column_series(dataset, &state.visible_indices, &cc.column).ok()
    });

    Plot::new("scatter")
        .legend(egui_plot::Legend::default())
        .x_axis_label(x_col.clone())
        .y_axis_label(y_col.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            match (&state.class_colors, &class_values) {
                (Some(cc), Some(classes)) => {
                    for class in [0.0, 1.0] {
                        let subset: PlotPoints = pairs
                            .iter()
                            .zip(classes.iter())
                            .filter(|(p, &c)| {
                                c == class && p[0].is_finite() && p[1].is_finite()
                            })
                            .map(|(p, _)| *p)
                            .collect();
                        let name = format!("{} = {}", cc.column, class as i64);
                        plot_ui.points(
                            Points::new(subset)
                                .color(cc.color_for(class))
                                .radius(2.5)
                                .name(name),
                        );
                    }
                }
                _ => {
                    let points: PlotPoints = pairs
                        .iter()
                        .filter(|p| p[0].is_finite() && p[1].is_finite())
                        .copied()
                        .collect();
                    plot_ui.points(Points::new(points).color(Color32::LIGHT_BLUE).radius(2.5));
                }
            }
        });
}

fn placeholder(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Load a dataset to explore it  (Dataset → Fetch / Open…)");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binning_covers_every_value() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let bars = bin_values(&values, 30);
        assert_eq!(bars.len(), 30);
        let total: f64 = bars.iter().map(|b| b.value).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn max_value_lands_in_last_bucket() {
        let bars = bin_values(&[0.0, 10.0], 30);
        assert_eq!(bars.first().unwrap().value, 1.0);
        assert_eq!(bars.last().unwrap().value, 1.0);
    }

    #[test]
    fn constant_series_gets_single_bar() {
        let bars = bin_values(&[4.0, 4.0, 4.0], 30);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].value, 3.0);
    }
}
