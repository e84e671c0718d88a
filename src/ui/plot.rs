use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

use crate::color::SeriesColors;
use crate::data::histogram::{CategoricalStack, PriceHistogram};

// ---------------------------------------------------------------------------
// Stacked bar charts (type-by-manufacturer, condition-by-year)
// ---------------------------------------------------------------------------

/// Render a stacked bar chart: one bar per x label, one colour per series.
pub fn stacked_bar_chart(
    ui: &mut Ui,
    id: &str,
    stack: &CategoricalStack,
    x_label: &str,
    y_label: &str,
) {
    if stack.labels.is_empty() {
        ui.label("No data to plot.");
        return;
    }

    let colors = SeriesColors::new(stack.series.iter().map(|s| s.label.clone()));
    let labels = stack.labels.clone();

    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark)
        })
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .height(320.0)
        .show(ui, |plot_ui| {
            let mut charts: Vec<BarChart> = Vec::new();
            for series in &stack.series {
                let bars: Vec<Bar> = series
                    .counts
                    .iter()
                    .enumerate()
                    .map(|(i, &count)| Bar::new(i as f64, count as f64).width(0.7))
                    .collect();

                let chart = {
                    let below: Vec<&BarChart> = charts.iter().collect();
                    BarChart::new(bars)
                        .name(&series.label)
                        .color(colors.color_for(&series.label))
                        .stack_on(&below)
                };
                charts.push(chart);
            }
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Axis labels sit on the integer bar positions; everything between stays
/// blank.
fn category_label(labels: &[String], mark: GridMark) -> String {
    let nearest = mark.value.round();
    if (mark.value - nearest).abs() > 0.05 || nearest < 0.0 {
        return String::new();
    }
    labels
        .get(nearest as usize)
        .cloned()
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Price overlay histogram
// ---------------------------------------------------------------------------

/// Render the two-manufacturer price comparison with blended bars.
pub fn price_overlay_chart(ui: &mut Ui, id: &str, hist: &PriceHistogram, normalize: bool) {
    if hist.series.is_empty() {
        ui.label("No listings for the selected manufacturers.");
        return;
    }

    let colors = SeriesColors::new(hist.series.iter().map(|s| s.label.clone()));
    let y_label = if normalize { "percent" } else { "count" };

    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label("price")
        .y_axis_label(y_label)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .height(320.0)
        .show(ui, |plot_ui| {
            for series in &hist.series {
                // Transparency keeps both distributions readable where they
                // overlap.
                let color = colors.color_for(&series.label).gamma_multiply(0.55);
                let bars: Vec<Bar> = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(i, &value)| {
                        let center = hist.min + (i as f64 + 0.5) * hist.bin_width;
                        Bar::new(center, value).width(hist.bin_width)
                    })
                    .collect();

                plot_ui.bar_chart(BarChart::new(bars).name(&series.label).color(color));
            }
        });
}
