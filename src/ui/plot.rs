use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::{Stroke, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Plot, PlotUi};

use crate::color::{ColorMap, status_color};
use crate::data::aggregate::{ClosureCounts, DistributionSummary};
use crate::data::model::{Slot, Status};

const CHART_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Shared plot setup
// ---------------------------------------------------------------------------

/// Show a static (non-interactive) plot whose x axis shows category labels at
/// integer positions.
fn category_plot(
    ui: &mut Ui,
    id: &str,
    labels: Vec<String>,
    y_label: &str,
    add_items: impl FnOnce(&mut PlotUi),
) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label(y_label.to_string())
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            category_label(&labels, mark.value)
        })
        .show(ui, add_items);
}

/// Label for an x position, blank between categories.
fn category_label(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > f64::EPSILON || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// One coloured bar per park.
pub fn park_count_chart(ui: &mut Ui, counts: &BTreeMap<String, usize>, colors: &ColorMap) {
    let labels: Vec<String> = counts.keys().cloned().collect();
    category_plot(ui, "park_counts", labels, "Attractions", |plot_ui| {
        for (i, (park, &n)) in counts.iter().enumerate() {
            let bar = Bar::new(i as f64, n as f64)
                .name(park)
                .fill(colors.color_for(park))
                .width(0.6);
            plot_ui.bar_chart(BarChart::new(vec![bar]).name(park).color(colors.color_for(park)));
        }
    });
}

/// One bar per land, in the order given.
pub fn land_count_chart(ui: &mut Ui, counts: &[(String, usize)]) {
    let labels: Vec<String> = counts.iter().map(|(land, _)| land.clone()).collect();
    let colors = ColorMap::new(labels.iter().map(String::as_str));
    category_plot(ui, "land_counts", labels, "Count", |plot_ui| {
        for (i, (land, n)) in counts.iter().enumerate() {
            let color = colors.color_for(land);
            let bar = Bar::new(i as f64, *n as f64).name(land).fill(color).width(0.6);
            plot_ui.bar_chart(BarChart::new(vec![bar]).name(land).color(color));
        }
    });
}

/// Grouped open/closed bars per time of day.
pub fn closure_chart(ui: &mut Ui, counts: &ClosureCounts) {
    let labels: Vec<String> = Slot::ALL.iter().map(|s| s.label().to_string()).collect();
    category_plot(ui, "closure_counts", labels, "Attractions", |plot_ui| {
        for (offset, status) in [(-0.2, Status::Open), (0.2, Status::Closed)] {
            let bars: Vec<Bar> = Slot::ALL
                .iter()
                .enumerate()
                .map(|(i, &slot)| {
                    Bar::new(i as f64 + offset, counts.get(slot, status) as f64)
                        .name(format!("{slot} {status}"))
                        .width(0.35)
                })
                .collect();
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(status.to_string())
                    .color(status_color(status)),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Distribution plot
// ---------------------------------------------------------------------------

/// Box per (day, slot), grouped by slot along x and coloured by day.
pub fn distribution_chart(ui: &mut Ui, summaries: &[DistributionSummary], day_colors: &ColorMap) {
    let labels: Vec<String> = Slot::ALL.iter().map(|s| s.label().to_string()).collect();

    let mut days: Vec<&str> = Vec::new();
    for s in summaries {
        if !days.contains(&s.day.as_str()) {
            days.push(&s.day);
        }
    }
    let width = 0.8 / days.len().max(1) as f64;

    category_plot(ui, "wait_distribution", labels, "Wait time (min)", |plot_ui| {
        for (d, day) in days.iter().enumerate() {
            let color = day_colors.color_for(day);
            let offset = (d as f64 + 0.5) * width - 0.4;
            let boxes: Vec<BoxElem> = summaries
                .iter()
                .filter(|s| s.day == *day)
                .map(|s| {
                    BoxElem::new(
                        s.slot as usize as f64 + offset,
                        BoxSpread::new(s.min, s.q1, s.median, s.q3, s.max),
                    )
                    .name(format!("{} {} (n={})", s.day, s.slot, s.count))
                    .box_width(width * 0.8)
                    .fill(color.gamma_multiply(0.4))
                    .stroke(Stroke::new(1.5, color))
                })
                .collect();
            plot_ui.box_plot(BoxPlot::new(boxes).name(*day).color(color));
        }
    });
}
