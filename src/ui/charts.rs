use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Polygon, Text};

use crate::color::LabelColors;
use crate::view::{DashboardView, LabelPanel};

/// Arc resolution of a full pie.
const PIE_SEGMENTS: usize = 128;

// ---------------------------------------------------------------------------
// Overview numbers
// ---------------------------------------------------------------------------

pub fn overview(ui: &mut Ui, view: &DashboardView) {
    ui.heading("Data Overview");
    ui.label(format!("Total Records: {}", view.summary.total));
    ui.label(format!("Total Fake News: {}", view.summary.fake));
    ui.label(format!("Total Real News: {}", view.summary.real));

    let report = &view.load_report;
    if report.dropped() > 0 {
        ui.label(
            RichText::new(format!(
                "{} of {} rows dropped ({} missing text, {} missing label, {} unknown label)",
                report.dropped(),
                report.rows_read,
                report.missing_text,
                report.missing_label,
                report.unknown_label
            ))
            .weak(),
        );
    }
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// One pie slice: outline polygon plus where to put its percentage label.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub index: usize,
    pub fraction: f64,
    pub outline: Vec<[f64; 2]>,
    pub label_pos: [f64; 2],
}

/// Unit-radius slices for `values`, clockwise from twelve o'clock.
///
/// Zero values get no slice; an all-zero input gives no slices at all.
pub fn pie_slices(values: &[f64]) -> Vec<PieSlice> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = FRAC_PI_2;
    let mut slices = Vec::new();
    for (index, &value) in values.iter().enumerate() {
        if value <= 0.0 {
            continue;
        }
        let fraction = value / total;
        let sweep = fraction * TAU;
        let steps = ((fraction * PIE_SEGMENTS as f64).ceil() as usize).max(2);

        let mut outline = Vec::with_capacity(steps + 2);
        outline.push([0.0, 0.0]);
        for s in 0..=steps {
            let angle = start - sweep * s as f64 / steps as f64;
            outline.push([angle.cos(), angle.sin()]);
        }

        let mid = start - sweep / 2.0;
        let label_radius = if fraction > 0.999 { 0.0 } else { 0.6 };
        slices.push(PieSlice {
            index,
            fraction,
            outline,
            label_pos: [label_radius * mid.cos(), label_radius * mid.sin()],
        });
        start -= sweep;
    }
    slices
}

pub fn distribution_pie(ui: &mut Ui, view: &DashboardView, colors: &LabelColors) {
    ui.heading("Distribution of News Types");

    let values: Vec<f64> = view.distribution.iter().map(|(_, n)| *n as f64).collect();
    let slices = pie_slices(&values);

    Plot::new("label_distribution_pie")
        .height(320.0)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            for slice in &slices {
                let (label, count) = view.distribution[slice.index];
                let color = colors.pie(label);
                plot_ui.polygon(
                    Polygon::new(slice.outline.clone())
                        .name(format!("{label} ({count})"))
                        .fill_color(color)
                        .stroke(egui::Stroke::new(1.0, Color32::WHITE)),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(slice.label_pos[0], slice.label_pos[1]),
                    RichText::new(format!("{:.1}%", slice.fraction * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Word-frequency bar chart + table
// ---------------------------------------------------------------------------

pub fn word_bar_chart(ui: &mut Ui, panel: &LabelPanel, color: Color32) {
    let words: Vec<String> = panel.top_words.iter().map(|w| w.word.clone()).collect();

    let bars: Vec<Bar> = panel
        .top_words
        .iter()
        .enumerate()
        .map(|(i, w)| {
            Bar::new(i as f64, w.count as f64)
                .name(&w.word)
                .fill(color)
                .width(0.8)
        })
        .collect();

    Plot::new(format!("top_words_{}", panel.label))
        .height(300.0)
        .x_axis_label("Word")
        .y_axis_label("Frequency")
        .allow_drag(false)
        .allow_scroll(false)
        .include_y(0.0)
        .x_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if idx < 0.0 || (idx - mark.value).abs() > 1e-6 {
                return String::new();
            }
            words.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color).name("Frequency"));
        });
}

pub fn top_words_table(ui: &mut Ui, panel: &LabelPanel) {
    ui.push_id(format!("top_words_table_{}", panel.label), |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::exact(40.0))
            .column(Column::remainder())
            .column(Column::exact(90.0))
            .max_scroll_height(240.0)
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                header.col(|ui| {
                    ui.strong("Word");
                });
                header.col(|ui| {
                    ui.strong("Frequency");
                });
            })
            .body(|mut body| {
                for (i, w) in panel.top_words.iter().enumerate() {
                    body.row(18.0, |mut row| {
                        row.col(|ui| {
                            ui.label((i + 1).to_string());
                        });
                        row.col(|ui| {
                            ui.label(&w.word);
                        });
                        row.col(|ui| {
                            ui.label(w.count.to_string());
                        });
                    });
                }
            });
    });
}
