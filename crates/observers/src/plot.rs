//! Rendering of [`Chart`]s in a native egui window.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::Chart;

/// Opens one blocking window with every chart stacked vertically.
///
/// A process can only open a native window once on some platforms, so runs
/// that produce several charts should show them together through this
/// function.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn show_all(window_title: &str, charts: Vec<Chart>) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(ChartApp { charts }))),
    )
}

/// The egui [`eframe::App`] that renders collected charts.
struct ChartApp {
    charts: Vec<Chart>,
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            #[allow(clippy::cast_precision_loss)]
            let count = self.charts.len().max(1) as f32;
            // Leave room for each chart's heading.
            let height = (ui.available_height() / count - 28.0).max(80.0);

            for (index, chart) in self.charts.iter().enumerate() {
                if !chart.title.is_empty() {
                    ui.heading(&chart.title);
                }

                let mut plot = Plot::new(("chart", index)).height(height);
                if chart.legend {
                    plot = plot.legend(Legend::default());
                }
                if let Some(label) = &chart.x_label {
                    plot = plot.x_axis_label(label.as_str());
                }

                plot.show(ui, |plot_ui| {
                    for trace in &chart.traces {
                        let points: PlotPoints = trace.points.iter().copied().collect();
                        plot_ui.line(Line::new(points).name(&trace.name));
                    }
                });
            }
        });
    }
}
