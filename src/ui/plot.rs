use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::chart::{ChartKind, ChartSpec};

// ---------------------------------------------------------------------------
// ChartSpec → egui_plot
// ---------------------------------------------------------------------------

/// Render a chart description in the current panel.
pub fn render_chart(ui: &mut Ui, spec: &ChartSpec) {
    ui.strong(&spec.title);

    let mut plot = Plot::new(&spec.title)
        .x_axis_label(spec.x_label.clone())
        .y_axis_label(spec.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    // Bar charts carry their labels on the x axis; lines and scatters get a
    // legend instead.
    if matches!(spec.kind, ChartKind::Line | ChartKind::Scatter) {
        plot = plot.legend(Legend::default());
    }

    if let Some(categories) = spec.x_categories.clone() {
        plot = plot.x_axis_formatter(move |mark, _range| {
            let nearest = mark.value.round();
            if (mark.value - nearest).abs() > 1e-6 || nearest < 0.0 {
                return String::new();
            }
            categories
                .get(nearest as usize)
                .cloned()
                .unwrap_or_default()
        });
    }

    plot.show(ui, |plot_ui| {
        for series in &spec.series {
            match spec.kind {
                ChartKind::Bar => {
                    let bars: Vec<Bar> = series
                        .points
                        .iter()
                        .map(|p| Bar::new(p[0], p[1]).fill(series.color))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).name(&series.name));
                }
                ChartKind::Line => {
                    let points: PlotPoints = series.points.iter().copied().collect();
                    plot_ui.line(
                        Line::new(points)
                            .name(&series.name)
                            .color(series.color)
                            .width(1.5),
                    );
                    if series.markers {
                        let markers: PlotPoints = series.points.iter().copied().collect();
                        plot_ui.points(
                            Points::new(markers)
                                .name(&series.name)
                                .color(series.color)
                                .radius(series.radius)
                                .filled(true),
                        );
                    }
                }
                ChartKind::Scatter => {
                    let points: PlotPoints = series.points.iter().copied().collect();
                    plot_ui.points(
                        Points::new(points)
                            .name(&series.name)
                            .color(series.color)
                            .radius(series.radius)
                            .shape(MarkerShape::Circle)
                            .filled(true),
                    );
                }
            }
        }
    });
}
