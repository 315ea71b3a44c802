use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use acceptance_viewer::data::model::Category;
use acceptance_viewer::state::AppState;

use crate::color::category_color;

// ---------------------------------------------------------------------------
// Distribution chart (central panel)
// ---------------------------------------------------------------------------

/// Bar chart of predicted outcomes for the published dataset.
pub fn distribution_chart(ui: &mut Ui, state: &AppState) {
    let stats = &state.snapshot.stats;
    ui.strong("Prediction Distribution");

    if stats.total == 0 {
        ui.allocate_ui([ui.available_width(), 300.0].into(), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(format!("No data available for {}", state.snapshot.model));
            });
        });
        return;
    }

    let dark = ui.visuals().dark_mode;

    let charts: Vec<BarChart> = Category::ALL
        .iter()
        .enumerate()
        .map(|(i, &cat)| {
            let count = stats.count(cat);
            let bar = Bar::new(i as f64, count as f64)
                .width(0.8)
                .name(format!("{}: {count}", cat.label()))
                .fill(category_color(cat, dark));
            BarChart::new(vec![bar])
                .name(cat.label())
                .color(category_color(cat, dark))
        })
        .collect();

    Plot::new("distribution_plot")
        .height(300.0)
        .legend(Legend::default())
        .y_axis_label("Submissions")
        .x_axis_formatter(|mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            Category::ALL
                .get(idx as usize)
                .map(|cat| cat.label().to_string())
                .unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}
