use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use acceptance_viewer::data::model::{placeholder_metrics, Category, PredictionRecord};
use acceptance_viewer::data::registry::ModelId;
use acceptance_viewer::state::AppState;

use crate::color::{category_color, status_color};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar with the model selector.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(ui, state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                let ctx = ui.ctx().clone();
                state.reload(move || ctx.request_repaint());
                ui.close_menu();
            }
        });

        ui.separator();

        let mut selected = state.selected_model;
        egui::ComboBox::from_id_salt("model_selector")
            .selected_text(selected.name())
            .show_ui(ui, |ui: &mut Ui| {
                for id in ModelId::ALL {
                    ui.selectable_value(&mut selected, id, id.name());
                }
            });
        if selected != state.selected_model {
            let ctx = ui.ctx().clone();
            state.select_model(selected, move || ctx.request_repaint());
        }

        ui.separator();

        if state.loading {
            ui.spinner();
        } else {
            ui.label(format!(
                "{} predictions ({})",
                state.snapshot.dataset.len(),
                state.snapshot.model.name()
            ));
        }

        ui.separator();

        let dark = ui.visuals().dark_mode;
        ui.label(RichText::new(&state.status.text).color(status_color(state.status.kind, dark)));
    });
}

// ---------------------------------------------------------------------------
// Left side panel – search
// ---------------------------------------------------------------------------

/// Render the search box and, if any, the matched prediction.
pub fn search_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Search");
    ui.separator();

    let mut submit = false;
    ui.horizontal(|ui: &mut Ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut state.query)
                .hint_text("Submission ID")
                .desired_width(160.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }
        if ui.button("Search").clicked() {
            submit = true;
        }
    });

    if submit {
        let outcome = state.perform_search();
        log::debug!("Search for {:?}: {}", state.query, outcome.message());
    }

    ui.add_space(8.0);

    if let Some(record) = &state.result {
        prediction_card(ui, record);
    }
}

fn prediction_card(ui: &mut Ui, record: &PredictionRecord) {
    let dark = ui.visuals().dark_mode;

    ui.group(|ui: &mut Ui| {
        ui.label(RichText::new("Predicted Status").small());
        let mut label = RichText::new(record.status_label()).heading().strong();
        if let Some(cat) = record.category() {
            label = label.color(category_color(cat, dark));
        }
        ui.label(label);
    });

    ui.add_space(8.0);
    ui.strong("Prediction Probabilities");

    for cat in Category::ALL {
        let percent = record.percent(cat);
        ui.horizontal(|ui: &mut Ui| {
            ui.add_sized([70.0, 18.0], egui::Label::new(cat.label()));
            let text = if percent >= 5.0 {
                format!("{percent:.1}%")
            } else {
                String::new()
            };
            ui.add(
                egui::ProgressBar::new((record.probability(cat) as f32).clamp(0.0, 1.0))
                    .desired_width(120.0)
                    .fill(category_color(cat, dark))
                    .text(text),
            );
            ui.strong(format!("{percent:.1}%"));
        });
    }

    ui.add_space(8.0);
    ui.separator();
    ui.label(format!("Paper ID: {}", record.id));
    ui.label(
        RichText::new(
            "Note: This prediction is based on tabular features from review scores and metadata.",
        )
        .small()
        .weak(),
    );
}

// ---------------------------------------------------------------------------
// Central panel – statistics and metrics
// ---------------------------------------------------------------------------

/// Total, acceptance rate and rejection rate, plus accepted rows with an
/// unrecognised status when there are any.
pub fn stats_row(ui: &mut Ui, state: &AppState) {
    let stats = &state.snapshot.stats;
    ui.horizontal(|ui: &mut Ui| {
        stat_tile(ui, "Total Predictions", stats.total.to_string());
        stat_tile(ui, "Accept Rate", format!("{}%", stats.accept_rate()));
        stat_tile(ui, "Reject Rate", format!("{}%", stats.reject_rate()));
        let uncategorized = stats.uncategorized();
        if uncategorized > 0 {
            stat_tile(ui, "Uncategorized", uncategorized.to_string());
        }
    });
}

fn stat_tile(ui: &mut Ui, title: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(title).small().weak());
            ui.label(RichText::new(value).heading().strong());
        });
    });
}

/// Model name, description and its validation metrics.
pub fn metrics_panel(ui: &mut Ui, state: &AppState) {
    let source = state.snapshot.model.source();
    ui.heading(source.name);
    ui.label(RichText::new(source.description).weak());
    ui.add_space(6.0);

    let entries = match &state.snapshot.metrics {
        Some(doc) => doc.display_entries(),
        None => placeholder_metrics(),
    };

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Metric");
            });
            header.col(|ui| {
                ui.strong("Value");
            });
        })
        .body(|mut body| {
            for (label, value) in &entries {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(label.to_uppercase());
                    });
                    row.col(|ui| {
                        ui.strong(value);
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(ui: &Ui, state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open prediction data folder")
        .set_directory(state.data_root())
        .pick_folder();

    if let Some(path) = folder {
        let ctx = ui.ctx().clone();
        state.set_data_root(path, move || ctx.request_repaint());
    }
}
