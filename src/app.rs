use eframe::egui;

use acceptance_viewer::config::Config;
use acceptance_viewer::state::AppState;

use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AcceptanceViewerApp {
    pub state: AppState,
}

impl AcceptanceViewerApp {
    /// Build the app and kick off the first load.
    pub fn new(cc: &eframe::CreationContext<'_>, config: &Config) -> Self {
        let mut state = AppState::new(config);
        let ctx = cc.egui_ctx.clone();
        state.reload(move || ctx.request_repaint());
        Self { state }
    }
}

impl eframe::App for AcceptanceViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_reload();

        // ---- Top panel: menu bar, model selector ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: search ----
        egui::SidePanel::left("search_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::search_panel(ui, &mut self.state);
            });

        // ---- Central panel: stats, chart, metrics ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::stats_row(ui, &self.state);
                    ui.separator();
                    plot::distribution_chart(ui, &self.state);
                    ui.separator();
                    panels::metrics_panel(ui, &self.state);
                });
        });
    }
}
