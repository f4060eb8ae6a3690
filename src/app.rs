use eframe::egui::{self, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
    pub config: DashboardConfig,
}

impl DashboardApp {
    /// Create the app and start loading the configured dataset.
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut state = AppState::default();
        state.start_load(config.data_path.clone(), &cc.egui_ctx);
        Self { state, config }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selection controls ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("No dataset loaded  (File → Open…)");
                });
                return;
            }

            let views = self.state.chart_views();
            let selection = &self.state.selection;

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    plot::line_chart(ui, &views.line, selection, &self.config.line_chart);
                    table::records_table(ui, "line_records", &views.line);
                    ui.separator();
                    plot::bar_chart(ui, &views.bar, selection, &self.config.bar_chart);
                    table::records_table(ui, "bar_records", &views.bar);
                });
        });
    }
}
