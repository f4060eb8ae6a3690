use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::RecordField;
use crate::state::AppState;

/// Drop-down id and placeholder prompt per control.
const CONTROLS: [(RecordField, &str, &str); 3] = [
    (RecordField::Group, "group_filter", "Select a group"),
    (RecordField::TimePeriod, "time_filter", "Select a time period"),
    (RecordField::Indicator, "indicator_filter", "Select an indicator"),
];

// ---------------------------------------------------------------------------
// Left side panel – selection controls
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label(if state.loading {
            "Loading dataset…"
        } else {
            "No dataset loaded."
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (field, id, prompt) in CONTROLS {
                ui.strong(field.to_string());
                let current = match field {
                    RecordField::Group => state.selection.group.clone(),
                    RecordField::TimePeriod => state.selection.time_period.clone(),
                    RecordField::Indicator => state.selection.indicator.clone(),
                };
                let options = state.catalog.options(field);
                if let Some(chosen) = selector(ui, id, prompt, options, current.as_deref()) {
                    state.select(field, chosen);
                }
                ui.add_space(8.0);
            }
        });
}

/// A single-selection drop-down whose placeholder cannot be picked.
/// Returns the newly chosen option, if any.
fn selector(
    ui: &mut Ui,
    id: &str,
    prompt: &str,
    options: &[String],
    current: Option<&str>,
) -> Option<String> {
    let mut chosen = None;
    egui::ComboBox::from_id_salt(id)
        .width(ui.available_width())
        .selected_text(current.unwrap_or(prompt))
        .show_ui(ui, |ui: &mut Ui| {
            ui.add_enabled_ui(false, |ui: &mut Ui| {
                let _ = ui.selectable_label(current.is_none(), prompt);
            });
            for option in options {
                if ui
                    .selectable_label(current == Some(option.as_str()), option)
                    .clicked()
                {
                    chosen = Some(option.clone());
                }
            }
        });
    chosen
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(ui.ctx(), state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.loading {
            ui.spinner();
            ui.label("Loading…");
        } else if let Some(ds) = &state.dataset {
            let source = ds
                .source
                .as_deref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!("{} records from {source}", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(ctx: &egui::Context, state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open survey data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.start_load(path, ctx);
    }
}
