use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::CleanedRecord;
use crate::ui::plot::format_percent;

const HEADERS: [&str; 5] = ["Time Period", "Group", "Subgroup", "Value", "95% CI"];

/// Collapsible listing of the records behind one chart.
pub fn records_table(ui: &mut Ui, id: &str, view: &[&CleanedRecord]) {
    egui::CollapsingHeader::new(format!("Records ({})", view.len()))
        .id_salt(id)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if view.is_empty() {
                ui.label("No records.");
                return;
            }
            ui.push_id(id, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .cell_layout(Layout::left_to_right(Align::Center))
                    .columns(Column::auto(), HEADERS.len() - 1)
                    .column(Column::remainder())
                    .max_scroll_height(200.0)
                    .header(20.0, |mut header| {
                        for title in HEADERS {
                            header.col(|ui: &mut Ui| {
                                ui.strong(title);
                            });
                        }
                    })
                    .body(|mut body| {
                        for rec in view {
                            body.row(18.0, |mut row| {
                                row.col(|ui: &mut Ui| {
                                    ui.label(&rec.time_period);
                                });
                                row.col(|ui: &mut Ui| {
                                    ui.label(&rec.group);
                                });
                                row.col(|ui: &mut Ui| {
                                    ui.label(&rec.subgroup);
                                });
                                row.col(|ui: &mut Ui| {
                                    ui.label(format_percent(rec.value));
                                });
                                row.col(|ui: &mut Ui| {
                                    ui.label(ci_cell(rec));
                                });
                            });
                        }
                    });
            });
        });
}

/// CI bounds as shown in the table; unparseable bounds read "n/a".
fn ci_cell(rec: &CleanedRecord) -> String {
    let bound = |b: Option<f64>| match b {
        Some(v) if v.is_finite() => format_percent(v),
        Some(_) => "n/a".to_string(),
        None => "–".to_string(),
    };
    format!("{} to {}", bound(rec.ci_lower), bound(rec.ci_upper))
}
