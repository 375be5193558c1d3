use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Launches passing both controls, one row each.
pub fn launch_table(ui: &mut Ui, state: &AppState) {
    let dataset = &state.dataset;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Launch Site", "Payload Mass (kg)", "Outcome", "Booster"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.visible_indices.len(), |mut row| {
                let rec = dataset.record(state.visible_indices[row.index()]);
                row.col(|ui| {
                    ui.label(&rec.launch_site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", rec.payload_mass_kg));
                });
                row.col(|ui| {
                    let (text, color) = if rec.outcome.is_success() {
                        ("success", Color32::from_rgb(60, 170, 90))
                    } else {
                        ("failure", Color32::from_rgb(220, 80, 60))
                    };
                    ui.label(RichText::new(text).color(color));
                });
                row.col(|ui| {
                    ui.label(RichText::new(&rec.booster_category).color(
                        state.booster_colors.color_for(&rec.booster_category),
                    ));
                });
            });
        });
}
