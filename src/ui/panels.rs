use eframe::egui::{self, Color32, RichText, Ui};

use crate::chart::DashboardSnapshot;
use crate::config::{PAYLOAD_SLIDER_MAX, PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_STEP};
use crate::data::filter::{SiteSelection, search_sites};
use crate::data::model::PayloadRange;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Control panel – site selector and payload range
// ---------------------------------------------------------------------------

/// Render the two controls. Changes go straight to the state setters.
pub fn controls(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Launch Site");
    ui.add(
        egui::TextEdit::singleline(&mut state.site_query)
            .hint_text("Select a Launch Site here")
            .desired_width(f32::INFINITY),
    );
    let current = state.selection.site.clone();
    let mut picked = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current == SiteSelection::All, "All Sites")
                .clicked()
            {
                picked = Some(SiteSelection::All);
            }
            for site in search_sites(state.dataset.sites(), &state.site_query) {
                let text = RichText::new(site).color(state.site_colors.color_for(site));
                if ui
                    .selectable_label(current.site() == Some(site.as_str()), text)
                    .clicked()
                {
                    picked = Some(SiteSelection::Site(site.clone()));
                }
            }
        });
    if let Some(site) = picked {
        state.set_site(site);
    }

    ui.add_space(8.0);
    ui.strong("Payload range (Kg):");

    let PayloadRange { mut low, mut high } = state.selection.payload;
    let span = PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX;
    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, span.clone())
                .step_by(PAYLOAD_SLIDER_STEP)
                .text("min"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, span)
                .step_by(PAYLOAD_SLIDER_STEP)
                .text("max"),
        )
        .changed();
    if low_changed || high_changed {
        state.set_payload_range(PayloadRange::new(low, high));
    }

    if let Some(summary) = state.payload_summary() {
        ui.label(RichText::new(summary).weak());
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export charts…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(state.status_line());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export charts")
        .set_file_name("launch_charts.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        let snapshot = DashboardSnapshot {
            selection: &state.selection,
            pie: &state.pie,
            scatter: &state.scatter,
        };
        match snapshot.write_json(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
