use eframe::egui;

use crate::data::model::LaunchDataset;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";
const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashboardApp {
    pub state: AppState,
}

impl LaunchDashboardApp {
    pub fn new(dataset: LaunchDataset) -> Self {
        Self {
            state: AppState::new(dataset),
        }
    }
}

impl eframe::App for LaunchDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::controls(ui, &mut self.state);
            });

        // ---- Bottom panel: visible launches ----
        egui::TopBottomPanel::bottom("launch_table")
            .resizable(true)
            .default_height(180.0)
            .show(ctx, |ui| {
                table::launch_table(ui, &self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(
                    egui::RichText::new(DASHBOARD_TITLE)
                        .size(32.0)
                        .color(egui::Color32::from_rgb(0x50, 0x3D, 0x36)),
                );
            });
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                let state = &self.state;
                plot::success_pie(ui, &state.pie, &state.site_colors, CHART_HEIGHT);
                ui.add_space(12.0);
                plot::payload_scatter(ui, &state.scatter, &state.booster_colors, CHART_HEIGHT);
            });
        });
    }
}
