use eframe::egui;

use crate::data::{filter, histogram};
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CarScopeApp {
    pub state: AppState,
}

impl CarScopeApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for CarScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu / status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("controls_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    page_content(ui, &self.state);
                });
        });
    }
}

// ---------------------------------------------------------------------------
// Page content: every section is a pure function of the current state
// ---------------------------------------------------------------------------

fn page_content(ui: &mut egui::Ui, state: &AppState) {
    ui.heading("Vehicle listings analysis");

    let dataset = match &state.dataset {
        Some(dataset) => dataset,
        None => {
            ui.label("Open a dataset to explore listings (File → Open…).");
            return;
        }
    };

    if dataset.is_empty() {
        ui.label("Every row was dropped during cleaning; nothing to show.");
        return;
    }

    // ---- Section 1: filtered table ----
    ui.add_space(12.0);
    ui.strong("Vehicle types by manufacturer");
    ui.add_space(4.0);
    table::listings_table(ui, dataset, &state.visible_indices);

    // ---- Section 2: type-by-manufacturer chart (same selection) ----
    ui.add_space(12.0);
    let type_stack = histogram::types_by_manufacturer(dataset, &state.visible_indices);
    plot::stacked_bar_chart(ui, "types_by_manufacturer", &type_stack, "manufacturer", "count");

    // ---- Section 3: condition vs model year, over the *unfiltered* data ----
    ui.add_space(12.0);
    ui.strong("Histogram of condition vs model_year");
    ui.add_space(4.0);
    let condition_stack = histogram::condition_by_year(dataset);
    plot::stacked_bar_chart(ui, "condition_by_year", &condition_stack, "model_year", "count");

    // ---- Section 4: price comparison between the selected pair ----
    ui.add_space(12.0);
    ui.strong("Compare price distribution between manufacturers");
    ui.add_space(4.0);
    match (&state.manufacturer1, &state.manufacturer2) {
        (Some(m1), Some(m2)) => {
            ui.label(format!("Price distribution: {m1} vs {m2}"));
            let indices = filter::manufacturer_pair_indices(dataset, m1, m2);
            let hist =
                histogram::price_distribution(dataset, &indices, m1, m2, state.normalize);
            plot::price_overlay_chart(ui, "price_distribution", &hist, state.normalize);
        }
        _ => {
            ui.label("Select two manufacturers to compare price distributions.");
        }
    }
}
