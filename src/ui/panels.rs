use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – the four controls
// ---------------------------------------------------------------------------

/// Render the left controls panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let manufacturers = match &state.dataset {
        Some(dataset) => dataset.manufacturers.clone(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ui.strong("Manufacturer filter");
    let mut include_small = state.include_small;
    if ui
        .checkbox(
            &mut include_small,
            "Include manufacturers with less than 1000 ads",
        )
        .changed()
    {
        state.set_include_small(include_small);
    }

    ui.add_space(8.0);
    ui.separator();

    ui.strong("Compare price distribution");
    manufacturer_combo(
        ui,
        "manufacturer_1",
        "Select manufacturer 1",
        &manufacturers,
        &mut state.manufacturer1,
    );
    manufacturer_combo(
        ui,
        "manufacturer_2",
        "Select manufacturer 2",
        &manufacturers,
        &mut state.manufacturer2,
    );
    ui.checkbox(&mut state.normalize, "Normalize histogram (percent)");
}

/// One manufacturer dropdown over the distinct-manufacturer list.
fn manufacturer_combo(
    ui: &mut Ui,
    id: &str,
    label: &str,
    manufacturers: &[String],
    selection: &mut Option<String>,
) {
    ui.label(label);
    let current = selection.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for manufacturer in manufacturers {
                if ui
                    .selectable_label(current == *manufacturer, manufacturer)
                    .clicked()
                {
                    *selection = Some(manufacturer.clone());
                }
            }
        });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dataset) = &state.dataset {
            ui.label(format!(
                "{} listings loaded, {} shown",
                dataset.len(),
                state.visible_indices.len()
            ));
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

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open vehicle listings")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
