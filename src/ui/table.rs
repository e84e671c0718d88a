use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::ListingDataset;

/// Fixed leading columns: the six required fields plus the derived
/// manufacturer; extra columns follow in source order.
const FIXED_HEADERS: [&str; 7] = [
    "model_year",
    "fuel",
    "model",
    "type",
    "condition",
    "price",
    "manufacturer",
];

// ---------------------------------------------------------------------------
// Listings table (all columns of the filtered selection)
// ---------------------------------------------------------------------------

/// Render the filtered listings as a scrollable table.
pub fn listings_table(ui: &mut Ui, dataset: &ListingDataset, indices: &[usize]) {
    if indices.is_empty() {
        ui.label("No listings match the current filter.");
        return;
    }

    let n_columns = FIXED_HEADERS.len() + dataset.extra_columns.len();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), n_columns)
        .max_scroll_height(320.0)
        .header(20.0, |mut header| {
            for name in FIXED_HEADERS {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
            for name in &dataset.extra_columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let listing = &dataset.listings[indices[row.index()]];

                row.col(|ui| {
                    ui.label(listing.model_year.to_string());
                });
                row.col(|ui| {
                    ui.label(&listing.fuel);
                });
                row.col(|ui| {
                    ui.label(&listing.model);
                });
                row.col(|ui| {
                    ui.label(&listing.vehicle_type);
                });
                row.col(|ui| {
                    ui.label(&listing.condition);
                });
                row.col(|ui| {
                    ui.label(format!("{:.0}", listing.price));
                });
                row.col(|ui| {
                    ui.label(&listing.manufacturer);
                });

                for column in &dataset.extra_columns {
                    let text = listing
                        .extra
                        .get(column)
                        .map(|cell| cell.to_string())
                        .unwrap_or_default();
                    row.col(|ui| {
                        ui.label(text);
                    });
                }
            });
        });
}
