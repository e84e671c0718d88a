use std::path::Path;

use crate::data::filter::small_manufacturer_indices;
use crate::data::loader;
use crate::data::model::ListingDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Dropdown picks used when present in the data.
const DEFAULT_MANUFACTURER_1: &str = "chevrolet";
const DEFAULT_MANUFACTURER_2: &str = "bmw";

/// The full UI state, independent of rendering. The controls mirror the
/// page: one toggle for the table + type chart, a manufacturer pair and a
/// normalize toggle for the price chart.
pub struct AppState {
    /// Loaded dataset (None until a file loads).
    pub dataset: Option<ListingDataset>,

    /// Show manufacturers with fewer than 1000 ads in the table/type chart.
    pub include_small: bool,

    /// Indices passing the small-manufacturer toggle (cached).
    pub visible_indices: Vec<usize>,

    /// The two manufacturers compared in the price chart.
    pub manufacturer1: Option<String>,
    pub manufacturer2: Option<String>,

    /// Scale each price series to percent of its own listings.
    pub normalize: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            include_small: true,
            visible_indices: Vec::new(),
            manufacturer1: None,
            manufacturer2: None,
            normalize: true,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset the dropdown selections.
    pub fn set_dataset(&mut self, dataset: ListingDataset) {
        let (manufacturer1, manufacturer2) = default_pair(&dataset.manufacturers);
        self.manufacturer1 = manufacturer1;
        self.manufacturer2 = manufacturer2;
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Load a dataset file into the state; failures land in the status bar
    /// instead of aborting the app.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} listings across {} manufacturers from {}",
                    dataset.len(),
                    dataset.manufacturers.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Recompute `visible_indices` after a toggle change.
    pub fn refilter(&mut self) {
        match &self.dataset {
            Some(dataset) => {
                self.visible_indices = small_manufacturer_indices(dataset, self.include_small);
            }
            None => self.visible_indices.clear(),
        }
    }

    /// Flip the small-manufacturer toggle and refilter.
    pub fn set_include_small(&mut self, include_small: bool) {
        self.include_small = include_small;
        self.refilter();
    }
}

/// Dropdown defaults: the well-known pair when present, else the first two
/// distinct manufacturers, clamped to whatever the dataset actually has. A
/// single-manufacturer dataset selects it twice; an empty one selects
/// nothing.
fn default_pair(manufacturers: &[String]) -> (Option<String>, Option<String>) {
    let pick = |wanted: &str, fallback: usize| {
        manufacturers
            .iter()
            .find(|m| m.as_str() == wanted)
            .cloned()
            .or_else(|| manufacturers.get(fallback).cloned())
            .or_else(|| manufacturers.last().cloned())
    };
    (
        pick(DEFAULT_MANUFACTURER_1, 0),
        pick(DEFAULT_MANUFACTURER_2, 1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    fn dataset_from(rows: &[&str]) -> ListingDataset {
        let mut csv = String::from("model_year,fuel,model,type,condition,price\n");
        for row in rows {
            csv.push_str(row);
            csv.push('\n');
        }
        read_csv(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_default_pair_prefers_known_manufacturers() {
        let dataset = dataset_from(&[
            "2012,gas,ford focus,sedan,good,7000",
            "2015,gas,bmw x5,suv,good,24000",
            "2016,gas,chevrolet malibu,sedan,excellent,15000",
        ]);
        let (m1, m2) = default_pair(&dataset.manufacturers);
        assert_eq!(m1.as_deref(), Some("chevrolet"));
        assert_eq!(m2.as_deref(), Some("bmw"));
    }

    #[test]
    fn test_default_pair_falls_back_to_first_two() {
        let dataset = dataset_from(&[
            "2012,gas,ford focus,sedan,good,7000",
            "2015,gas,toyota corolla,sedan,good,9000",
        ]);
        let (m1, m2) = default_pair(&dataset.manufacturers);
        assert_eq!(m1.as_deref(), Some("ford"));
        assert_eq!(m2.as_deref(), Some("toyota"));
    }

    #[test]
    fn test_default_pair_clamps_to_single_manufacturer() {
        let dataset = dataset_from(&["2012,gas,ford focus,sedan,good,7000"]);
        let (m1, m2) = default_pair(&dataset.manufacturers);
        assert_eq!(m1.as_deref(), Some("ford"));
        assert_eq!(m2.as_deref(), Some("ford"));
    }

    #[test]
    fn test_default_pair_empty_dataset_selects_nothing() {
        let (m1, m2) = default_pair(&[]);
        assert!(m1.is_none());
        assert!(m2.is_none());
    }

    #[test]
    fn test_set_dataset_respects_current_toggle() {
        let mut state = AppState::default();
        state.include_small = false;

        let dataset = dataset_from(&[
            "2015,gas,bmw x5,suv,good,24000",
            "2016,gas,chevrolet malibu,sedan,excellent,15000",
        ]);
        state.set_dataset(dataset);

        // both manufacturers have a single ad, far below the threshold
        assert!(state.visible_indices.is_empty());

        state.set_include_small(true);
        assert_eq!(state.visible_indices.len(), 2);
    }
}
