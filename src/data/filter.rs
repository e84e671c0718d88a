use super::model::ListingDataset;

// ---------------------------------------------------------------------------
// Reactive filters: control values → listing indices
// ---------------------------------------------------------------------------

/// Manufacturers with fewer listings than this count as "small".
pub const SMALL_MANUFACTURER_THRESHOLD: usize = 1000;

/// Indices of listings passing the small-manufacturer toggle.
///
/// `include_small == true` passes everything through; otherwise only
/// listings whose manufacturer has at least
/// [`SMALL_MANUFACTURER_THRESHOLD`] ads survive. The threshold is
/// inclusive: a manufacturer with exactly 1000 listings is kept.
pub fn small_manufacturer_indices(dataset: &ListingDataset, include_small: bool) -> Vec<usize> {
    if include_small {
        return (0..dataset.len()).collect();
    }

    let big = dataset.big_manufacturers(SMALL_MANUFACTURER_THRESHOLD);
    dataset
        .listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| big.contains(listing.manufacturer.as_str()))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of listings whose manufacturer matches either selection.
///
/// Runs over the cleaned, unfiltered collection. Selecting the same
/// manufacturer twice simply yields that manufacturer's listings once; the
/// predicate is a plain equality-or, with no dedup step.
pub fn manufacturer_pair_indices(
    dataset: &ListingDataset,
    manufacturer1: &str,
    manufacturer2: &str,
) -> Vec<usize> {
    dataset
        .listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| {
            listing.manufacturer == manufacturer1 || listing.manufacturer == manufacturer2
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;
    use crate::data::model::{CellValue, Listing, ListingDataset, RawListing};
    use std::collections::BTreeMap;

    fn listing(model: &str) -> Listing {
        Listing::from_raw(RawListing {
            model_year: Some(2015),
            fuel: Some("gas".into()),
            model: Some(CellValue::String(model.into())),
            vehicle_type: Some("suv".into()),
            condition: Some("good".into()),
            price: Some(20000.0),
            extra: BTreeMap::new(),
        })
        .unwrap()
    }

    /// 1000 ford listings (exactly at the threshold) and 3 saab ones.
    fn threshold_dataset() -> ListingDataset {
        let mut listings = Vec::new();
        for _ in 0..SMALL_MANUFACTURER_THRESHOLD {
            listings.push(listing("ford focus"));
        }
        for _ in 0..3 {
            listings.push(listing("saab 900"));
        }
        ListingDataset::from_listings(listings, Vec::new())
    }

    #[test]
    fn test_include_small_passes_everything_through() {
        let dataset = threshold_dataset();
        let indices = small_manufacturer_indices(&dataset, true);
        assert_eq!(indices.len(), dataset.len());
    }

    #[test]
    fn test_exclude_small_keeps_exact_threshold_count() {
        let dataset = threshold_dataset();
        let indices = small_manufacturer_indices(&dataset, false);

        // ford sits exactly on the threshold and must be retained
        assert_eq!(indices.len(), SMALL_MANUFACTURER_THRESHOLD);
        assert!(indices
            .iter()
            .all(|&i| dataset.listings[i].manufacturer == "ford"));
    }

    #[test]
    fn test_pair_filter_restricts_to_selected_manufacturers() {
        let listings = vec![
            listing("bmw 320"),
            listing("chevrolet malibu"),
            listing("ford focus"),
            listing("bmw x5"),
        ];
        let dataset = ListingDataset::from_listings(listings, Vec::new());

        let indices = manufacturer_pair_indices(&dataset, "bmw", "chevrolet");
        assert_eq!(indices, vec![0, 1, 3]);
        assert!(indices
            .iter()
            .all(|&i| ["bmw", "chevrolet"].contains(&dataset.listings[i].manufacturer.as_str())));
    }

    #[test]
    fn test_pair_filter_same_manufacturer_twice() {
        let listings = vec![listing("bmw 320"), listing("ford focus"), listing("bmw x5")];
        let dataset = ListingDataset::from_listings(listings, Vec::new());

        let indices = manufacturer_pair_indices(&dataset, "bmw", "bmw");
        assert_eq!(indices, vec![0, 2]);
    }

    // The two-row walkthrough: both rows clean, each manufacturer has a
    // single ad, so excluding small manufacturers empties the table while
    // the year/condition chart (which bypasses this filter) still sees both.
    #[test]
    fn test_two_row_walkthrough() {
        let csv = "\
model_year,fuel,model,type,condition,price
2015,gas,bmw x5,suv,good,20000
2016,gas,chevrolet malibu,sedan,excellent,15000
";
        let dataset = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.manufacturers, vec!["bmw", "chevrolet"]);

        assert!(small_manufacturer_indices(&dataset, false).is_empty());
        assert_eq!(small_manufacturer_indices(&dataset, true).len(), 2);

        let by_year = crate::data::histogram::condition_by_year(&dataset);
        assert_eq!(by_year.labels, vec!["2015", "2016"]);
        let total: u64 = by_year.series.iter().flat_map(|s| s.counts.iter()).sum();
        assert_eq!(total, 2);
    }
}
