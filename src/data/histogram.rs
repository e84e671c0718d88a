use std::collections::HashMap;

use super::model::ListingDataset;

// ---------------------------------------------------------------------------
// Chart data: the binning/counting the plots render
// ---------------------------------------------------------------------------

/// Number of price bins in the comparison chart.
pub const PRICE_BINS: usize = 50;

/// Counts for a stacked bar chart: one bar per label, one stacked segment
/// per series.
#[derive(Debug, Clone, Default)]
pub struct CategoricalStack {
    /// X-axis category labels, in display order.
    pub labels: Vec<String>,
    /// One entry per stack colour; `counts` is parallel to `labels`.
    pub series: Vec<StackSeries>,
}

#[derive(Debug, Clone)]
pub struct StackSeries {
    pub label: String,
    pub counts: Vec<u64>,
}

/// Stacked counts of vehicle type per manufacturer over the given listing
/// indices (the small-manufacturer-filtered selection). Manufacturers
/// appear in first-encounter order of the selection, stack segments in
/// first-encounter order of their type.
pub fn types_by_manufacturer(dataset: &ListingDataset, indices: &[usize]) -> CategoricalStack {
    let mut stack = CategoricalStack::default();
    let mut label_pos: HashMap<String, usize> = HashMap::new();
    let mut series_pos: HashMap<String, usize> = HashMap::new();

    for &i in indices {
        let listing = &dataset.listings[i];

        let xi = *label_pos
            .entry(listing.manufacturer.clone())
            .or_insert_with(|| {
                stack.labels.push(listing.manufacturer.clone());
                stack.labels.len() - 1
            });
        let si = *series_pos
            .entry(listing.vehicle_type.clone())
            .or_insert_with(|| {
                stack.series.push(StackSeries {
                    label: listing.vehicle_type.clone(),
                    counts: Vec::new(),
                });
                stack.series.len() - 1
            });

        let counts = &mut stack.series[si].counts;
        if counts.len() < stack.labels.len() {
            counts.resize(stack.labels.len(), 0);
        }
        counts[xi] += 1;
    }

    for series in &mut stack.series {
        series.counts.resize(stack.labels.len(), 0);
    }
    stack
}

/// Stacked counts of condition per model year over the full cleaned
/// collection. This chart deliberately bypasses the small-manufacturer
/// filter. Years ascend on the x-axis.
pub fn condition_by_year(dataset: &ListingDataset) -> CategoricalStack {
    let mut years: Vec<i32> = dataset.listings.iter().map(|l| l.model_year).collect();
    years.sort_unstable();
    years.dedup();

    let year_pos: HashMap<i32, usize> = years.iter().enumerate().map(|(i, &y)| (y, i)).collect();
    let labels: Vec<String> = years.iter().map(|y| y.to_string()).collect();

    let mut series: Vec<StackSeries> = Vec::new();
    let mut series_pos: HashMap<String, usize> = HashMap::new();

    for listing in &dataset.listings {
        let xi = year_pos[&listing.model_year];
        let si = *series_pos
            .entry(listing.condition.clone())
            .or_insert_with(|| {
                series.push(StackSeries {
                    label: listing.condition.clone(),
                    counts: vec![0; labels.len()],
                });
                series.len() - 1
            });
        series[si].counts[xi] += 1;
    }

    CategoricalStack { labels, series }
}

// ---------------------------------------------------------------------------
// Price histogram (overlay comparison)
// ---------------------------------------------------------------------------

/// Fixed-bin price histogram of the two selected manufacturers. Bin edges
/// are shared (computed over the combined price range) so the two series
/// overlay exactly.
#[derive(Debug, Clone, Default)]
pub struct PriceHistogram {
    /// Left edge of the first bin.
    pub min: f64,
    /// Width of every bin; > 0 whenever `series` is non-empty.
    pub bin_width: f64,
    pub series: Vec<PriceSeries>,
}

#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub label: String,
    /// Per-bin value: a raw count, or a percentage of the series' own
    /// listings when normalized.
    pub values: Vec<f64>,
}

/// Bin the selected listings' prices into [`PRICE_BINS`] equal-width bins.
///
/// `indices` is the manufacturer-pair selection; picking the same
/// manufacturer twice produces a single series. When `normalize` is set,
/// each series is scaled independently so its own bins sum to 100. An empty
/// selection yields no series; an all-equal price range collapses into the
/// first bin rather than dividing by zero.
pub fn price_distribution(
    dataset: &ListingDataset,
    indices: &[usize],
    manufacturer1: &str,
    manufacturer2: &str,
    normalize: bool,
) -> PriceHistogram {
    if indices.is_empty() {
        return PriceHistogram::default();
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &i in indices {
        let price = dataset.listings[i].price;
        min = min.min(price);
        max = max.max(price);
    }

    let span = max - min;
    let bin_width = if span > 0.0 { span / PRICE_BINS as f64 } else { 1.0 };

    let mut labels = vec![manufacturer1.to_string()];
    if manufacturer2 != manufacturer1 {
        labels.push(manufacturer2.to_string());
    }
    let mut series: Vec<PriceSeries> = labels
        .into_iter()
        .map(|label| PriceSeries {
            label,
            values: vec![0.0; PRICE_BINS],
        })
        .collect();

    for &i in indices {
        let listing = &dataset.listings[i];
        let si = if listing.manufacturer == manufacturer1 { 0 } else { 1 };
        let Some(slot) = series.get_mut(si) else {
            continue;
        };
        let bin = (((listing.price - min) / bin_width) as usize).min(PRICE_BINS - 1);
        slot.values[bin] += 1.0;
    }

    if normalize {
        for slot in &mut series {
            let total: f64 = slot.values.iter().sum();
            if total > 0.0 {
                for value in &mut slot.values {
                    *value *= 100.0 / total;
                }
            }
        }
    }

    PriceHistogram { min, bin_width, series }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::manufacturer_pair_indices;
    use crate::data::model::{CellValue, Listing, ListingDataset, RawListing};
    use std::collections::BTreeMap;

    fn listing(model: &str, year: i32, vehicle_type: &str, condition: &str, price: f64) -> Listing {
        Listing::from_raw(RawListing {
            model_year: Some(year),
            fuel: Some("gas".into()),
            model: Some(CellValue::String(model.into())),
            vehicle_type: Some(vehicle_type.into()),
            condition: Some(condition.into()),
            price: Some(price),
            extra: BTreeMap::new(),
        })
        .unwrap()
    }

    fn sample_dataset() -> ListingDataset {
        ListingDataset::from_listings(
            vec![
                listing("bmw 320", 2012, "sedan", "good", 9000.0),
                listing("bmw x5", 2015, "suv", "good", 24000.0),
                listing("chevrolet malibu", 2016, "sedan", "excellent", 15000.0),
                listing("chevrolet tahoe", 2012, "suv", "fair", 18000.0),
                listing("ford focus", 2012, "sedan", "good", 7000.0),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn test_types_by_manufacturer_counts() {
        let dataset = sample_dataset();
        let all: Vec<usize> = (0..dataset.len()).collect();
        let stack = types_by_manufacturer(&dataset, &all);

        assert_eq!(stack.labels, vec!["bmw", "chevrolet", "ford"]);
        assert_eq!(stack.series.len(), 2); // sedan, suv

        let sedan = &stack.series[0];
        assert_eq!(sedan.label, "sedan");
        assert_eq!(sedan.counts, vec![1, 1, 1]);
        let suv = &stack.series[1];
        assert_eq!(suv.counts, vec![1, 1, 0]);
    }

    #[test]
    fn test_types_by_manufacturer_respects_selection() {
        let dataset = sample_dataset();
        let stack = types_by_manufacturer(&dataset, &[2, 3]);
        assert_eq!(stack.labels, vec!["chevrolet"]);
    }

    #[test]
    fn test_condition_by_year_sorted_and_complete() {
        let dataset = sample_dataset();
        let stack = condition_by_year(&dataset);

        assert_eq!(stack.labels, vec!["2012", "2015", "2016"]);
        let total: u64 = stack.series.iter().flat_map(|s| s.counts.iter()).sum();
        assert_eq!(total, dataset.len() as u64);

        let good = stack.series.iter().find(|s| s.label == "good").unwrap();
        assert_eq!(good.counts, vec![2, 1, 0]);
    }

    #[test]
    fn test_price_distribution_has_fixed_bin_count() {
        let dataset = sample_dataset();
        let indices = manufacturer_pair_indices(&dataset, "bmw", "chevrolet");
        let hist = price_distribution(&dataset, &indices, "bmw", "chevrolet", false);

        assert_eq!(hist.series.len(), 2);
        for series in &hist.series {
            assert_eq!(series.values.len(), PRICE_BINS);
        }
    }

    #[test]
    fn test_price_distribution_raw_counts() {
        let dataset = sample_dataset();
        let indices = manufacturer_pair_indices(&dataset, "bmw", "chevrolet");
        let hist = price_distribution(&dataset, &indices, "bmw", "chevrolet", false);

        let bmw: f64 = hist.series[0].values.iter().sum();
        let chevrolet: f64 = hist.series[1].values.iter().sum();
        assert_eq!(bmw, 2.0);
        assert_eq!(chevrolet, 2.0);
    }

    #[test]
    fn test_price_distribution_normalizes_each_series_to_100() {
        let dataset = sample_dataset();
        let indices = manufacturer_pair_indices(&dataset, "bmw", "chevrolet");
        let hist = price_distribution(&dataset, &indices, "bmw", "chevrolet", true);

        for series in &hist.series {
            let sum: f64 = series.values.iter().sum();
            assert!((sum - 100.0).abs() < 1e-9, "{} sums to {sum}", series.label);
        }
    }

    #[test]
    fn test_price_distribution_same_manufacturer_single_series() {
        let dataset = sample_dataset();
        let indices = manufacturer_pair_indices(&dataset, "bmw", "bmw");
        let hist = price_distribution(&dataset, &indices, "bmw", "bmw", false);

        assert_eq!(hist.series.len(), 1);
        let total: f64 = hist.series[0].values.iter().sum();
        assert_eq!(total, 2.0);
    }

    #[test]
    fn test_price_distribution_degenerate_range() {
        let dataset = ListingDataset::from_listings(
            vec![
                listing("bmw 320", 2012, "sedan", "good", 5000.0),
                listing("bmw x5", 2015, "suv", "good", 5000.0),
            ],
            Vec::new(),
        );
        let indices = manufacturer_pair_indices(&dataset, "bmw", "bmw");
        let hist = price_distribution(&dataset, &indices, "bmw", "bmw", false);

        assert_eq!(hist.series[0].values[0], 2.0);
        assert!(hist.bin_width > 0.0);
    }

    #[test]
    fn test_price_distribution_empty_selection() {
        let dataset = sample_dataset();
        let hist = price_distribution(&dataset, &[], "bmw", "chevrolet", true);
        assert!(hist.series.is_empty());
    }
}
