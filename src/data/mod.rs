/// Data layer: core types, loading, filtering, and chart counts.
///
/// Architecture:
/// ```text
///  vehicles.csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → clean → derive manufacturer
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ ListingDataset │  Vec<Listing>, manufacturer index
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌───────────┐
///   │  filter   │ ──▶ │ histogram │  control values → indices → chart data
///   └──────────┘     └───────────┘
/// ```
pub mod filter;
pub mod histogram;
pub mod loader;
pub mod model;
