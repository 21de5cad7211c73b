/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///   wait_times.csv (URL or local file)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → WaitTimeTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ WaitTimeTable  │  Vec<AttractionRecord>, distinct parks/days
///   └───────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  pure (table, params) → counts / rankings / samples
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
