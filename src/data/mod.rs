/// Data layer: core types, loading, caching and word counting.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐      ┌───────┐
///   │  loader   │ ◄──  │ cache │  memoized by path + mtime + size
///   └──────────┘      └───────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ NewsDataset  │  Vec<NewsRecord>, load report
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌───────────┐
///   │  filter   │ ──►  │ frequency │  count_all / most_common per label
///   └──────────┘      └───────────┘
/// ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod frequency;
pub mod loader;
pub mod model;
