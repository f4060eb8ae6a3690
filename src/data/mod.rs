//! Data layer: record types, cleaning, loading, option lists, and filtering.
//!
//! Architecture:
//! ```text
//!   survey .csv
//!        │
//!        ▼
//!   ┌──────────┐   ┌───────────┐
//!   │  loader   │──▶│ normalize │  RawRow → RecordCandidate → CleanedRecord
//!   └──────────┘   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Dataset   │  Vec<CleanedRecord>, source order
//!   └──────────┘
//!        │
//!        ├──────────────▶ catalog   distinct sorted options per control
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  Selection → line view + bar view
//!   └──────────┘
//! ```

pub mod catalog;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
