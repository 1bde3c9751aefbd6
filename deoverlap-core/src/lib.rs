//! Core models for removing redundant, overlapping homology hits.
//!
//! This crate holds the pieces every other deoverlap crate builds on:
//!
//! - [`Hit`](models::Hit): one normalized search hit, with the raw row kept verbatim
//! - [`normalize`](normalize::normalize): maps a cmsearch, cmscan, nhmmer or hmmsearch
//!   tabular row onto a `Hit`
//! - [`ClanMap`](clan::ClanMap) and [`ModelList`](model_list::ModelList): optional scoping
//!   of which hit pairs may remove each other
//! - [`DeoverlapConfig`](config::DeoverlapConfig): run options, loadable from TOML
//!
//! # Example
//!
//! ```
//! use deoverlap_core::models::Strand;
//! use deoverlap_core::normalize::{normalize, NormalizeOptions};
//!
//! let row = "chr1 - 5S_rRNA RF00001 cm 1 119 5118 5000 - no 1 0.52 0.0 60.1 3.4e-10 ! -";
//! let hit = normalize(row, 1, &NormalizeOptions::default()).unwrap();
//!
//! assert_eq!(hit.strand, Strand::Minus);
//! assert_eq!(hit.span(), (5000, 5118));
//! ```

pub mod clan;
pub mod config;
pub mod errors;
pub mod model_list;
pub mod models;
pub mod normalize;
pub mod utils;

// re-exports
pub use clan::{ClanLookup, ClanMap};
pub use config::DeoverlapConfig;
pub use errors::{DeoverlapError, Result};
pub use model_list::ModelList;
