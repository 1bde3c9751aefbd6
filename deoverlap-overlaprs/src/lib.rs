//! Rank-ordered removal of overlapping homology hits.
//!
//! All overlap logic lives here: the closed-interval [`overlap`] length, the per-target
//! [`resolve`] step, and the [`GroupDriver`] that streams hits, cuts them into per-target
//! groups and hands the verdicts to a [`HitSink`].
//!
//! ## Quick Start
//!
//! ```rust
//! use deoverlap_core::models::{Hit, Strand};
//! use deoverlap_overlaprs::{ResolveOptions, resolve};
//!
//! let hit = |start, end| Hit {
//!     target: "chr1".to_string(),
//!     model: "tRNA".to_string(),
//!     model_accession: "RF00005".to_string(),
//!     start,
//!     end,
//!     strand: Strand::Plus,
//!     score: 0.0,
//!     evalue: 0.0,
//!     clan: None,
//!     raw: String::new(),
//!     line: 0,
//! };
//!
//! // best ranked first
//! let hits = vec![hit(410, 1883), hit(12, 1182), hit(10, 1883), hit(12, 366)];
//!
//! let outcomes = resolve(&hits, &ResolveOptions::default());
//! assert_eq!(outcomes.iter().filter(|o| o.is_kept()).count(), 1);
//!
//! let max_keep = ResolveOptions { max_keep: true, ..Default::default() };
//! let outcomes = resolve(&hits, &max_keep);
//! assert_eq!(outcomes.iter().filter(|o| o.is_kept()).count(), 2);
//! ```

/// Streaming group segmentation.
///
/// See [`GroupDriver`] for details.
pub mod driver;

/// Per-target hit groups.
pub mod group;

/// Closed-interval overlap arithmetic.
pub mod overlap;

/// Keep/remove decisions within one target.
///
/// See [`resolve`] for details.
pub mod resolver;

// re-exports
pub use self::driver::{DriverOptions, GroupDriver, HitSink, NullSink, RunSummary};
pub use self::group::{ResolvedGroup, TargetGroup};
pub use self::overlap::{overlap, span_overlap};
pub use self::resolver::{ResolutionOutcome, ResolveOptions, resolve, resolve_scoped};
