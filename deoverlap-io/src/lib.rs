//! # Input/Output utilities for deoverlap.
//!
//! Reads tabular search output row by row into normalized hits, and writes the verdicts
//! of the overlap driver back out: kept rows verbatim, removed rows when inverted, and
//! an optional per-hit diagnostics stream.
//!
pub mod consts;
pub mod paths;
pub mod reader;
pub mod sink;

// re-expose core functions
pub use consts::*;
pub use paths::*;
pub use reader::*;
pub use sink::*;
