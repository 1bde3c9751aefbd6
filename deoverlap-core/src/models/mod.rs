pub mod format;
pub mod hit;

// re-export for cleaner imports
pub use self::format::{ColumnLayout, FormatVariant, RankKey};
pub use self::hit::{Hit, Strand};
