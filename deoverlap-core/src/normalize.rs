//! Maps one tabular search-result row onto a [Hit].
//!
//! Rows are split on runs of whitespace and fields are picked by the 1-based positions of
//! the active [ColumnLayout]. Formats without coordinates (hmmsearch) get a synthetic
//! `1..1` interval on the plus strand, so any two hits to one target always overlap and
//! at most one survives.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{DeoverlapError, Result};
use crate::models::{ColumnLayout, FormatVariant, Hit, Strand};

/// Model-catalog accessions (RF00001, ...) only show up in column 2 of cmscan output.
static MODEL_ACCESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^RF\d+$").expect("model accession pattern is valid"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub variant: FormatVariant,
    /// hmmsearch only: rank by the best single domain instead of the full sequence.
    pub best_domain: bool,
    /// Accept cm-search rows even when column 2 looks like a model accession.
    pub assert_cmsearch: bool,
}

impl NormalizeOptions {
    pub fn new(variant: FormatVariant) -> Self {
        NormalizeOptions {
            variant,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.best_domain && self.variant != FormatVariant::Hmmsearch {
            return Err(DeoverlapError::Config(format!(
                "best-domain scores require the hmmsearch format, not {}",
                self.variant
            )));
        }
        if self.assert_cmsearch && self.variant != FormatVariant::CmSearch {
            return Err(DeoverlapError::Config(format!(
                "the cmsearch assertion cannot be combined with the {} format",
                self.variant
            )));
        }
        Ok(())
    }

    pub fn layout(&self) -> ColumnLayout {
        self.variant.layout(self.best_domain)
    }
}

///
/// Normalize a single row into a [Hit].
///
/// # Arguments
/// - row: the raw row, kept verbatim in [Hit::raw]
/// - line: 1-based line number used in error messages
/// - opts: format selection, already checked with [NormalizeOptions::validate]
///
pub fn normalize(row: &str, line: usize, opts: &NormalizeOptions) -> Result<Hit> {
    let layout = opts.layout();
    let fields: Vec<&str> = row.split_whitespace().collect();

    if fields.len() < layout.min_columns {
        return Err(DeoverlapError::format(
            line,
            row,
            format!(
                "expected at least {} columns for {} format, found {}",
                layout.min_columns,
                opts.variant,
                fields.len()
            ),
        ));
    }

    if opts.variant == FormatVariant::CmSearch
        && !opts.assert_cmsearch
        && MODEL_ACCESSION.is_match(fields[1])
    {
        return Err(DeoverlapError::format(
            line,
            row,
            format!(
                "column 2 holds a model accession ({}), this looks like cmscan output; \
                 use the cm-scan format or assert cmsearch format",
                fields[1]
            ),
        ));
    }

    let field = |col: usize| fields[col - 1];

    let (start, end, strand) = match layout.coords {
        Some((start_col, end_col, strand_col)) => (
            parse_field::<u64>(field(start_col), "start", line, row)?,
            parse_field::<u64>(field(end_col), "end", line, row)?,
            field(strand_col)
                .parse::<Strand>()
                .map_err(|e| DeoverlapError::format(line, row, e))?,
        ),
        None => (1, 1, Strand::Plus),
    };

    let score = parse_field::<f64>(field(layout.score), "score", line, row)?;
    let evalue = parse_field::<f64>(field(layout.evalue), "E-value", line, row)?;
    if score.is_nan() || evalue.is_nan() {
        return Err(DeoverlapError::format(line, row, "score and E-value must be numbers"));
    }

    Ok(Hit {
        target: field(layout.target).to_string(),
        model: field(layout.model).to_string(),
        model_accession: field(layout.model_accession).to_string(),
        start,
        end,
        strand,
        score,
        evalue,
        clan: None,
        raw: row.to_string(),
        line,
    })
}

fn parse_field<T: FromStr>(value: &str, name: &str, line: usize, row: &str) -> Result<T> {
    value.parse::<T>().map_err(|_| {
        DeoverlapError::format(line, row, format!("could not parse {} from '{}'", name, value))
    })
}
