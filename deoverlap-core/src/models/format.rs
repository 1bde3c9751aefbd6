use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Hit;

///
/// Which search tool produced the tabular rows.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FormatVariant {
    #[default]
    CmSearch,
    CmScan,
    Nhmmer,
    Hmmsearch,
}

///
/// 1-based column positions of the fields a [Hit] is built from.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub target: usize,
    pub model: usize,
    pub model_accession: usize,
    /// (start, end, strand); `None` for formats without positional information.
    pub coords: Option<(usize, usize, usize)>,
    pub score: usize,
    pub evalue: usize,
    pub min_columns: usize,
}

const CMSEARCH_LAYOUT: ColumnLayout = ColumnLayout {
    target: 1,
    model: 3,
    model_accession: 4,
    coords: Some((8, 9, 10)),
    score: 15,
    evalue: 16,
    min_columns: 18,
};

const CMSCAN_LAYOUT: ColumnLayout = ColumnLayout {
    target: 3,
    model: 1,
    model_accession: 2,
    coords: Some((8, 9, 10)),
    score: 15,
    evalue: 16,
    min_columns: 18,
};

const NHMMER_LAYOUT: ColumnLayout = ColumnLayout {
    target: 1,
    model: 3,
    model_accession: 4,
    coords: Some((7, 8, 12)),
    score: 14,
    evalue: 13,
    min_columns: 16,
};

const HMMSEARCH_LAYOUT: ColumnLayout = ColumnLayout {
    target: 1,
    model: 3,
    model_accession: 4,
    coords: None,
    score: 6,
    evalue: 5,
    min_columns: 19,
};

const HMMSEARCH_BEST_DOMAIN_LAYOUT: ColumnLayout = ColumnLayout {
    score: 9,
    evalue: 8,
    ..HMMSEARCH_LAYOUT
};

impl FormatVariant {
    ///
    /// Column layout of this format.
    ///
    /// `best_domain` only changes the hmmsearch layout; the config layer rejects it for
    /// every other variant before rows are read.
    ///
    pub fn layout(&self, best_domain: bool) -> ColumnLayout {
        match (self, best_domain) {
            (FormatVariant::CmSearch, _) => CMSEARCH_LAYOUT,
            (FormatVariant::CmScan, _) => CMSCAN_LAYOUT,
            (FormatVariant::Nhmmer, _) => NHMMER_LAYOUT,
            (FormatVariant::Hmmsearch, false) => HMMSEARCH_LAYOUT,
            (FormatVariant::Hmmsearch, true) => HMMSEARCH_BEST_DOMAIN_LAYOUT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FormatVariant::CmSearch => "cm-search",
            FormatVariant::CmScan => "cm-scan",
            FormatVariant::Nhmmer => "nhmmer",
            FormatVariant::Hmmsearch => "hmmsearch",
        }
    }
}

impl FromStr for FormatVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm-search" | "cmsearch" => Ok(FormatVariant::CmSearch),
            "cm-scan" | "cmscan" => Ok(FormatVariant::CmScan),
            "nhmmer" => Ok(FormatVariant::Nhmmer),
            "hmmsearch" => Ok(FormatVariant::Hmmsearch),
            _ => Err(format!(
                "Invalid format: {}. Valid options are 'cm-search', 'cm-scan', 'nhmmer' or 'hmmsearch'",
                s
            )),
        }
    }
}

impl Display for FormatVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

///
/// Which value orders hits from best to worst within a target.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RankKey {
    #[default]
    Evalue,
    Score,
}

impl RankKey {
    ///
    /// True when `next` ranks strictly better than `prev`, i.e. the rows are not in
    /// best-to-worst order. Ties are allowed.
    ///
    pub fn regresses(&self, prev: &Hit, next: &Hit) -> bool {
        match self {
            RankKey::Evalue => next.evalue < prev.evalue,
            RankKey::Score => next.score > prev.score,
        }
    }

    pub fn value(&self, hit: &Hit) -> f64 {
        match self {
            RankKey::Evalue => hit.evalue,
            RankKey::Score => hit.score,
        }
    }
}

impl FromStr for RankKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "evalue" | "e-value" => Ok(RankKey::Evalue),
            "score" | "bitscore" => Ok(RankKey::Score),
            _ => Err(format!(
                "Invalid rank key: {}. Valid options are 'evalue' or 'score'",
                s
            )),
        }
    }
}

impl Display for RankKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankKey::Evalue => write!(f, "evalue"),
            RankKey::Score => write!(f, "score"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strand;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn ranked(score: f64, evalue: f64) -> Hit {
        Hit {
            target: "seq1".to_string(),
            model: "tRNA".to_string(),
            model_accession: "RF00005".to_string(),
            start: 1,
            end: 70,
            strand: Strand::Plus,
            score,
            evalue,
            clan: None,
            raw: String::new(),
            line: 0,
        }
    }

    #[rstest]
    #[case("cm-search", FormatVariant::CmSearch)]
    #[case("cmscan", FormatVariant::CmScan)]
    #[case("NHMMER", FormatVariant::Nhmmer)]
    #[case("hmmsearch", FormatVariant::Hmmsearch)]
    fn test_parse_format_variant(#[case] s: &str, #[case] expected: FormatVariant) {
        assert_eq!(s.parse::<FormatVariant>().unwrap(), expected);
    }

    #[rstest]
    fn test_parse_unknown_format_variant() {
        assert!("blastn".parse::<FormatVariant>().is_err());
    }

    #[rstest]
    fn test_best_domain_swaps_score_columns() {
        let full = FormatVariant::Hmmsearch.layout(false);
        let best = FormatVariant::Hmmsearch.layout(true);
        assert_eq!((full.score, full.evalue), (6, 5));
        assert_eq!((best.score, best.evalue), (9, 8));
        assert_eq!(best.coords, None);
    }

    #[rstest]
    fn test_cmscan_swaps_model_and_target() {
        let search = FormatVariant::CmSearch.layout(false);
        let scan = FormatVariant::CmScan.layout(false);
        assert_eq!((search.target, search.model), (1, 3));
        assert_eq!((scan.target, scan.model), (3, 1));
    }

    #[rstest]
    #[case(RankKey::Evalue, ranked(10.0, 1e-5), ranked(20.0, 1e-3), false)]
    #[case(RankKey::Evalue, ranked(10.0, 1e-3), ranked(5.0, 1e-5), true)]
    #[case(RankKey::Evalue, ranked(10.0, 1e-3), ranked(5.0, 1e-3), false)]
    #[case(RankKey::Score, ranked(30.0, 1e-3), ranked(20.0, 1e-9), false)]
    #[case(RankKey::Score, ranked(20.0, 1e-3), ranked(30.0, 1e-3), true)]
    #[case(RankKey::Score, ranked(20.0, 1e-3), ranked(20.0, 1e-1), false)]
    fn test_rank_regression(
        #[case] key: RankKey,
        #[case] prev: Hit,
        #[case] next: Hit,
        #[case] expected: bool,
    ) {
        assert_eq!(key.regresses(&prev, &next), expected);
    }
}
