use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

///
/// Strand of a hit on its target sequence.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Plus),
            "-" => Ok(Strand::Minus),
            _ => Err(format!("Invalid strand '{}', expected '+' or '-'", s)),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Plus => write!(f, "+"),
            Strand::Minus => write!(f, "-"),
        }
    }
}

///
/// Hit struct, one reported match of a model against a target sequence.
///
/// `start`/`end` are the 1-based coordinates as written in the row; on the minus
/// strand they run high-to-low. Use [Hit::span] for an ascending interval.
///
#[derive(PartialEq, Debug, Clone)]
pub struct Hit {
    pub target: String,
    pub model: String,
    pub model_accession: String,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
    pub score: f64,
    pub evalue: f64,

    /// Clan of `model`, filled in only when clan scoping is active.
    pub clan: Option<String>,

    /// The row exactly as it was read, without the line terminator.
    pub raw: String,

    /// 1-based line number in the input, 0 when unknown.
    pub line: usize,
}

impl Hit {
    ///
    /// Closed, ascending interval covered by the hit.
    ///
    /// Minus-strand rows list coordinates high-to-low, so the pair is swapped there.
    /// A row whose orientation disagrees with its strand is still returned ascending.
    ///
    pub fn span(&self) -> (u64, u64) {
        let (lo, hi) = match self.strand {
            Strand::Plus => (self.start, self.end),
            Strand::Minus => (self.end, self.start),
        };
        if lo <= hi { (lo, hi) } else { (hi, lo) }
    }

    /// True when both hits carry the same, non-empty clan label.
    pub fn shares_clan(&self, other: &Hit) -> bool {
        matches!((&self.clan, &other.clan), (Some(a), Some(b)) if a == b)
    }
}

impl Display for Hit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
