use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{DeoverlapError, Result};
use crate::models::{FormatVariant, RankKey};
use crate::normalize::NormalizeOptions;

pub const DEFAULT_MIN_OVERLAP: u64 = 1;
pub const DEFAULT_BATCH_GROUPS: usize = 1;

///
/// Every recognized run option. Can be read from a TOML file; any key may be omitted.
///
/// ```toml
/// format = "cm-scan"
/// rank = "score"
/// min_overlap = 10
/// max_keep = true
/// clan_file = "Rfam.clanin"
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DeoverlapConfig {
    pub format: FormatVariant,
    pub best_domain: bool,
    pub rank: RankKey,
    pub min_overlap: u64,
    pub max_keep: bool,
    pub assert_cmsearch: bool,
    pub clan_file: Option<PathBuf>,
    pub model_list: Option<PathBuf>,
    pub invert: bool,
    pub batch_groups: usize,
}

impl Default for DeoverlapConfig {
    fn default() -> Self {
        DeoverlapConfig {
            format: FormatVariant::default(),
            best_domain: false,
            rank: RankKey::default(),
            min_overlap: DEFAULT_MIN_OVERLAP,
            max_keep: false,
            assert_cmsearch: false,
            clan_file: None,
            model_list: None,
            invert: false,
            batch_groups: DEFAULT_BATCH_GROUPS,
        }
    }
}

impl DeoverlapConfig {
    ///
    /// Reject option combinations that cannot work together.
    ///
    pub fn validate(&self) -> Result<()> {
        self.normalize_options().validate()?;

        if self.min_overlap == 0 {
            return Err(DeoverlapError::Config(
                "min_overlap must be at least 1".to_string(),
            ));
        }
        if self.batch_groups == 0 {
            return Err(DeoverlapError::Config(
                "batch_groups must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            variant: self.format,
            best_domain: self.best_domain,
            assert_cmsearch: self.assert_cmsearch,
        }
    }
}

impl TryFrom<&Path> for DeoverlapConfig {
    type Error = DeoverlapError;

    fn try_from(path: &Path) -> std::result::Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}
