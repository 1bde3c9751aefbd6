use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fxhash::{FxHashMap, FxHashSet};

use crate::errors::{DeoverlapError, Result};

///
/// Model name to clan label mapping, loaded once and read-only afterwards.
///
/// The file format is one clan per line:
///
/// | CL00001 | tRNA | tRNA-Sec | mascRNA-menRNA |
/// |---------|------|----------|----------------|
/// | CL00002 | RNaseP_nuc | RNaseP_arch |     |
///
/// `#` lines and blank lines are skipped. A model may only belong to one line.
///
#[derive(Debug, Clone, Default)]
pub struct ClanMap {
    map: FxHashMap<String, String>,
    clan_labels: FxHashSet<String>,
}

pub trait ClanLookup {
    fn clan_of(&self, model: &str) -> Option<&str>;
}

impl ClanLookup for ClanMap {
    fn clan_of(&self, model: &str) -> Option<&str> {
        self.map.get(model).map(String::as_str)
    }
}

impl ClanMap {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let map = ClanMap::from_reader(BufReader::new(file))?;
        log::info!(
            "Loaded {} models in {} clans from {}",
            map.len(),
            map.n_clans(),
            path.display()
        );
        Ok(map)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut map: FxHashMap<String, String> = FxHashMap::default();
        let mut first_seen: FxHashMap<String, usize> = FxHashMap::default();
        let mut clan_labels: FxHashSet<String> = FxHashSet::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;

            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }

            let mut parts = line.split_whitespace();
            let Some(clan) = parts.next() else {
                continue;
            };

            let mut n_models = 0;
            for model in parts {
                match first_seen.get(model) {
                    Some(&seen) if seen != line_no => {
                        return Err(DeoverlapError::ClanFile {
                            line: line_no,
                            reason: format!(
                                "model {} is already assigned to clan {} on line {}",
                                model, map[model], seen
                            ),
                        });
                    }
                    Some(_) => continue,
                    None => {
                        first_seen.insert(model.to_string(), line_no);
                        map.insert(model.to_string(), clan.to_string());
                        n_models += 1;
                    }
                }
            }

            if n_models == 0 {
                log::debug!("Clan {} on line {} lists no models", clan, line_no);
            }
            clan_labels.insert(clan.to_string());
        }

        Ok(ClanMap { map, clan_labels })
    }

    pub fn n_clans(&self) -> usize {
        self.clan_labels.len()
    }

    /// Number of models with a clan.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::{Cursor, Write};
    use std::path::PathBuf;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/clans")
            .join(file_name)
    }

    #[rstest]
    fn test_load_clan_map_from_reader() {
        let text = "# clan file\nCL00001 tRNA tRNA-Sec\n\nCL00002 RNaseP_nuc RNaseP_arch RNaseP_bact_a\n";
        let map = ClanMap::from_reader(Cursor::new(text)).unwrap();

        assert_eq!(map.len(), 5);
        assert_eq!(map.n_clans(), 2);
        assert_eq!(map.clan_of("tRNA-Sec"), Some("CL00001"));
        assert_eq!(map.clan_of("RNaseP_arch"), Some("CL00002"));
        assert_eq!(map.clan_of("5S_rRNA"), None);
    }

    #[rstest]
    fn test_model_in_two_clans_fails() {
        let text = "CL00001 tRNA tRNA-Sec\nCL00002 tRNA RNaseP_nuc\n";
        let result = ClanMap::from_reader(Cursor::new(text));
        assert!(matches!(result, Err(DeoverlapError::ClanFile { line: 2, .. })));
    }

    #[rstest]
    fn test_model_on_two_lines_of_same_clan_fails() {
        let text = "CL00001 tRNA\nCL00001 tRNA\n";
        let result = ClanMap::from_reader(Cursor::new(text));
        assert!(matches!(result, Err(DeoverlapError::ClanFile { line: 2, .. })));
    }

    #[rstest]
    fn test_repeat_within_one_line_is_tolerated() {
        let text = "CL00001 tRNA tRNA\n";
        let map = ClanMap::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[rstest]
    fn test_load_clan_map_from_file() {
        let map = ClanMap::from_file(&get_test_path("test.clanin")).unwrap();
        assert_eq!(map.n_clans(), 2);
        assert_eq!(map.clan_of("SSU_rRNA_bacteria"), Some("CL00111"));
        assert_eq!(map.clan_of("5S_rRNA"), Some("CL00113"));
    }

    #[rstest]
    fn test_load_clan_map_from_tempfile() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "CL9 a b c").unwrap();
        let map = ClanMap::from_file(file.path()).unwrap();
        assert_eq!(map.clan_of("c"), Some("CL9"));
    }

    #[rstest]
    fn test_missing_clan_file() {
        let result = ClanMap::from_file(Path::new("does/not/exist.clanin"));
        assert!(matches!(result, Err(DeoverlapError::Io(_))));
    }
}
