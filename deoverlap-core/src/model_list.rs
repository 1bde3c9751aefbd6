use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fxhash::FxHashSet;

use crate::errors::Result;

///
/// Set of model names whose hits take part in overlap removal.
///
/// When a list is in use, two hits are only compared if both models are listed. Hits to
/// other models are neither removed nor able to remove anything.
///
#[derive(Debug, Clone, Default)]
pub struct ModelList {
    models: FxHashSet<String>,
}

impl ModelList {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let list = ModelList::from_reader(BufReader::new(file))?;
        log::info!("Loaded {} models from {}", list.len(), path.display());
        Ok(list)
    }

    /// Whitespace separated names, any number per line; `#` lines are comments.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut models = FxHashSet::default();
        for line in reader.lines() {
            let line = line?;
            if line.starts_with('#') {
                continue;
            }
            models.extend(line.split_whitespace().map(str::to_string));
        }
        Ok(ModelList { models })
    }

    pub fn contains(&self, model: &str) -> bool {
        self.models.contains(model)
    }

    /// Both models listed.
    pub fn allows_pair(&self, a: &str, b: &str) -> bool {
        self.contains(a) && self.contains(b)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ModelList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        ModelList {
            models: iter.into_iter().map(Into::into).collect(),
        }
    }
}
