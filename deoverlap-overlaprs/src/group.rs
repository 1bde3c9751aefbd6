use deoverlap_core::ModelList;
use deoverlap_core::models::Hit;

use crate::resolver::{ResolutionOutcome, ResolveOptions, resolve_scoped};

///
/// The contiguous run of hits to one target, best ranked first.
///
/// A group lives from the first row of its target until the driver sees another target
/// (or the input ends); it is then resolved, emitted and dropped.
///
#[derive(Debug, Clone)]
pub struct TargetGroup {
    target: String,
    hits: Vec<Hit>,
}

impl TargetGroup {
    pub fn new(first: Hit) -> Self {
        TargetGroup {
            target: first.target.clone(),
            hits: vec![first],
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    pub fn last(&self) -> Option<&Hit> {
        self.hits.last()
    }

    pub fn push(&mut self, hit: Hit) {
        debug_assert_eq!(hit.target, self.target);
        self.hits.push(hit);
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn resolve(self, opts: &ResolveOptions, models: Option<&ModelList>) -> ResolvedGroup {
        let outcomes = resolve_scoped(&self.hits, opts, models);
        ResolvedGroup {
            target: self.target,
            hits: self.hits,
            outcomes,
        }
    }
}

///
/// A target group together with one verdict per hit.
///
#[derive(Debug, Clone)]
pub struct ResolvedGroup {
    pub target: String,
    pub hits: Vec<Hit>,
    pub outcomes: Vec<ResolutionOutcome>,
}

impl ResolvedGroup {
    pub fn iter(&self) -> impl Iterator<Item = (&Hit, &ResolutionOutcome)> {
        self.hits.iter().zip(self.outcomes.iter())
    }

    /// The hit that removed hit `index`, if it was removed.
    pub fn blocker_of(&self, index: usize) -> Option<&Hit> {
        self.outcomes
            .get(index)
            .and_then(ResolutionOutcome::blocker)
            .map(|j| &self.hits[j])
    }

    pub fn n_kept(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_kept()).count()
    }

    pub fn n_removed(&self) -> usize {
        self.outcomes.len() - self.n_kept()
    }
}
