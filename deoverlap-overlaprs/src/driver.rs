//! Streams normalized hits, cuts them into per-target groups and resolves each group.
//!
//! Only the open group (plus up to `batch_groups` finished groups waiting to be
//! resolved) is held in memory. Input must already be grouped by target and ranked best
//! to worst inside each group; both are checked as rows arrive.

use std::ops::AddAssign;

use fxhash::FxHashSet;
use rayon::prelude::*;

use deoverlap_core::config::DEFAULT_BATCH_GROUPS;
use deoverlap_core::models::{Hit, RankKey};
use deoverlap_core::{ClanLookup, ClanMap, DeoverlapConfig, DeoverlapError, ModelList, Result};

use crate::group::{ResolvedGroup, TargetGroup};
use crate::resolver::{ResolutionOutcome, ResolveOptions};

///
/// Receives the verdicts, group by group, in input order.
///
pub trait HitSink {
    fn kept(&mut self, hit: &Hit, overlaps: usize) -> Result<()>;

    fn removed(&mut self, hit: &Hit, blocker: &Hit) -> Result<()>;

    /// Called once after the last group.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Discards every verdict; used when only validation and counts are wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl HitSink for NullSink {
    fn kept(&mut self, _hit: &Hit, _overlaps: usize) -> Result<()> {
        Ok(())
    }

    fn removed(&mut self, _hit: &Hit, _blocker: &Hit) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub kept: usize,
    pub removed: usize,
    pub targets: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.kept + self.removed
    }
}

impl AddAssign for RunSummary {
    fn add_assign(&mut self, other: RunSummary) {
        self.kept += other.kept;
        self.removed += other.removed;
        self.targets += other.targets;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverOptions {
    pub rank: RankKey,
    pub resolve: ResolveOptions,
    /// Finished groups buffered before resolving them in parallel; 1 streams group by group.
    pub batch_groups: usize,
}

impl Default for DriverOptions {
    fn default() -> Self {
        DriverOptions {
            rank: RankKey::default(),
            resolve: ResolveOptions::default(),
            batch_groups: DEFAULT_BATCH_GROUPS,
        }
    }
}

impl From<&DeoverlapConfig> for DriverOptions {
    fn from(config: &DeoverlapConfig) -> Self {
        DriverOptions {
            rank: config.rank,
            resolve: ResolveOptions {
                min_overlap: config.min_overlap,
                max_keep: config.max_keep,
                ..Default::default()
            },
            batch_groups: config.batch_groups,
        }
    }
}

pub struct GroupDriver<'a, S: HitSink> {
    opts: DriverOptions,
    clans: Option<&'a ClanMap>,
    models: Option<&'a ModelList>,
    sink: S,
    current: Option<TargetGroup>,
    finalized: FxHashSet<String>,
    pending: Vec<TargetGroup>,
    summary: RunSummary,
}

impl<'a, S: HitSink> GroupDriver<'a, S> {
    ///
    /// Create a driver writing verdicts to `sink`.
    ///
    /// Clan scoping stays off until a map is attached with [GroupDriver::with_clans].
    ///
    pub fn new(opts: DriverOptions, sink: S) -> Self {
        let mut opts = opts;
        opts.resolve.clan_scoped = false;
        opts.batch_groups = opts.batch_groups.max(1);

        GroupDriver {
            opts,
            clans: None,
            models: None,
            sink,
            current: None,
            finalized: FxHashSet::default(),
            pending: Vec::new(),
            summary: RunSummary::default(),
        }
    }

    pub fn with_clans(mut self, clans: &'a ClanMap) -> Self {
        self.clans = Some(clans);
        self.opts.resolve.clan_scoped = true;
        self
    }

    pub fn with_models(mut self, models: &'a ModelList) -> Self {
        self.models = Some(models);
        self
    }

    ///
    /// Add the next hit of the stream.
    ///
    /// Fails when the target was already closed earlier in the stream, or when the hit
    /// ranks better than the hit before it in the same group.
    ///
    pub fn push(&mut self, mut hit: Hit) -> Result<()> {
        if let Some(clans) = self.clans {
            hit.clan = clans.clan_of(&hit.model).map(str::to_string);
        }

        if let Some(group) = self.current.as_mut().filter(|g| g.target() == hit.target) {
            if let Some(prev) = group.last() {
                if self.opts.rank.regresses(prev, &hit) {
                    let rank = self.opts.rank;
                    return Err(DeoverlapError::Ordering {
                        line: hit.line,
                        target: hit.target.clone(),
                        reason: format!(
                            "{} {} ranks better than {} {} on line {}; rows must be sorted best to worst within a target",
                            rank,
                            rank.value(&hit),
                            rank,
                            rank.value(prev),
                            prev.line
                        ),
                    });
                }
            }
            group.push(hit);
            return Ok(());
        }

        if self.finalized.contains(hit.target.as_str()) {
            return Err(DeoverlapError::Ordering {
                line: hit.line,
                target: hit.target.clone(),
                reason: "target appears again after other targets; rows must be grouped by target"
                    .to_string(),
            });
        }

        self.finalize_current()?;
        self.current = Some(TargetGroup::new(hit));
        Ok(())
    }

    /// Push every hit of `hits`, then [finish](GroupDriver::finish).
    pub fn run<I>(mut self, hits: I) -> Result<(RunSummary, S)>
    where
        I: IntoIterator<Item = Result<Hit>>,
    {
        for hit in hits {
            self.push(hit?)?;
        }
        self.finish()
    }

    ///
    /// Close the last group, flush everything to the sink and hand the sink back.
    ///
    pub fn finish(mut self) -> Result<(RunSummary, S)> {
        self.finalize_current()?;
        self.flush_pending()?;
        self.sink.finish()?;
        Ok((self.summary, self.sink))
    }

    fn finalize_current(&mut self) -> Result<()> {
        if let Some(group) = self.current.take() {
            self.finalized.insert(group.target().to_string());
            self.pending.push(group);
            if self.pending.len() >= self.opts.batch_groups {
                self.flush_pending()?;
            }
        }
        Ok(())
    }

    fn flush_pending(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let groups = std::mem::take(&mut self.pending);
        let opts = self.opts.resolve;
        let models = self.models;

        // collect keeps input order
        let resolved: Vec<ResolvedGroup> = if groups.len() > 1 {
            groups
                .into_par_iter()
                .map(|g| g.resolve(&opts, models))
                .collect()
        } else {
            groups
                .into_iter()
                .map(|g| g.resolve(&opts, models))
                .collect()
        };

        for group in &resolved {
            self.emit(group)?;
        }
        Ok(())
    }

    fn emit(&mut self, group: &ResolvedGroup) -> Result<()> {
        for (hit, outcome) in group.iter() {
            match *outcome {
                ResolutionOutcome::Kept { overlaps } => {
                    self.sink.kept(hit, overlaps)?;
                    self.summary.kept += 1;
                }
                ResolutionOutcome::Removed { blocker } => {
                    self.sink.removed(hit, &group.hits[blocker])?;
                    self.summary.removed += 1;
                }
            }
        }
        self.summary.targets += 1;

        log::debug!(
            "{}: kept {} of {} hits",
            group.target,
            group.n_kept(),
            group.hits.len()
        );
        Ok(())
    }
}
