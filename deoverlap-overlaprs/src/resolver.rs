//! Greedy, rank-ordered overlap removal within one target.
//!
//! Hits arrive best first. Each hit is compared against every earlier hit of the same
//! target, and the first earlier hit it overlaps by at least `min_overlap` positions
//! removes it. Verdicts are never revisited.
//!
//! Two variants exist:
//!
//! - default: any earlier hit can remove a later one, even if that earlier hit was itself
//!   removed. Removal cascades through chains of overlapping hits.
//! - max-keep: only earlier hits that are still kept can remove a later one. A removed
//!   hit no longer passes removal on to hits that only touch it.
//!
//! With the intervals `[410,1883]`, `[12,1182]`, `[10,1883]`, `[12,366]` in that rank
//! order, the default mode keeps only the first hit while max-keep also keeps the last
//! one, because it only overlaps the second and third hits, which were both removed.

use deoverlap_core::ModelList;
use deoverlap_core::config::DEFAULT_MIN_OVERLAP;
use deoverlap_core::models::Hit;

use crate::overlap::span_overlap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Minimum number of shared positions for two hits to count as overlapping.
    pub min_overlap: u64,
    /// Only still-kept hits can remove later hits.
    pub max_keep: bool,
    /// Only hits whose models share a clan are compared.
    pub clan_scoped: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            min_overlap: DEFAULT_MIN_OVERLAP,
            max_keep: false,
            clan_scoped: false,
        }
    }
}

///
/// Verdict for one hit of a group.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Kept; `overlaps` counts the later hits this one removed.
    Kept { overlaps: usize },
    /// Removed by the hit at index `blocker` of the same group.
    Removed { blocker: usize },
}

impl ResolutionOutcome {
    pub fn is_kept(&self) -> bool {
        matches!(self, ResolutionOutcome::Kept { .. })
    }

    /// Number of hits this one removed, `None` for removed hits.
    pub fn overlap_count(&self) -> Option<usize> {
        match self {
            ResolutionOutcome::Kept { overlaps } => Some(*overlaps),
            ResolutionOutcome::Removed { .. } => None,
        }
    }

    pub fn blocker(&self) -> Option<usize> {
        match self {
            ResolutionOutcome::Kept { .. } => None,
            ResolutionOutcome::Removed { blocker } => Some(*blocker),
        }
    }
}

///
/// Decide keep/remove for every hit of one target.
///
/// # Arguments
/// - hits: the hits of one target, best ranked first
/// - opts: overlap threshold and mode
///
/// # Returns
/// One outcome per hit, in input order.
///
pub fn resolve(hits: &[Hit], opts: &ResolveOptions) -> Vec<ResolutionOutcome> {
    resolve_scoped(hits, opts, None)
}

///
/// Same as [resolve], additionally restricting comparisons to pairs of listed models.
///
pub fn resolve_scoped(
    hits: &[Hit],
    opts: &ResolveOptions,
    models: Option<&ModelList>,
) -> Vec<ResolutionOutcome> {
    let spans: Vec<(u64, u64)> = hits.iter().map(Hit::span).collect();
    let mut outcomes: Vec<ResolutionOutcome> = Vec::with_capacity(hits.len());

    for (i, hit) in hits.iter().enumerate() {
        let blocker = (0..i).find(|&j| {
            let prior = &hits[j];

            if prior.strand != hit.strand {
                return false;
            }
            if opts.clan_scoped && !hit.shares_clan(prior) {
                return false;
            }
            if let Some(models) = models {
                if !models.allows_pair(&hit.model, &prior.model) {
                    return false;
                }
            }
            if opts.max_keep && !outcomes[j].is_kept() {
                return false;
            }

            span_overlap(spans[i], spans[j]) >= opts.min_overlap
        });

        match blocker {
            Some(j) => {
                if let ResolutionOutcome::Kept { overlaps } = &mut outcomes[j] {
                    *overlaps += 1;
                }
                log::trace!(
                    "{}: {} line {} removed by {} line {}",
                    hit.target,
                    hit.model,
                    hit.line,
                    hits[j].model,
                    hits[j].line
                );
                outcomes.push(ResolutionOutcome::Removed { blocker: j });
            }
            None => outcomes.push(ResolutionOutcome::Kept { overlaps: 0 }),
        }
    }

    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use deoverlap_core::models::Strand;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn hit(model: &str, start: u64, end: u64, strand: Strand, clan: Option<&str>) -> Hit {
        Hit {
            target: "chr1".to_string(),
            model: model.to_string(),
            model_accession: "-".to_string(),
            start,
            end,
            strand,
            score: 0.0,
            evalue: 0.0,
            clan: clan.map(str::to_string),
            raw: format!("chr1 {} {} {} {}", model, start, end, strand),
            line: 0,
        }
    }

    fn plus(start: u64, end: u64) -> Hit {
        hit("m", start, end, Strand::Plus, None)
    }

    fn kept_flags(outcomes: &[ResolutionOutcome]) -> Vec<bool> {
        outcomes.iter().map(ResolutionOutcome::is_kept).collect()
    }

    #[fixture]
    fn chained_group() -> Vec<Hit> {
        vec![plus(410, 1883), plus(12, 1182), plus(10, 1883), plus(12, 366)]
    }

    #[rstest]
    fn test_default_mode_cascades(chained_group: Vec<Hit>) {
        let outcomes = resolve(&chained_group, &ResolveOptions::default());
        assert_eq!(kept_flags(&outcomes), vec![true, false, false, false]);
        assert_eq!(outcomes[0], ResolutionOutcome::Kept { overlaps: 2 });
        assert_eq!(outcomes[1].blocker(), Some(0));
        assert_eq!(outcomes[2].blocker(), Some(0));
        // hit 4 misses hit 1 but the removed hit 2 still blocks it
        assert_eq!(outcomes[3].blocker(), Some(1));
    }

    #[rstest]
    fn test_max_keep_mode_stops_cascade(chained_group: Vec<Hit>) {
        let opts = ResolveOptions {
            max_keep: true,
            ..Default::default()
        };
        let outcomes = resolve(&chained_group, &opts);
        assert_eq!(kept_flags(&outcomes), vec![true, false, false, true]);
        assert_eq!(outcomes[0].overlap_count(), Some(2));
        assert_eq!(outcomes[3].overlap_count(), Some(0));
    }

    #[rstest]
    fn test_removed_hits_have_no_overlap_count(chained_group: Vec<Hit>) {
        let outcomes = resolve(&chained_group, &ResolveOptions::default());
        assert!(outcomes[1..].iter().all(|o| o.overlap_count().is_none()));
    }

    #[rstest]
    fn test_opposite_strands_never_block() {
        let hits = vec![
            hit("m", 100, 200, Strand::Plus, None),
            hit("m", 200, 100, Strand::Minus, None),
        ];
        let outcomes = resolve(&hits, &ResolveOptions::default());
        assert_eq!(kept_flags(&outcomes), vec![true, true]);
    }

    #[rstest]
    fn test_minus_strand_coordinates_are_swapped() {
        let hits = vec![
            hit("m", 300, 150, Strand::Minus, None),
            hit("m", 160, 100, Strand::Minus, None),
            hit("m", 99, 50, Strand::Minus, None),
        ];
        let outcomes = resolve(&hits, &ResolveOptions::default());
        assert_eq!(kept_flags(&outcomes), vec![true, false, true]);
    }

    #[rstest]
    #[case(1, vec![true, false])]
    #[case(11, vec![true, false])]
    #[case(12, vec![true, true])]
    fn test_min_overlap_threshold(#[case] min_overlap: u64, #[case] expected: Vec<bool>) {
        // 11 shared positions
        let hits = vec![plus(100, 200), plus(190, 300)];
        let opts = ResolveOptions {
            min_overlap,
            ..Default::default()
        };
        assert_eq!(kept_flags(&resolve(&hits, &opts)), expected);
    }

    #[rstest]
    fn test_first_blocker_wins() {
        let hits = vec![plus(1, 100), plus(50, 150), plus(90, 120)];
        let outcomes = resolve(&hits, &ResolveOptions::default());
        assert_eq!(outcomes[2].blocker(), Some(0));
        assert_eq!(outcomes[0].overlap_count(), Some(2));
    }

    #[rstest]
    fn test_identical_unit_intervals_collapse() {
        // formats without coordinates put every hit on 1..1
        let hits = vec![plus(1, 1), plus(1, 1), plus(1, 1)];
        let outcomes = resolve(&hits, &ResolveOptions::default());
        assert_eq!(kept_flags(&outcomes), vec![true, false, false]);
        assert_eq!(outcomes[0].overlap_count(), Some(2));
    }

    #[rstest]
    #[case(Some("CL1"), None)]
    #[case(None, Some("CL1"))]
    #[case(None, None)]
    #[case(Some("CL1"), Some("CL2"))]
    fn test_clan_scoping_requires_shared_clan(
        #[case] first: Option<&str>,
        #[case] second: Option<&str>,
    ) {
        let hits = vec![
            hit("a", 1, 100, Strand::Plus, first),
            hit("b", 50, 150, Strand::Plus, second),
        ];
        let opts = ResolveOptions {
            clan_scoped: true,
            ..Default::default()
        };
        assert_eq!(kept_flags(&resolve(&hits, &opts)), vec![true, true]);
    }

    #[rstest]
    fn test_clan_scoping_same_clan_blocks() {
        let hits = vec![
            hit("a", 1, 100, Strand::Plus, Some("CL1")),
            hit("b", 50, 150, Strand::Plus, Some("CL1")),
        ];
        let opts = ResolveOptions {
            clan_scoped: true,
            ..Default::default()
        };
        assert_eq!(kept_flags(&resolve(&hits, &opts)), vec![true, false]);
    }

    #[rstest]
    fn test_model_list_limits_comparisons() {
        let hits = vec![
            hit("tRNA", 1, 100, Strand::Plus, None),
            hit("U6", 50, 150, Strand::Plus, None),
            hit("5S_rRNA", 60, 160, Strand::Plus, None),
        ];
        let models: ModelList = ["tRNA", "5S_rRNA"].into_iter().collect();
        let outcomes = resolve_scoped(&hits, &ResolveOptions::default(), Some(&models));
        assert_eq!(kept_flags(&outcomes), vec![true, true, false]);
        assert_eq!(outcomes[2].blocker(), Some(0));
    }

    #[rstest]
    fn test_empty_group() {
        assert!(resolve(&[], &ResolveOptions::default()).is_empty());
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_kept_hits_never_overlap(#[case] max_keep: bool) {
        let hits = vec![
            plus(500, 900),
            plus(1, 120),
            plus(880, 1000),
            plus(100, 510),
            plus(121, 499),
            plus(901, 1200),
            plus(950, 2000),
            plus(1201, 1300),
        ];
        let opts = ResolveOptions {
            max_keep,
            ..Default::default()
        };
        let outcomes = resolve(&hits, &opts);

        let kept: Vec<&Hit> = hits
            .iter()
            .zip(&outcomes)
            .filter(|(_, o)| o.is_kept())
            .map(|(h, _)| h)
            .collect();
        for (i, a) in kept.iter().enumerate() {
            for b in &kept[i + 1..] {
                assert!(span_overlap(a.span(), b.span()) < opts.min_overlap);
            }
        }

        let removed = outcomes.iter().filter(|o| !o.is_kept()).count();
        assert_eq!(kept.len() + removed, hits.len());
    }

    #[rstest]
    fn test_resolving_kept_hits_again_changes_nothing(chained_group: Vec<Hit>) {
        let opts = ResolveOptions {
            max_keep: true,
            ..Default::default()
        };
        let outcomes = resolve(&chained_group, &opts);
        let survivors: Vec<Hit> = chained_group
            .into_iter()
            .zip(&outcomes)
            .filter(|(_, o)| o.is_kept())
            .map(|(h, _)| h)
            .collect();

        let again = resolve(&survivors, &opts);
        assert_eq!(again.len(), survivors.len());
        assert!(again.iter().all(|o| *o == ResolutionOutcome::Kept { overlaps: 0 }));
    }
}
