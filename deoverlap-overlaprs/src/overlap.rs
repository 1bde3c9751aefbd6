use num_traits::{PrimInt, Unsigned};

///
/// Number of positions shared by the closed intervals `[a1, b1]` and `[a2, b2]`.
///
/// Callers normalize both intervals so that `a1 <= b1` and `a2 <= b2`. The result is
/// symmetric in the two intervals and `0` when they are disjoint.
///
/// ```
/// use deoverlap_overlaprs::overlap;
///
/// assert_eq!(overlap(10u64, 20, 15, 30), 6);
/// assert_eq!(overlap(15u64, 30, 10, 20), 6);
/// assert_eq!(overlap(1u64, 5, 6, 9), 0);
/// ```
///
#[inline]
pub fn overlap<I>(a1: I, b1: I, a2: I, b2: I) -> I
where
    I: PrimInt + Unsigned,
{
    // put the interval with the smaller start first
    let ((_, end1), (start2, end2)) = if a1 <= a2 {
        ((a1, b1), (a2, b2))
    } else {
        ((a2, b2), (a1, b1))
    };

    if end1 < start2 {
        return I::zero();
    }

    std::cmp::min(end1, end2) - start2 + I::one()
}

///
/// Overlap of two `(start, end)` spans as returned by [Hit::span](deoverlap_core::models::Hit::span).
///
#[inline]
pub fn span_overlap<I>(a: (I, I), b: (I, I)) -> I
where
    I: PrimInt + Unsigned,
{
    overlap(a.0, a.1, b.0, b.1)
}
