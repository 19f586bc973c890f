//! Window minimizers
//!
//! For every window of `w` consecutive k-mer positions the position with the
//! smallest hash is reported, once, at the first window where it becomes the
//! minimum. Output indices are strictly increasing.
//!
//! The window is a small value-sorted buffer (O(w) insert and remove) rather
//! than a monotonic deque; its tie-break (earliest position wins) is part of
//! the output contract.

use crate::nthash::NtHashes;
use crate::sequence::{circularize, validate_nucleotides};
use crate::types::SketchHit;

use super::window::SortedWindow;
use super::{check_sequence, check_window, Sketch, SketchResult};

/// Minimizer selection over any stream of per-position hash values.
///
/// The i-th value of `hashes` is taken to belong to the k-mer starting at
/// position i.
pub struct MinimizerSelector<I> {
    hashes: I,
    w: usize,
    window: SortedWindow,
    next_idx: usize,
    last_emitted: Option<usize>,
}

impl<I: Iterator<Item = u64>> MinimizerSelector<I> {
    /// `w` must be at least 1; callers validate it.
    pub fn new(hashes: I, w: usize) -> Self {
        debug_assert!(w >= 1);
        Self {
            hashes,
            w,
            window: if w > 1 {
                SortedWindow::with_width(w)
            } else {
                SortedWindow::default()
            },
            next_idx: 0,
            last_emitted: None,
        }
    }

    /// Position of the last emitted minimizer
    pub fn index(&self) -> usize {
        self.last_emitted.unwrap_or(0)
    }

    pub fn window_size(&self) -> usize {
        self.w
    }
}

impl<I: Iterator<Item = u64>> Iterator for MinimizerSelector<I> {
    type Item = SketchHit;

    fn next(&mut self) -> Option<SketchHit> {
        loop {
            let Some(value) = self.hashes.next() else {
                self.window.release();
                return None;
            };
            let idx = self.next_idx;
            self.next_idx += 1;
            let hit = SketchHit::new(idx, value);

            if self.w == 1 {
                self.last_emitted = Some(idx);
                return Some(hit);
            }

            if idx + 1 < self.w {
                self.window.push(hit);
                continue;
            }
            if idx + 1 == self.w {
                self.window.push(hit);
                self.window.sort();
            } else {
                self.window.slide(idx - self.w, hit);
            }

            let min = self.window.min()?;
            if self.last_emitted != Some(min.index) {
                self.last_emitted = Some(min.index);
                return Some(min);
            }
        }
    }
}

/// Minimizer sketch of a nucleotide sequence using canonical ntHash.
pub struct MinimizerSketch<'a> {
    inner: MinimizerSelector<NtHashes<'a>>,
}

impl<'a> MinimizerSketch<'a> {
    /// Requires `k >= 1`, `w >= 1` and at least `k + w - 1` bases (counted
    /// before circularization). Every byte must be encodable by the k-mer
    /// codec.
    pub fn new(seq: &'a [u8], k: usize, w: usize, circular: bool) -> SketchResult<Self> {
        check_window(w)?;
        check_sequence(seq, k, k.saturating_add(w - 1))?;
        validate_nucleotides(seq)?;

        let seq = if circular { circularize(seq, k) } else { seq.into() };
        log::debug!(
            "minimizer sketch: {} bases, k={}, w={}, circular={}",
            seq.len(),
            k,
            w,
            circular
        );
        let hashes = NtHashes::new(seq, k, true)?;
        Ok(Self {
            inner: MinimizerSelector::new(hashes, w),
        })
    }
}

impl Iterator for MinimizerSketch<'_> {
    type Item = SketchHit;

    fn next(&mut self) -> Option<SketchHit> {
        self.inner.next()
    }
}

impl Sketch for MinimizerSketch<'_> {
    fn index(&self) -> usize {
        self.inner.index()
    }

    fn name(&self) -> &'static str {
        "minimizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::SketchError;

    #[test]
    fn test_selector_on_plain_values() {
        let values = vec![5u64, 3, 8, 1, 9, 9, 2, 7];
        let hits: Vec<_> = MinimizerSelector::new(values.into_iter(), 3)
            .map(|h| (h.index, h.value))
            .collect();
        // windows: [5,3,8]->1 [3,8,1]->3 [8,1,9]->3 [1,9,9]->3 [9,9,2]->6 [9,2,7]->6
        assert_eq!(hits, vec![(1, 3), (3, 1), (6, 2)]);
    }

    #[test]
    fn test_selector_ties_favor_earliest() {
        let values = vec![4u64, 4, 4, 4, 4];
        let idx: Vec<_> = MinimizerSelector::new(values.into_iter(), 2)
            .map(|h| h.index)
            .collect();
        assert_eq!(idx, vec![0, 1, 2, 3]);

        let values = vec![9u64, 1, 5, 1, 5, 5];
        let idx: Vec<_> = MinimizerSelector::new(values.into_iter(), 3)
            .map(|h| h.index)
            .collect();
        // [9,1,5]->1 [1,5,1]->1 [5,1,5]->3 [1,5,5]->3
        assert_eq!(idx, vec![1, 3]);
    }

    #[test]
    fn test_selector_w1_passthrough() {
        let hits: Vec<_> = MinimizerSelector::new(vec![3u64, 3, 1].into_iter(), 1).collect();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[2], SketchHit::new(2, 1));
    }

    #[test]
    fn test_selector_huge_w_yields_nothing() {
        let mut selector = MinimizerSelector::new(vec![3u64, 1, 2].into_iter(), usize::MAX);
        assert_eq!(selector.window_size(), usize::MAX);
        assert_eq!(selector.next(), None);
        assert_eq!(MinimizerSelector::new(std::iter::empty::<u64>(), usize::MAX).next(), None);
    }

    #[test]
    fn test_index_tracks_last_hit() {
        let mut sketch = MinimizerSketch::new(b"GGCAAGTTCGTCA", 5, 3, false).unwrap();
        assert_eq!(sketch.name(), "minimizer");
        while let Some(hit) = sketch.next() {
            assert_eq!(sketch.index(), hit.index);
        }
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            MinimizerSketch::new(b"ACGT", 0, 1, false).err(),
            Some(SketchError::InvalidK(0))
        );
        assert_eq!(
            MinimizerSketch::new(b"ACGT", 2, 0, false).err(),
            Some(SketchError::InvalidW(0))
        );
        assert_eq!(
            MinimizerSketch::new(b"", 2, 1, false).err(),
            Some(SketchError::EmptySequence)
        );
        assert_eq!(
            MinimizerSketch::new(b"ACGTA", 3, 4, false).err(),
            Some(SketchError::ShortSequence { len: 5, min: 6 })
        );
    }
}
