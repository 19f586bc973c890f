//! Closed syncmer selection
//!
//! The k-mer starting at `p` is a closed syncmer when the smallest of its
//! `k-s+1` s-mer hashes sits at offset 0 or at offset `k-s`. If the minimum
//! value occurs more than once, the lowest offset counts, so a tie between
//! the two boundaries goes to offset 0.
//!
//! Deciding position `p` needs s-mers up to `p + k - s`, so the s-mer scan
//! runs ahead of the reported k-mer. Qualified positions wait in a short
//! FIFO until the k-mer hasher catches up with them. The reported value is
//! the canonical ntHash of the selected k-mer.

use std::borrow::Cow;
use std::collections::VecDeque;

use crate::nthash::NtHasher;
use crate::sequence::{circularize, validate_nucleotides};
use crate::types::SketchHit;

use super::window::SortedWindow;
use super::{check_sequence, Sketch, SketchError, SketchResult};

/// Streaming closed-syncmer sketch of a nucleotide sequence
pub struct SyncmerSketch<'a> {
    seq: Cow<'a, [u8]>,
    k: usize,
    s: usize,
    smer_hasher: NtHasher,
    kmer_hasher: NtHasher,
    /// Next s-mer start to hash
    next_smer: usize,
    /// Next k-mer start the k-mer hasher will reach
    next_kmer: usize,
    /// s-mer hashes covering the current k-mer
    window: SortedWindow,
    pending: VecDeque<usize>,
    last_emitted: Option<usize>,
}

impl<'a> SyncmerSketch<'a> {
    /// Requires `k >= 1`, `1 <= s <= k`, at least `k` bases (counted before
    /// circularization) and only bytes the k-mer codec can encode.
    pub fn new(seq: &'a [u8], k: usize, s: usize, circular: bool) -> SketchResult<Self> {
        check_sequence(seq, k, k)?;
        if s == 0 || s > k {
            return Err(SketchError::InvalidS { s, k });
        }
        validate_nucleotides(seq)?;

        let seq = if circular { circularize(seq, k) } else { seq.into() };
        log::debug!(
            "syncmer sketch: {} bases, k={}, s={}, circular={}",
            seq.len(),
            k,
            s,
            circular
        );

        let span = k - s + 1;
        Ok(Self {
            seq,
            k,
            s,
            smer_hasher: NtHasher::new(s)?,
            kmer_hasher: NtHasher::new(k)?,
            next_smer: 0,
            next_kmer: 0,
            window: SortedWindow::with_width(span),
            pending: VecDeque::with_capacity(span),
            last_emitted: None,
        })
    }

    fn next_smer_hash(&mut self) -> Option<SketchHit> {
        let (i, s) = (self.next_smer, self.s);
        if i + s > self.seq.len() {
            return None;
        }
        if i == 0 {
            self.smer_hasher.init(&self.seq[..s]);
        } else {
            self.smer_hasher.roll(self.seq[i - 1], self.seq[i + s - 1]);
        }
        self.next_smer += 1;
        Some(SketchHit::new(i, self.smer_hasher.hash(true)))
    }

    /// Canonical hash of the k-mer at `p`; `p` never moves backwards.
    fn kmer_hash_at(&mut self, p: usize) -> u64 {
        debug_assert!(p + 1 >= self.next_kmer);
        let k = self.k;
        while self.next_kmer <= p {
            let i = self.next_kmer;
            if i == 0 {
                self.kmer_hasher.init(&self.seq[..k]);
            } else {
                self.kmer_hasher.roll(self.seq[i - 1], self.seq[i + k - 1]);
            }
            self.next_kmer += 1;
        }
        self.kmer_hasher.hash(true)
    }

    fn finish(&mut self) -> Option<SketchHit> {
        self.window.release();
        self.pending = VecDeque::new();
        None
    }
}

impl Iterator for SyncmerSketch<'_> {
    type Item = SketchHit;

    fn next(&mut self) -> Option<SketchHit> {
        let span = self.k - self.s + 1;
        loop {
            if let Some(p) = self.pending.pop_front() {
                if self.last_emitted.map_or(false, |last| p <= last) {
                    continue;
                }
                let value = self.kmer_hash_at(p);
                self.last_emitted = Some(p);
                return Some(SketchHit::new(p, value));
            }

            let Some(smer) = self.next_smer_hash() else {
                return self.finish();
            };

            // s == k: every k-mer is a syncmer and the s-mer hash is the k-mer hash
            if span == 1 {
                self.last_emitted = Some(smer.index);
                return Some(smer);
            }

            let j = smer.index;
            if j + 1 < span {
                self.window.push(smer);
                continue;
            }
            if j + 1 == span {
                self.window.push(smer);
                self.window.sort();
            } else {
                self.window.slide(j - span, smer);
            }

            let p = j + 1 - span;
            let min = self.window.min()?;
            if min.index == p || min.index == j {
                self.pending.push_back(p);
            }
        }
    }
}

impl Sketch for SyncmerSketch<'_> {
    fn index(&self) -> usize {
        self.last_emitted.unwrap_or(0)
    }

    fn name(&self) -> &'static str {
        "syncmer"
    }
}
