//! Raw k-mer enumeration
//!
//! [`KmerIterator`] yields the packed code of every k-mer, re-encoding each
//! one in O(1) from its predecessor. [`HashIterator`] yields the ntHash of
//! every k-mer. Both scan one sequence forward once and can wrap around the
//! origin of a circular sequence.

use std::borrow::Cow;

use crate::kmer::{
    canonical_unchecked, encode, encode_from_adjacent_unchecked, Adjacency, KmerCode, KmerError,
    KmerResult, MAX_K,
};
use crate::nthash::NtHashes;
use crate::sequence::{circularize, validate_nucleotides};
use crate::sketch::{check_sequence, SketchResult};
use crate::types::{KmerHit, SketchHit};

/// Packed codes of consecutive k-mers.
///
/// An illegal base ends the scan: the error is yielded once, on the `next`
/// call that reaches it, and the iterator is exhausted afterwards.
pub struct KmerIterator<'a> {
    seq: Cow<'a, [u8]>,
    k: usize,
    canonical: bool,
    next_idx: usize,
    code: u64,
    failed: bool,
}

impl<'a> KmerIterator<'a> {
    /// `k` must be within [1, 32] and no longer than the sequence.
    pub fn new(seq: &'a [u8], k: usize, canonical: bool, circular: bool) -> SketchResult<Self> {
        if k > MAX_K {
            return Err(KmerError::KOverflow(k).into());
        }
        check_sequence(seq, k, k)?;
        let seq = if circular { circularize(seq, k) } else { seq.into() };
        Ok(Self {
            seq,
            k,
            canonical,
            next_idx: 0,
            code: 0,
            failed: false,
        })
    }

    /// Start of the k-mer returned by the last successful `next`
    pub fn index(&self) -> usize {
        self.next_idx.saturating_sub(1)
    }

    fn encode_next(&self, i: usize) -> KmerResult<u64> {
        let kmer = &self.seq[i..i + self.k];
        let result = if i == 0 {
            encode(kmer)
        } else {
            encode_from_adjacent_unchecked(kmer, self.code, Adjacency::Former)
        };
        // report positions relative to the scanned sequence
        result.map_err(|e| match e {
            KmerError::IllegalBase { base, position, partial } => KmerError::IllegalBase {
                base,
                position: i + position,
                partial,
            },
            other => other,
        })
    }
}

impl Iterator for KmerIterator<'_> {
    type Item = KmerResult<KmerHit>;

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.next_idx;
        if self.failed || i + self.k > self.seq.len() {
            return None;
        }
        match self.encode_next(i) {
            Ok(code) => {
                self.code = code;
                self.next_idx += 1;
                let code = if self.canonical {
                    canonical_unchecked(code, self.k)
                } else {
                    code
                };
                Some(Ok(KmerHit {
                    index: i,
                    kmer: KmerCode::from_raw(code, self.k),
                }))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// ntHash values of consecutive k-mers, tagged with their positions
pub struct HashIterator<'a> {
    hashes: NtHashes<'a>,
}

impl<'a> HashIterator<'a> {
    /// Fails on any byte the k-mer codec cannot encode.
    pub fn new(seq: &'a [u8], k: usize, canonical: bool, circular: bool) -> SketchResult<Self> {
        check_sequence(seq, k, k)?;
        validate_nucleotides(seq)?;
        let seq = if circular { circularize(seq, k) } else { seq.into() };
        Ok(Self {
            hashes: NtHashes::new(seq, k, canonical)?,
        })
    }

    /// Start of the k-mer returned by the last `next`
    pub fn index(&self) -> usize {
        self.hashes.index()
    }
}

impl Iterator for HashIterator<'_> {
    type Item = SketchHit;

    fn next(&mut self) -> Option<SketchHit> {
        let value = self.hashes.next()?;
        Some(SketchHit::new(self.hashes.index(), value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.hashes.size_hint()
    }
}
