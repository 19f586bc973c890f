//! ntHash rolling hash for nucleotide k-mers
//!
//! Produces one 64-bit hash per k-mer position in a single forward pass,
//! updating in O(1) per step. The reverse-complement hash is tracked
//! alongside the forward one so a strand-independent (canonical) value is
//! available at no extra cost.
//!
//! Bytes other than A/C/G/T (either case) hash like N, i.e. with a zero seed.

use std::borrow::Cow;

use crate::sketch::{SketchError, SketchResult};

const SEED_A: u64 = 0x3c8b_fbb3_95c6_0474;
const SEED_C: u64 = 0x3193_c185_62a0_2b4c;
const SEED_G: u64 = 0x2032_3ed0_8257_2324;
const SEED_T: u64 = 0x2955_49f5_4be2_4456;

const fn build_seed_table(complement: bool) -> [u64; 256] {
    let mut table = [0u64; 256];
    let (a, c, g, t) = if complement {
        (SEED_T, SEED_G, SEED_C, SEED_A)
    } else {
        (SEED_A, SEED_C, SEED_G, SEED_T)
    };
    table[b'A' as usize] = a;
    table[b'a' as usize] = a;
    table[b'C' as usize] = c;
    table[b'c' as usize] = c;
    table[b'G' as usize] = g;
    table[b'g' as usize] = g;
    table[b'T' as usize] = t;
    table[b't' as usize] = t;
    table
}

static SEEDS: [u64; 256] = build_seed_table(false);
static COMPLEMENT_SEEDS: [u64; 256] = build_seed_table(true);

/// Rolling ntHash state for a fixed k
#[derive(Debug, Clone)]
pub struct NtHasher {
    k: usize,
    forward: u64,
    reverse: u64,
}

impl NtHasher {
    pub fn new(k: usize) -> SketchResult<Self> {
        if k == 0 {
            return Err(SketchError::InvalidK(k));
        }
        Ok(Self {
            k,
            forward: 0,
            reverse: 0,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Hash `kmer` from scratch; `kmer` must be exactly k bytes.
    pub fn init(&mut self, kmer: &[u8]) {
        debug_assert_eq!(kmer.len(), self.k);
        let k = self.k as u32;
        self.forward = 0;
        self.reverse = 0;
        for (i, &base) in kmer.iter().enumerate() {
            let i = i as u32;
            self.forward ^= SEEDS[base as usize].rotate_left(k - 1 - i);
            self.reverse ^= COMPLEMENT_SEEDS[base as usize].rotate_left(i);
        }
    }

    /// Slide one position: drop `out` from the front, append `inc`.
    #[inline]
    pub fn roll(&mut self, out: u8, inc: u8) {
        let k = self.k as u32;
        let (out, inc) = (out as usize, inc as usize);
        self.forward = self.forward.rotate_left(1) ^ SEEDS[out].rotate_left(k) ^ SEEDS[inc];
        self.reverse = self.reverse.rotate_right(1)
            ^ COMPLEMENT_SEEDS[out].rotate_right(1)
            ^ COMPLEMENT_SEEDS[inc].rotate_left(k - 1);
    }

    /// Current hash; the smaller of both strands when `canonical`.
    #[inline]
    pub fn hash(&self, canonical: bool) -> u64 {
        if canonical {
            self.forward.min(self.reverse)
        } else {
            self.forward
        }
    }
}

/// Stream of ntHash values, one per k-mer start, over an owned or borrowed
/// sequence.
pub struct NtHashes<'a> {
    seq: Cow<'a, [u8]>,
    hasher: NtHasher,
    canonical: bool,
    next_idx: usize,
}

impl<'a> NtHashes<'a> {
    pub fn new(seq: impl Into<Cow<'a, [u8]>>, k: usize, canonical: bool) -> SketchResult<Self> {
        let seq = seq.into();
        let hasher = NtHasher::new(k)?;
        if seq.len() < k {
            return Err(SketchError::ShortSequence {
                len: seq.len(),
                min: k,
            });
        }
        Ok(Self {
            seq,
            hasher,
            canonical,
            next_idx: 0,
        })
    }

    /// Start offset of the k-mer hashed by the last call to `next`
    pub fn index(&self) -> usize {
        self.next_idx.saturating_sub(1)
    }

    pub fn sequence(&self) -> &[u8] {
        &self.seq
    }
}

impl Iterator for NtHashes<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let k = self.hasher.k();
        let i = self.next_idx;
        if i + k > self.seq.len() {
            return None;
        }
        if i == 0 {
            self.hasher.init(&self.seq[..k]);
        } else {
            self.hasher.roll(self.seq[i - 1], self.seq[i + k - 1]);
        }
        self.next_idx += 1;
        Some(self.hasher.hash(self.canonical))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.seq.len() + 1).saturating_sub(self.next_idx + self.hasher.k());
        (remaining, Some(remaining))
    }
}

/// Hash a single k-mer from scratch.
pub fn nthash(kmer: &[u8], canonical: bool) -> Option<u64> {
    let mut hasher = NtHasher::new(kmer.len()).ok()?;
    hasher.init(kmer);
    Some(hasher.hash(canonical))
}
