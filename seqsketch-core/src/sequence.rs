//! Sequence preparation helpers
//!
//! Alphabet tagging, circularization and byte-level complementation. Large
//! buffers are processed in parallel over disjoint chunks.

use std::borrow::Cow;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::kmer::{KmerError, KmerResult, BASE_TO_CODE};

/// Buffers at least this long are processed in parallel
pub const PARALLEL_THRESHOLD: usize = 1 << 20;

const CHUNK_SIZE: usize = 1 << 16;

/// Sequence alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    Dna,
    Rna,
    Protein,
}

impl Alphabet {
    pub fn is_nucleotide(&self) -> bool {
        matches!(self, Alphabet::Dna | Alphabet::Rna)
    }
}

/// A byte sequence tagged with its alphabet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub alphabet: Alphabet,
    pub bytes: Vec<u8>,
}

impl Sequence {
    pub fn new(alphabet: Alphabet, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            alphabet,
            bytes: bytes.into(),
        }
    }

    pub fn dna(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(Alphabet::Dna, bytes)
    }

    pub fn protein(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(Alphabet::Protein, bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Copy of `seq` with its first `k-1` bytes appended, so that k-mers wrapping
/// the origin can be scanned. The input is borrowed untouched when there is
/// nothing to append.
pub fn circularize(seq: &[u8], k: usize) -> Cow<'_, [u8]> {
    let extra = k.saturating_sub(1).min(seq.len());
    if extra == 0 {
        return Cow::Borrowed(seq);
    }
    let mut circular = Vec::with_capacity(seq.len() + extra);
    circular.extend_from_slice(seq);
    circular.extend_from_slice(&seq[..extra]);
    log::trace!("circularized {} bytes with {} wrap-around bytes", seq.len(), extra);
    Cow::Owned(circular)
}

/// Position and value of the first byte the k-mer codec cannot encode.
pub fn find_illegal_base(seq: &[u8]) -> Option<(usize, u8)> {
    let scan = |offset: usize, chunk: &[u8]| {
        chunk
            .iter()
            .position(|&b| BASE_TO_CODE[b as usize] > 3)
            .map(|i| (offset + i, chunk[i]))
    };

    if seq.len() < PARALLEL_THRESHOLD {
        return scan(0, seq);
    }
    seq.par_chunks(CHUNK_SIZE)
        .enumerate()
        .find_map_first(|(n, chunk)| scan(n * CHUNK_SIZE, chunk))
}

/// Fails with [`KmerError::IllegalBase`] at the lowest position the k-mer
/// codec cannot encode.
pub fn validate_nucleotides(seq: &[u8]) -> KmerResult<()> {
    match find_illegal_base(seq) {
        Some((position, base)) => Err(KmerError::IllegalBase {
            base,
            position,
            partial: 0,
        }),
        None => Ok(()),
    }
}

/// IUPAC-aware complement of one base, preserving case.
pub fn complement_base(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' | b'U' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'R' => b'Y',
        b'Y' => b'R',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        b'a' => b't',
        b't' | b'u' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        b'r' => b'y',
        b'y' => b'r',
        b'k' => b'm',
        b'm' => b'k',
        b'b' => b'v',
        b'v' => b'b',
        b'd' => b'h',
        b'h' => b'd',
        // S, W, N and anything else map to themselves
        other => other,
    }
}

/// Complement `seq` in place.
pub fn complement_in_place(seq: &mut [u8]) {
    if seq.len() < PARALLEL_THRESHOLD {
        seq.iter_mut().for_each(|b| *b = complement_base(*b));
    } else {
        seq.par_chunks_mut(CHUNK_SIZE)
            .for_each(|chunk| chunk.iter_mut().for_each(|b| *b = complement_base(*b)));
    }
}

/// Complemented copy of `seq`.
pub fn complement(seq: &[u8]) -> Vec<u8> {
    let mut out = seq.to_vec();
    complement_in_place(&mut out);
    out
}

/// Reverse complement of `seq`.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    let mut out = seq.to_vec();
    out.reverse();
    complement_in_place(&mut out);
    out
}
