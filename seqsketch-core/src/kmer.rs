//! Bit-packed k-mer codec
//!
//! A k-mer of up to 32 bases is packed into a `u64`, two bits per base,
//! most-significant base first and right-aligned in bits `[0, 2k)`:
//! A=00, C=01, G=10, T=11. Lowercase input is accepted.
//!
//! # Degenerate bases
//!
//! Encoding is lossy for IUPAC ambiguity codes. M, V, H, R, D, W and N encode
//! as A; S, B and Y as C; K as G. Decoding gives back the representative base,
//! never the original symbol, so the codec must not be used where exact base
//! identity matters downstream. Every other byte is rejected.
//!
//! Reverse, complement and canonical forms work directly on the packed value
//! with fixed shifts and masks, without a per-base loop.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest k-mer size that fits in a `u64`
pub const MAX_K: usize = 32;

const INVALID: u8 = 0xff;

const CODE_TO_BASE: [u8; 4] = *b"ACGT";

const fn build_base_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let groups: [(&[u8], u8); 4] = [
        (b"AaMmVvHhRrDdWwNn", 0),
        (b"CcSsBbYy", 1),
        (b"GgKk", 2),
        (b"Tt", 3),
    ];
    let mut g = 0;
    while g < groups.len() {
        let (symbols, code) = groups[g];
        let mut i = 0;
        while i < symbols.len() {
            table[symbols[i] as usize] = code;
            i += 1;
        }
        g += 1;
    }
    table
}

/// Byte to 2-bit code lookup; `0xff` marks a byte outside the alphabet.
pub static BASE_TO_CODE: [u8; 256] = build_base_table();

/// Result type for codec operations
pub type KmerResult<T> = Result<T, KmerError>;

/// Errors raised by the k-mer codec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KmerError {
    #[error("k-mer size {0} out of range [1, 32]")]
    KOverflow(usize),

    #[error("code {code} does not fit in {k} bases")]
    CodeOverflow { code: u64, k: usize },

    /// `partial` holds the code of the bases before `position`.
    #[error("illegal base 0x{base:02x} at position {position}")]
    IllegalBase { base: u8, position: usize, partial: u64 },

    #[error("k-mer sizes do not match: {left} != {right}")]
    KMismatch { left: usize, right: usize },

    #[error("k-mers do not overlap by k-1 bases")]
    NotConsecutiveKmers,
}

/// Which side the already-encoded neighbour sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    /// The known k-mer starts one position before the new one.
    Former,
    /// The known k-mer starts one position after the new one.
    Latter,
}

/// Value mask covering `k` bases, i.e. `4^k - 1`.
#[inline]
pub fn mask(k: usize) -> u64 {
    if k >= MAX_K {
        u64::MAX
    } else {
        (1u64 << (k << 1)) - 1
    }
}

#[inline]
fn check_k(k: usize) -> KmerResult<()> {
    if k == 0 || k > MAX_K {
        Err(KmerError::KOverflow(k))
    } else {
        Ok(())
    }
}

#[inline]
fn base_code(base: u8, position: usize, partial: u64) -> KmerResult<u64> {
    match BASE_TO_CODE[base as usize] {
        INVALID => Err(KmerError::IllegalBase { base, position, partial }),
        v => Ok(v as u64),
    }
}

/// Encode a k-mer of 1 to 32 bases.
///
/// Ambiguity codes collapse to a representative base (see the module docs).
pub fn encode(kmer: &[u8]) -> KmerResult<u64> {
    check_k(kmer.len())?;
    let mut code = 0u64;
    for (position, &base) in kmer.iter().enumerate() {
        code = (code << 2) | base_code(base, position, code)?;
    }
    Ok(code)
}

/// Decode `code` into `k` uppercase bases.
pub fn decode(code: u64, k: usize) -> KmerResult<Vec<u8>> {
    check_k(k)?;
    if code > mask(k) {
        return Err(KmerError::CodeOverflow { code, k });
    }
    Ok(decode_unchecked(code, k))
}

/// Decode without validating `k` or the code range.
pub fn decode_unchecked(code: u64, k: usize) -> Vec<u8> {
    (0..k)
        .rev()
        .map(|i| CODE_TO_BASE[((code >> (i << 1)) & 3) as usize])
        .collect()
}

/// Encode `kmer` in O(1) from the code of a neighbouring k-mer.
///
/// With [`Adjacency::Former`], `adjacent` must start one position before
/// `kmer`; with [`Adjacency::Latter`], one position after. The k-1 shared
/// bases are compared byte for byte.
pub fn encode_from_adjacent(
    kmer: &[u8],
    adjacent: &[u8],
    adjacent_code: u64,
    adjacency: Adjacency,
) -> KmerResult<u64> {
    check_k(kmer.len())?;
    if kmer.len() != adjacent.len() {
        return Err(KmerError::KMismatch {
            left: kmer.len(),
            right: adjacent.len(),
        });
    }

    let k = kmer.len();
    let overlapping = match adjacency {
        Adjacency::Former => kmer[..k - 1] == adjacent[1..],
        Adjacency::Latter => kmer[1..] == adjacent[..k - 1],
    };
    if !overlapping {
        return Err(KmerError::NotConsecutiveKmers);
    }

    encode_from_adjacent_unchecked(kmer, adjacent_code, adjacency)
}

/// Hot-loop form of [`encode_from_adjacent`].
///
/// The overlap and the length of `kmer` are not checked; if they do not hold
/// the returned code is meaningless. Only the single incoming base is
/// validated.
#[inline]
pub fn encode_from_adjacent_unchecked(
    kmer: &[u8],
    adjacent_code: u64,
    adjacency: Adjacency,
) -> KmerResult<u64> {
    let k = kmer.len();
    debug_assert!(k >= 1 && k <= MAX_K);
    match adjacency {
        Adjacency::Former => {
            let v = base_code(kmer[k - 1], k - 1, adjacent_code)?;
            Ok(((adjacent_code << 2) | v) & mask(k))
        }
        Adjacency::Latter => {
            let v = base_code(kmer[0], 0, adjacent_code)?;
            Ok((adjacent_code >> 2) | (v << ((k - 1) << 1)))
        }
    }
}

/// Reverse the base order of `code` (no complement).
pub fn reverse(code: u64, k: usize) -> KmerResult<u64> {
    check_k(k)?;
    Ok(reverse_unchecked(code, k))
}

/// Reverse without validating `k`.
#[inline]
pub fn reverse_unchecked(code: u64, k: usize) -> u64 {
    debug_assert!(k >= 1 && k <= MAX_K);
    let mut c = code;
    c = ((c >> 2) & 0x3333_3333_3333_3333) | ((c & 0x3333_3333_3333_3333) << 2);
    c = ((c >> 4) & 0x0F0F_0F0F_0F0F_0F0F) | ((c & 0x0F0F_0F0F_0F0F_0F0F) << 4);
    c = ((c >> 8) & 0x00FF_00FF_00FF_00FF) | ((c & 0x00FF_00FF_00FF_00FF) << 8);
    c = ((c >> 16) & 0x0000_FFFF_0000_FFFF) | ((c & 0x0000_FFFF_0000_FFFF) << 16);
    c = (c >> 32) | (c << 32);
    c >> ((MAX_K - k) << 1)
}

/// Complement every base of `code`.
pub fn complement(code: u64, k: usize) -> KmerResult<u64> {
    check_k(k)?;
    Ok(complement_unchecked(code, k))
}

/// Complement without validating `k`.
#[inline]
pub fn complement_unchecked(code: u64, k: usize) -> u64 {
    // A<->T and C<->G are exact 2-bit complements
    code ^ mask(k)
}

/// Reverse complement of `code`.
pub fn reverse_complement(code: u64, k: usize) -> KmerResult<u64> {
    check_k(k)?;
    Ok(reverse_complement_unchecked(code, k))
}

/// Reverse complement without validating `k`.
#[inline]
pub fn reverse_complement_unchecked(code: u64, k: usize) -> u64 {
    complement_unchecked(reverse_unchecked(code, k), k)
}

/// The numerically smaller of `code` and its reverse complement.
pub fn canonical(code: u64, k: usize) -> KmerResult<u64> {
    check_k(k)?;
    Ok(canonical_unchecked(code, k))
}

/// Canonical form without validating `k`.
#[inline]
pub fn canonical_unchecked(code: u64, k: usize) -> u64 {
    code.min(reverse_complement_unchecked(code, k))
}

/// A packed k-mer together with its size.
///
/// Ordering is by `k` first, then by code. Built from bytes, the value
/// carries the lossy ambiguity-code collapsing described in the module docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KmerCode {
    k: u8,
    code: u64,
}

impl KmerCode {
    pub fn new(code: u64, k: usize) -> KmerResult<Self> {
        check_k(k)?;
        if code > mask(k) {
            return Err(KmerError::CodeOverflow { code, k });
        }
        Ok(Self { k: k as u8, code })
    }

    pub fn from_bytes(kmer: &[u8]) -> KmerResult<Self> {
        let code = encode(kmer)?;
        Ok(Self {
            k: kmer.len() as u8,
            code,
        })
    }

    /// Caller guarantees `k` is in range and `code` fits.
    pub(crate) fn from_raw(code: u64, k: usize) -> Self {
        debug_assert!(k >= 1 && k <= MAX_K && code <= mask(k));
        Self { k: k as u8, code }
    }

    pub fn code(&self) -> u64 {
        self.code
    }

    pub fn k(&self) -> usize {
        self.k as usize
    }

    pub fn rev(&self) -> Self {
        self.with_code(reverse_unchecked(self.code, self.k()))
    }

    pub fn comp(&self) -> Self {
        self.with_code(complement_unchecked(self.code, self.k()))
    }

    pub fn rev_comp(&self) -> Self {
        self.with_code(reverse_complement_unchecked(self.code, self.k()))
    }

    pub fn canonical(&self) -> Self {
        self.with_code(canonical_unchecked(self.code, self.k()))
    }

    pub fn is_canonical(&self) -> bool {
        self.code <= reverse_complement_unchecked(self.code, self.k())
    }

    /// Decoded uppercase bases
    pub fn to_bytes(&self) -> Vec<u8> {
        decode_unchecked(self.code, self.k())
    }

    fn with_code(&self, code: u64) -> Self {
        Self { k: self.k, code }
    }
}

impl fmt::Display for KmerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // decode_unchecked only ever yields ACGT
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}
