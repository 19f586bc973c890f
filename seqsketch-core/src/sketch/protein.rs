//! Minimizers over amino-acid k-mers
//!
//! Same selection as [`MinimizerSelector`], but the hash stream comes from
//! xxHash64 of every length-k window of a protein sequence instead of a
//! rolling nucleotide hash.

use std::borrow::Cow;

use xxhash_rust::xxh64::xxh64;

use crate::sequence::{Alphabet, Sequence};
use crate::translate::Translator;
use crate::types::SketchHit;

use super::minimizer::MinimizerSelector;
use super::{check_sequence, check_window, Sketch, SketchResult};

/// Non-rolling hash of each amino-acid k-mer, in order
pub struct ProteinHashes<'a> {
    seq: Cow<'a, [u8]>,
    k: usize,
    next_idx: usize,
}

impl<'a> ProteinHashes<'a> {
    pub fn new(seq: impl Into<Cow<'a, [u8]>>, k: usize) -> Self {
        Self {
            seq: seq.into(),
            k,
            next_idx: 0,
        }
    }
}

impl Iterator for ProteinHashes<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let window = self.seq.get(self.next_idx..self.next_idx + self.k)?;
        self.next_idx += 1;
        Some(xxh64(window, 0))
    }
}

/// Minimizer sketch of a protein sequence
pub struct ProteinMinimizerSketch<'a> {
    inner: MinimizerSelector<ProteinHashes<'a>>,
}

impl<'a> ProteinMinimizerSketch<'a> {
    /// Sketch protein bytes directly. Requires `k >= 1`, `w >= 1` and at least
    /// `k + w - 1` residues.
    pub fn new(protein: impl Into<Cow<'a, [u8]>>, k: usize, w: usize) -> SketchResult<Self> {
        let protein = protein.into();
        check_window(w)?;
        check_sequence(&protein, k, k.saturating_add(w - 1))?;
        log::debug!("protein minimizer sketch: {} residues, k={}, w={}", protein.len(), k, w);
        Ok(Self {
            inner: MinimizerSelector::new(ProteinHashes::new(protein, k), w),
        })
    }

    /// Sketch `seq`, translating it in `frame` first unless it is already a
    /// protein sequence.
    pub fn from_sequence(
        seq: &'a Sequence,
        k: usize,
        translator: &dyn Translator,
        frame: i8,
        w: usize,
    ) -> SketchResult<Self> {
        match seq.alphabet {
            Alphabet::Protein => Self::new(seq.as_bytes(), k, w),
            Alphabet::Dna | Alphabet::Rna => {
                let protein = translator.translate(seq.as_bytes(), frame)?;
                Self::new(protein, k, w)
            }
        }
    }
}

impl Iterator for ProteinMinimizerSketch<'_> {
    type Item = SketchHit;

    fn next(&mut self) -> Option<SketchHit> {
        self.inner.next()
    }
}

impl Sketch for ProteinMinimizerSketch<'_> {
    fn index(&self) -> usize {
        self.inner.index()
    }

    fn name(&self) -> &'static str {
        "protein_minimizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::SketchError;
    use crate::translate::StandardCode;

    const PROTEIN: &[u8] = b"MKVLAAGIVGLLLAHSQAETKW";

    #[test]
    fn test_hashes_are_xxh64_of_windows() {
        let hashes: Vec<u64> = ProteinHashes::new(PROTEIN, 3).collect();
        assert_eq!(hashes.len(), PROTEIN.len() - 2);
        assert_eq!(hashes[0], xxh64(b"MKV", 0));
        assert_eq!(hashes[4], xxh64(b"AAG", 0));
    }

    #[test]
    fn test_matches_naive_windows() {
        let (k, w) = (3, 4);
        let hashes: Vec<u64> = ProteinHashes::new(PROTEIN, k).collect();
        let mut expected: Vec<SketchHit> = Vec::new();
        for start in 0..=hashes.len() - w {
            let (offset, value) = hashes[start..start + w]
                .iter()
                .enumerate()
                .min_by_key(|(_, v)| **v)
                .map(|(i, v)| (start + i, *v))
                .unwrap();
            if expected.last().map(|h| h.index) != Some(offset) {
                expected.push(SketchHit::new(offset, value));
            }
        }
        let got: Vec<_> = ProteinMinimizerSketch::new(PROTEIN, k, w).unwrap().collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_from_nucleotides_translates() {
        // ATG AAA GTT CTG GCT GCA -> M K V L A A
        let dna = Sequence::dna(b"ATGAAAGTTCTGGCTGCA".to_vec());
        let protein = Sequence::protein(b"MKVLAA".to_vec());
        let code = StandardCode::new();

        let from_dna: Vec<_> = ProteinMinimizerSketch::from_sequence(&dna, 2, &code, 1, 2)
            .unwrap()
            .collect();
        let direct: Vec<_> = ProteinMinimizerSketch::from_sequence(&protein, 2, &code, 1, 2)
            .unwrap()
            .collect();
        assert!(!direct.is_empty());
        assert_eq!(from_dna, direct);
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(
            ProteinMinimizerSketch::new(PROTEIN, 0, 2).err(),
            Some(SketchError::InvalidK(0))
        );
        assert_eq!(
            ProteinMinimizerSketch::new(&b"MKV"[..], 3, 2).err(),
            Some(SketchError::ShortSequence { len: 3, min: 4 })
        );

        let dna = Sequence::dna(b"ATGAAA".to_vec());
        let err = ProteinMinimizerSketch::from_sequence(&dna, 1, &StandardCode::new(), 4, 1).err();
        assert!(matches!(err, Some(SketchError::Translation(_))));
    }
}
