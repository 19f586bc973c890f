//! Nucleotide to amino-acid translation
//!
//! [`Translator`] is the seam the protein sketch uses; [`StandardCode`] is a
//! minimal implementation of NCBI genetic code table 1.

use crate::sequence::reverse_complement;
use crate::sketch::{SketchError, SketchResult};

/// Amino acids of table 1, indexed by `b1*16 + b2*4 + b3` with A=0 C=1 G=2 T=3
const STANDARD_TABLE: &[u8; 64] =
    b"KNKNTTTTRSRSIIMIQHQHPPPPRRRRLLLLEDEDAAAAGGGGVVVV*Y*YSSSS*CWCLFLF";

/// Translation collaborator
pub trait Translator {
    /// Translate `nucleotides` in `frame`: 1, 2 or 3 on the forward strand,
    /// -1, -2 or -3 on the reverse complement.
    fn translate(&self, nucleotides: &[u8], frame: i8) -> SketchResult<Vec<u8>>;
}

fn base_index(b: u8) -> Option<usize> {
    match b.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' | b'U' => Some(3),
        _ => None,
    }
}

/// The standard genetic code (NCBI table 1)
#[derive(Debug, Clone, Default)]
pub struct StandardCode {
    trim_stop: bool,
}

impl StandardCode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a code by NCBI table id; only table 1 is available.
    pub fn from_table(id: u8) -> SketchResult<Self> {
        if id == 1 {
            Ok(Self::new())
        } else {
            Err(SketchError::Translation(format!(
                "unsupported codon table {}",
                id
            )))
        }
    }

    /// Drop a trailing stop (`*`) from the translation.
    pub fn trim_stop(mut self, trim: bool) -> Self {
        self.trim_stop = trim;
        self
    }

    /// Amino acid for one codon; `X` if any base is ambiguous.
    pub fn translate_codon(codon: &[u8]) -> u8 {
        match (
            base_index(codon[0]),
            base_index(codon[1]),
            base_index(codon[2]),
        ) {
            (Some(b1), Some(b2), Some(b3)) => STANDARD_TABLE[b1 * 16 + b2 * 4 + b3],
            _ => b'X',
        }
    }
}

impl Translator for StandardCode {
    fn translate(&self, nucleotides: &[u8], frame: i8) -> SketchResult<Vec<u8>> {
        let offset = match frame {
            1 | -1 => 0,
            2 | -2 => 1,
            3 | -3 => 2,
            _ => {
                return Err(SketchError::Translation(format!(
                    "invalid frame {}, expected one of 1, 2, 3, -1, -2, -3",
                    frame
                )))
            }
        };

        let strand;
        let source = if frame < 0 {
            strand = reverse_complement(nucleotides);
            &strand[..]
        } else {
            nucleotides
        };

        let mut protein: Vec<u8> = source
            .get(offset..)
            .unwrap_or_default()
            .chunks_exact(3)
            .map(Self::translate_codon)
            .collect();

        if self.trim_stop && protein.last() == Some(&b'*') {
            protein.pop();
        }
        Ok(protein)
    }
}
