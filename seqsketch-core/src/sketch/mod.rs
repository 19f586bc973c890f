//! Sketch selection engines
//!
//! Each engine consumes a stream of per-position hash codes and selects a
//! sparse, reproducible subset of positions in one forward pass with bounded
//! memory. Engines are plain owned iterators: one instance per sequence scan,
//! buffers released when the scan ends or the value is dropped.

pub use crate::types::SketchHit;

pub mod minimizer;
pub mod protein;
pub mod syncmer;
mod window;


pub use minimizer::{MinimizerSelector, MinimizerSketch};
pub use protein::{ProteinHashes, ProteinMinimizerSketch};
pub use syncmer::SyncmerSketch;

use serde::{Deserialize, Serialize};

use crate::kmer::KmerError;
use crate::sequence::{Alphabet, Sequence};
use crate::translate::StandardCode;

/// Parameters shared by every sketch engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SketchParams {
    /// K-mer size (universal parameter)
    pub k: usize,
    /// Method-specific parameters
    pub method: SketchMethod,
    /// Treat the sequence as circular
    pub circular: bool,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            k: 15,
            method: SketchMethod::Minimizer { w: 10 },
            circular: false,
        }
    }
}

/// Method-specific parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum SketchMethod {
    /// Window minimizers over canonical ntHash values
    Minimizer {
        /// Window width in k-mers
        w: usize,
    },
    /// Closed syncmers
    Syncmer {
        /// s-mer size, `1 <= s <= k`
        s: usize,
    },
    /// Minimizers over amino-acid k-mers
    ProteinMinimizer {
        /// Window width in k-mers
        w: usize,
        /// Reading frame used when a nucleotide sequence must be translated
        frame: i8,
    },
}

/// Result type for sketch construction
pub type SketchResult<T> = Result<T, SketchError>;

/// Construction-time errors of the sketch engines
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SketchError {
    #[error("invalid k-mer size: {0}")]
    InvalidK(usize),

    #[error("invalid window size: {0}")]
    InvalidW(usize),

    #[error("invalid s-mer size {s} for k = {k}")]
    InvalidS { s: usize, k: usize },

    #[error("empty sequence")]
    EmptySequence,

    #[error("sequence too short: {len} < {min}")]
    ShortSequence { len: usize, min: usize },

    #[error("encoding error: {0}")]
    Kmer(#[from] KmerError),

    #[error("translation error: {0}")]
    Translation(String),
}

/// A lazy, single-pass sketch over one sequence
pub trait Sketch: Iterator<Item = SketchHit> {
    /// Position of the last returned hit
    fn index(&self) -> usize;

    /// Name of the selection scheme
    fn name(&self) -> &'static str;
}

/// Factory for creating sketch engines
pub struct SketchFactory;

impl SketchFactory {
    /// Create the engine selected by `params` over `seq`.
    ///
    /// Protein sketches of nucleotide input are translated with the standard
    /// genetic code.
    pub fn create<'a>(seq: &'a Sequence, params: &SketchParams) -> SketchResult<Box<dyn Sketch + 'a>> {
        let bytes = seq.as_bytes();
        match params.method {
            SketchMethod::Minimizer { w } => Ok(Box::new(MinimizerSketch::new(
                bytes,
                params.k,
                w,
                params.circular,
            )?)),
            SketchMethod::Syncmer { s } => Ok(Box::new(SyncmerSketch::new(
                bytes,
                params.k,
                s,
                params.circular,
            )?)),
            SketchMethod::ProteinMinimizer { w, frame } => {
                let sketch = match seq.alphabet {
                    Alphabet::Protein => ProteinMinimizerSketch::new(bytes, params.k, w)?,
                    _ => ProteinMinimizerSketch::from_sequence(seq, params.k, &StandardCode::new(), frame, w)?,
                };
                Ok(Box::new(sketch))
            }
        }
    }

    /// List all available sketch methods
    pub fn available_methods() -> Vec<&'static str> {
        vec!["minimizer", "syncmer", "protein"]
    }
}

pub(crate) fn check_window(w: usize) -> SketchResult<()> {
    if w == 0 {
        Err(SketchError::InvalidW(w))
    } else {
        Ok(())
    }
}

/// Shared construction checks: `k >= 1`, non-empty, `len >= min_len`.
pub(crate) fn check_sequence(seq: &[u8], k: usize, min_len: usize) -> SketchResult<()> {
    if k == 0 {
        return Err(SketchError::InvalidK(k));
    }
    if seq.is_empty() {
        return Err(SketchError::EmptySequence);
    }
    if seq.len() < min_len {
        return Err(SketchError::ShortSequence {
            len: seq.len(),
            min: min_len,
        });
    }
    Ok(())
}
