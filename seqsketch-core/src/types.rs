use serde::{Deserialize, Serialize};

use crate::kmer::KmerCode;

/// 0-based start offset of a k-mer in the (possibly circularized) sequence
pub type Position = usize;

/// A selected position and its 64-bit hash value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SketchHit {
    pub index: Position,
    pub value: u64,
}

impl SketchHit {
    pub fn new(index: Position, value: u64) -> Self {
        Self { index, value }
    }
}

impl From<(Position, u64)> for SketchHit {
    fn from((index, value): (Position, u64)) -> Self {
        Self { index, value }
    }
}

/// A packed k-mer and where it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KmerHit {
    pub index: Position,
    pub kmer: KmerCode,
}
