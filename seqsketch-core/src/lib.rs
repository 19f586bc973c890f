//! seqsketch core library
//!
//! Bit-packed k-mer codec, ntHash rolling hashes, k-mer iterators and the
//! minimizer / closed-syncmer / protein-minimizer sketch engines.

pub mod iterator;
pub mod kmer;
pub mod nthash;
pub mod sequence;
pub mod sketch;
pub mod translate;
pub mod types;

// Re-export commonly used types and functions
pub use iterator::{HashIterator, KmerIterator};
pub use kmer::{Adjacency, KmerCode, KmerError, KmerResult};
pub use sequence::{Alphabet, Sequence};
pub use sketch::{
    MinimizerSketch, ProteinMinimizerSketch, Sketch, SketchError, SketchFactory, SketchMethod,
    SketchParams, SketchResult, SyncmerSketch,
};
pub use translate::{StandardCode, Translator};
pub use types::{KmerHit, SketchHit};

/// Version information for the seqsketch core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
