//! Kmers command implementation - list the packed code of every k-mer

use anyhow::Result;
use std::io::Write;
use std::path::Path;

use seqsketch_core::kmer::MAX_K;
use seqsketch_core::{Alphabet, KmerIterator, SketchError};

use super::read_records;
use crate::error::CliError;

/// Write `name\tindex\tcode` for every k-mer of every record.
///
/// A record stops at its first base the codec cannot encode; the remaining
/// records are still processed.
pub fn execute(
    input: &Path,
    k: usize,
    canonical: bool,
    circular: bool,
    out: &mut dyn Write,
) -> Result<()> {
    if k == 0 || k > MAX_K {
        return Err(CliError::validation(format!("k must be within 1..={}, got {}", MAX_K, k)).into());
    }

    log::info!("Listing {}-mers of {} (canonical={}, circular={})", k, input.display(), canonical, circular);
    let records = read_records(input, Alphabet::Dna)?;

    let mut total = 0usize;
    for record in &records {
        let iter = match KmerIterator::new(record.sequence.as_bytes(), k, canonical, circular) {
            Ok(iter) => iter,
            Err(e @ (SketchError::ShortSequence { .. } | SketchError::EmptySequence)) => {
                log::warn!("Skipping {}: {}", record.name, e);
                continue;
            }
            Err(e) => return Err(CliError::validation(e.to_string()).into()),
        };

        for hit in iter {
            match hit {
                Ok(hit) => {
                    writeln!(out, "{}\t{}\t{}", record.name, hit.index, hit.kmer.code())?;
                    total += 1;
                }
                Err(e) => log::warn!("Stopping {}: {}", record.name, e),
            }
        }
    }

    out.flush()?;
    log::info!("Wrote {} k-mers", total);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_util::write_fasta;

    fn run(records: &[(&str, &str)], k: usize, canonical: bool, circular: bool) -> Result<Vec<String>> {
        let fasta = write_fasta(records);
        let mut out = Vec::new();
        execute(fasta.path(), k, canonical, circular, &mut out)?;
        Ok(String::from_utf8(out)?.lines().map(str::to_string).collect())
    }

    #[test]
    fn test_kmer_lines() -> Result<()> {
        let lines = run(&[("s1", "ACGTT"), ("s2", "TTTA")], 3, false, false)?;
        assert_eq!(
            lines,
            vec!["s1\t0\t6", "s1\t1\t27", "s1\t2\t47", "s2\t0\t63", "s2\t1\t60"]
        );
        Ok(())
    }

    #[test]
    fn test_canonical_and_circular() -> Result<()> {
        let lines = run(&[("s1", "TTTA")], 3, true, true)?;
        // TTT TTA TAT ATT, canonical: AAA TAA ATA AAT
        assert_eq!(lines, vec!["s1\t0\t0", "s1\t1\t48", "s1\t2\t12", "s1\t3\t3"]);
        Ok(())
    }

    #[test]
    fn test_short_and_illegal_records() -> Result<()> {
        let lines = run(&[("short", "AC"), ("gap", "ACGU"), ("ok", "GGG")], 3, false, false)?;
        assert_eq!(lines, vec!["gap\t0\t6", "ok\t0\t42"]);
        Ok(())
    }

    #[test]
    fn test_k_out_of_range() {
        let fasta = write_fasta(&[("s1", "ACGT")]);
        let mut out = Vec::new();
        assert!(execute(fasta.path(), 33, false, false, &mut out).is_err());
        assert!(execute(fasta.path(), 0, false, false, &mut out).is_err());
    }
}
