//! Encode command implementation - pack k-mers into 2-bit codes

use anyhow::Result;
use std::io::Write;

use seqsketch_core::KmerCode;

use crate::error::CliError;

/// Write `kmer\tcode\tcanonical` for every k-mer.
pub fn execute(kmers: &[String], out: &mut dyn Write) -> Result<()> {
    log::debug!("Encoding {} k-mers", kmers.len());

    for kmer in kmers {
        let code = KmerCode::from_bytes(kmer.as_bytes())
            .map_err(|e| CliError::validation(format!("cannot encode '{}': {}", kmer, e)))?;
        writeln!(out, "{}\t{}\t{}", kmer, code.code(), code.canonical())?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(kmers: &[&str]) -> Result<String> {
        let kmers: Vec<String> = kmers.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        execute(&kmers, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_encode_lines() -> Result<()> {
        let output = run(&["ACGT", "TTT", "gca"])?;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec!["ACGT\t27\tACGT", "TTT\t63\tAAA", "gca\t36\tGCA"]);
        Ok(())
    }

    #[test]
    fn test_encode_rejects_bad_input() {
        let err = run(&["ACGT", "AC-T"]).unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());

        let long = "A".repeat(33);
        assert!(run(&[long.as_str()]).is_err());
    }
}
