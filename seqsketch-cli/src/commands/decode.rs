//! Decode command implementation

use anyhow::Result;
use std::io::Write;

use seqsketch_core::kmer::decode;

use crate::error::CliError;

pub fn execute(k: usize, codes: &[u64], out: &mut dyn Write) -> Result<()> {
    for &code in codes {
        let bases = decode(code, k)
            .map_err(|e| CliError::validation(format!("cannot decode {}: {}", code, e)))?;
        out.write_all(&bases)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_lines() -> Result<()> {
        let mut out = Vec::new();
        execute(4, &[27, 0, 255], &mut out)?;
        assert_eq!(String::from_utf8(out)?, "ACGT\nAAAA\nTTTT\n");
        Ok(())
    }

    #[test]
    fn test_decode_errors() {
        let mut out = Vec::new();
        // 4^3 does not fit in three bases
        assert!(execute(3, &[64], &mut out).is_err());
        assert!(execute(0, &[1], &mut out).is_err());
        assert!(execute(33, &[1], &mut out).is_err());
    }
}
