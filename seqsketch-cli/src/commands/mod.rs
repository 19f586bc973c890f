//! Command implementations for the seqsketch CLI

pub mod decode;
pub mod encode;
pub mod kmers;
pub mod sketch;

use anyhow::{Context, Result};
use needletail::parse_fastx_file;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use seqsketch_core::{Alphabet, Sequence};

use crate::error::{CliError, CliResult};

/// One FASTA/FASTQ record
#[derive(Debug, Clone)]
pub struct Record {
    /// Identifier up to the first whitespace
    pub name: String,
    pub sequence: Sequence,
}

/// Read every record of a FASTA/FASTQ file (plain or gzip).
pub fn read_records(path: &Path, alphabet: Alphabet) -> CliResult<Vec<Record>> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }

    let file = path.display().to_string();
    let mut reader = parse_fastx_file(path).map_err(|e| CliError::parse(file.as_str(), e.to_string()))?;

    let mut records = Vec::new();
    while let Some(record) = reader.next() {
        let record = record.map_err(|e| CliError::parse(file.as_str(), e.to_string()))?;
        let id = String::from_utf8_lossy(record.id());
        let name = id.split_whitespace().next().unwrap_or_default().to_string();
        records.push(Record {
            name,
            sequence: Sequence::new(alphabet, record.seq().into_owned()),
        });
    }

    log::info!("Loaded {} records from {}", records.len(), file);
    Ok(records)
}

/// Buffered writer on `path`, or on stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(std::io::stdout().lock()))),
    }
}
