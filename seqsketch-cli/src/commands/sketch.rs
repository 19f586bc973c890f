//! Sketch command implementation - minimizer, syncmer and protein sketches of FASTA/FASTQ records

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use seqsketch_core::{Alphabet, SketchError, SketchFactory, SketchHit, SketchMethod, SketchParams};

use super::{read_records, Record};
use crate::config::{Config, OutputFormat, SketchOverrides};
use crate::error::{CliError, CliResult};

#[derive(Serialize)]
struct HitRecord<'a> {
    name: &'a str,
    #[serde(flatten)]
    hit: SketchHit,
}

fn method_name(method: &SketchMethod) -> &'static str {
    match method {
        SketchMethod::Minimizer { .. } => "minimizer",
        SketchMethod::Syncmer { .. } => "syncmer",
        SketchMethod::ProteinMinimizer { .. } => "protein",
    }
}

/// Sketch one record. Records too short for the parameters yield no hits;
/// a byte the k-mer codec rejects fails the whole run.
fn sketch_record(record: &Record, params: &SketchParams) -> CliResult<Vec<SketchHit>> {
    match SketchFactory::create(&record.sequence, params) {
        Ok(sketch) => Ok(sketch.collect()),
        Err(e @ (SketchError::ShortSequence { .. } | SketchError::EmptySequence)) => {
            log::warn!("Skipping {}: {}", record.name, e);
            Ok(Vec::new())
        }
        Err(e) => Err(CliError::sketch(
            method_name(&params.method),
            format!("{}: {}", record.name, e),
        )),
    }
}

pub fn execute(
    config: &Config,
    input: &Path,
    overrides: &SketchOverrides,
    protein_input: bool,
    format: Option<OutputFormat>,
    out: &mut dyn Write,
) -> Result<()> {
    let params = config.sketch.params(overrides)?;
    let format = format.unwrap_or(config.output.format);

    let alphabet = if protein_input {
        if !matches!(params.method, SketchMethod::ProteinMinimizer { .. }) {
            return Err(CliError::validation("--protein input requires --method protein").into());
        }
        Alphabet::Protein
    } else {
        Alphabet::Dna
    };

    log::info!("Starting {} sketch of {}", method_name(&params.method), input.display());
    log::info!("Sketch parameters: {:?}", params);

    let records = read_records(input, alphabet)?;

    let sketches = records
        .par_iter()
        .map(|record| sketch_record(record, &params))
        .collect::<CliResult<Vec<_>>>()?;

    let mut total = 0usize;
    for (record, hits) in records.iter().zip(&sketches) {
        log::debug!("{}: {} bases, {} hits", record.name, record.sequence.len(), hits.len());
        for hit in hits {
            match format {
                OutputFormat::Tsv => writeln!(out, "{}\t{}\t{}", record.name, hit.index, hit.value)?,
                OutputFormat::Json => {
                    serde_json::to_writer(&mut *out, &HitRecord { name: &record.name, hit: *hit })?;
                    out.write_all(b"\n")?;
                }
            }
        }
        total += hits.len();
    }

    out.flush()?;
    log::info!("Wrote {} hits for {} records", total, records.len());
    Ok(())
}
