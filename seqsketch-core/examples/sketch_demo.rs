//! seqsketch demo
//!
//! Encodes a few k-mers and runs every sketch engine over a short sequence.

use seqsketch_core::{
    KmerCode, MinimizerSketch, Sequence, Sketch, SketchFactory, SketchMethod, SketchParams,
    SyncmerSketch,
};

fn main() {
    println!("seqsketch demo");
    println!("==============\n");

    let seq = b"GGCAAGTTCGTCAATGGCCAAGTTACGTAGCTAGGATCCGTTACA";
    println!("Sequence: {}\n", std::str::from_utf8(seq).unwrap());

    demo_codec();
    demo_minimizers(seq);
    demo_syncmers(seq);
    demo_factory(seq);
}

fn demo_codec() {
    println!("K-mer codec");
    println!("-----------");
    for kmer in [&b"ACGT"[..], b"GGCAA", b"TTTTT", b"ACNGT"] {
        match KmerCode::from_bytes(kmer) {
            Ok(code) => println!(
                "  {:<6} code={:<6} revcomp={} canonical={}",
                code,
                code.code(),
                code.rev_comp(),
                code.canonical()
            ),
            Err(e) => println!("  {:<6} error: {}", String::from_utf8_lossy(kmer), e),
        }
    }
    println!();
}

fn demo_minimizers(seq: &[u8]) {
    println!("Minimizers (k=5, w=3)");
    println!("---------------------");
    match MinimizerSketch::new(seq, 5, 3, false) {
        Ok(sketch) => {
            for hit in sketch {
                println!(
                    "  {:>3} {} {:#018x}",
                    hit.index,
                    String::from_utf8_lossy(&seq[hit.index..hit.index + 5]),
                    hit.value
                );
            }
        }
        Err(e) => println!("Error: {}", e),
    }
    println!();
}

fn demo_syncmers(seq: &[u8]) {
    println!("Closed syncmers (k=9, s=3)");
    println!("--------------------------");
    match SyncmerSketch::new(seq, 9, 3, false) {
        Ok(mut sketch) => {
            while let Some(hit) = sketch.next() {
                println!("  {:>3} {:#018x}", sketch.index(), hit.value);
            }
        }
        Err(e) => println!("Error: {}", e),
    }
    println!();
}

fn demo_factory(seq: &[u8]) {
    let sequence = Sequence::dna(seq.to_vec());
    let methods = [
        SketchMethod::Minimizer { w: 5 },
        SketchMethod::Syncmer { s: 4 },
        SketchMethod::ProteinMinimizer { w: 3, frame: 1 },
    ];

    println!("Factory");
    println!("-------");
    for method in methods {
        let params = SketchParams {
            k: if matches!(method, SketchMethod::ProteinMinimizer { .. }) { 3 } else { 11 },
            method,
            circular: true,
        };
        match SketchFactory::create(&sequence, &params) {
            Ok(sketch) => {
                let name = sketch.name();
                println!("  {:<18} {} hits", name, sketch.count());
            }
            Err(e) => println!("  error: {}", e),
        }
    }
}
