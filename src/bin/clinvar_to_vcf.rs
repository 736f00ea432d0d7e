//! clinvar-to-vcf: Convert a ClinVar full-release XML file into VCF-like lines
//!
//! Usage:
//!   # GRCh37 coordinates to stdout
//!   clinvar-to-vcf ClinVarFullRelease_2015-09.xml
//!
//!   # GRCh38 coordinates with HGVS names, written to a file
//!   clinvar-to-vcf --assembly GRCh38 --hgvs -o clinvar.vcf ClinVarFullRelease.xml
//!
//! Set RUST_LOG=info for a record count on stderr.

// Use MiMalloc allocator for better performance
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use clinvar_vcf::{convert_file, ConvertConfig};
use std::fs::File;
use std::io::{BufWriter, Write};

#[derive(Parser, Debug)]
#[command(name = "clinvar-to-vcf")]
#[command(about = "Convert ClinVar XML into VCF-like variant records", long_about = None)]
struct Args {
    /// ClinVar XML file
    #[arg(value_name = "FILE")]
    input: String,

    /// Reference assembly whose coordinates are emitted
    #[arg(long, default_value = "GRCh37")]
    assembly: String,

    /// Append CLINVAR_HGVS (preferred name) to the annotation field
    #[arg(long)]
    hgvs: bool,

    /// Output file (stdout if omitted)
    #[arg(long, short = 'o')]
    output: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let config = ConvertConfig {
        assembly: args.assembly,
        include_hgvs: args.hgvs,
    };

    let writer: Box<dyn Write> = if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("Failed to create output: {}", path))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(std::io::stdout().lock()))
    };

    let stats = convert_file(&args.input, writer, config)?;
    log::info!("{}: {} records written", args.input, stats.records);

    Ok(())
}
