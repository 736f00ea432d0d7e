//! # clinvar-vcf - ClinVar XML to VCF converter
//!
//! Streams a ClinVar full-release XML document and emits one VCF-like,
//! tab-separated line per `ClinVarSet` record, without ever building a
//! document tree.
//!
//! Each line carries chromosome, position, dbSNP id, reference and alternate
//! alleles for the configured assembly, followed by an annotation string
//! with pathogenicity calls, review statuses and PubMed ids.
//!
//! ## Quick Start
//!
//! ```rust
//! use clinvar_vcf::{convert, ConvertConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let xml = r#"<ReleaseSet><ClinVarSet>
//!   <Measure>
//!     <SequenceLocation Assembly="GRCh37" Chr="7" start="140453136"
//!                       referenceAllele="A" alternateAllele="T"/>
//!   </Measure>
//! </ClinVarSet></ReleaseSet>"#;
//!
//! let mut out = Vec::new();
//! let stats = convert(xml.as_bytes(), &mut out, ConvertConfig::default())?;
//!
//! assert_eq!(stats.records, 1);
//! assert!(String::from_utf8(out)?.starts_with("7\t140453136\t.\tA\tT"));
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

pub mod convert;
pub mod error;

// Re-export commonly used types for convenience
pub use convert::{ConvertConfig, ConvertStats, RecordExtractor, StreamingWalker, VariantRecord, VcfWriter, XmlEventSource};
pub use error::ConvertError;

/// Main entry point: convert a ClinVar XML stream into VCF-like lines
pub fn convert<R: BufRead, W: Write>(reader: R, writer: W, config: ConvertConfig) -> Result<ConvertStats> {
    log::debug!("Converting ClinVar XML for assembly {}", config.assembly);

    let extractor = RecordExtractor::new(config, writer);
    let mut walker = StreamingWalker::new(extractor);

    XmlEventSource::new(reader)
        .drive(&mut walker)
        .context("Failed to convert ClinVar XML")?;

    let elements = walker.elements_opened();
    let extractor = walker.finish().context("Incomplete ClinVar XML")?;
    let records = extractor.records_emitted();
    extractor.into_writer().context("Failed to flush output")?;

    log::info!("Converted {} records ({} elements)", records, elements);
    Ok(ConvertStats { records, elements })
}

/// Convert the XML document at `path`
///
/// Nothing is written if the file cannot be opened.
pub fn convert_file<P: AsRef<Path>, W: Write>(path: P, writer: W, config: ConvertConfig) -> Result<ConvertStats> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open input: {}", path.display()))?;
    convert(BufReader::new(file), writer, config)
        .with_context(|| format!("Failed to process {}", path.display()))
}
