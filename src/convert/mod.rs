//! ClinVar XML to VCF conversion
//!
//! This module holds the single-pass extraction pipeline: an XML event
//! source feeds a nesting-aware walker, which drives a record extractor that
//! writes one tab-separated line per `ClinVarSet`.
//!
//! Memory use is bounded by nesting depth plus one in-progress record,
//! regardless of input size.

pub mod types;
pub mod escape;
pub mod rules;
pub mod walker;
pub mod extractor;
pub mod writer;
pub mod source;

pub use types::{Attributes, ConvertConfig, ConvertStats, ElementContext, VariantRecord, MISSING, RECORD_TAG};
pub use rules::{AttributeRule, AttributeTarget, SiblingCheck, TextRule, TextTarget, ATTRIBUTE_RULES, TEXT_RULES};
pub use walker::{ExtractorHandler, StreamingWalker};
pub use extractor::RecordExtractor;
pub use writer::VcfWriter;
pub use source::XmlEventSource;
