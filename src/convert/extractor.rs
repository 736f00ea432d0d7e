use crate::convert::escape::uri_escape;
use crate::convert::rules::{self, AttributeTarget, TextTarget, EXTERNAL_ID_PREFIX, TITLE_DELIMITER};
use crate::convert::types::{ConvertConfig, ElementContext, VariantRecord};
use crate::convert::walker::ExtractorHandler;
use crate::convert::writer::VcfWriter;
use crate::error::{ConvertError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;

static TITLE_TAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("{}.*", regex::escape(TITLE_DELIMITER))).unwrap()
});

/// Whether a record is in progress
#[derive(Debug)]
enum State {
    Idle,
    Accumulating(VariantRecord),
}

/// Applies the field rules to walker events and emits one line per record
pub struct RecordExtractor<W: Write> {
    config: ConvertConfig,
    state: State,
    writer: VcfWriter<W>,
    records_emitted: u64,
}

impl<W: Write> RecordExtractor<W> {
    pub fn new(config: ConvertConfig, writer: W) -> Self {
        let writer = VcfWriter::new(writer, config.include_hgvs);
        RecordExtractor {
            config,
            state: State::Idle,
            writer,
            records_emitted: 0,
        }
    }

    pub fn is_accumulating(&self) -> bool {
        matches!(self.state, State::Accumulating(_))
    }

    pub fn records_emitted(&self) -> u64 {
        self.records_emitted
    }

    /// The record in progress, if any
    pub fn current(&self) -> Option<&VariantRecord> {
        match &self.state {
            State::Accumulating(record) => Some(record),
            State::Idle => None,
        }
    }

    /// Flush and hand back the output sink
    pub fn into_writer(self) -> Result<W> {
        self.writer.into_inner()
    }

    fn record_mut(&mut self) -> Option<&mut VariantRecord> {
        match &mut self.state {
            State::Accumulating(record) => Some(record),
            State::Idle => None,
        }
    }
}

impl<W: Write> ExtractorHandler for RecordExtractor<W> {
    fn begin_record(&mut self, ctx: &ElementContext<'_>) -> Result<()> {
        if self.is_accumulating() {
            return Err(ConvertError::NestedRecord { depth: ctx.depth });
        }
        self.state = State::Accumulating(VariantRecord::new());
        Ok(())
    }

    fn on_attribute(&mut self, ctx: &ElementContext<'_>, name: &str, value: &str) -> Result<()> {
        let Some(target) = rules::attribute_target(ctx, name, &self.config.assembly) else {
            return Ok(());
        };
        // Matching elements outside a record have nowhere to go
        let Some(record) = self.record_mut() else {
            return Ok(());
        };

        match target {
            AttributeTarget::Chromosome => record.chromosome = value.to_string(),
            AttributeTarget::Position => record.position = value.to_string(),
            AttributeTarget::ReferenceAllele => record.reference_allele = value.to_string(),
            AttributeTarget::AlternateAllele => record.alternate_allele = value.to_string(),
            AttributeTarget::ExternalId => {
                record.external_id = format!("{}{}", EXTERNAL_ID_PREFIX, value)
            }
        }
        Ok(())
    }

    fn on_text(&mut self, ctx: &ElementContext<'_>, text: &str) -> Result<()> {
        let Some(target) = rules::text_target(ctx) else {
            return Ok(());
        };
        let Some(record) = self.record_mut() else {
            return Ok(());
        };

        match target {
            TextTarget::PreferredName => record.preferred_name = Some(preferred_name(text)),
            TextTarget::PathogenicityCall => record.pathogenicity_calls.push(text.to_string()),
            TextTarget::ReviewStatus => record.review_statuses.push(uri_escape(text)),
            TextTarget::CitationId => record.citation_ids.push(text.to_string()),
        }
        Ok(())
    }

    fn end_record(&mut self) -> Result<()> {
        let State::Accumulating(record) = std::mem::replace(&mut self.state, State::Idle) else {
            return Err(ConvertError::EndWithoutRecord);
        };

        self.writer.write_record(&record)?;
        self.records_emitted += 1;
        log::trace!(
            "record {}: {}:{} {}",
            self.records_emitted,
            record.chromosome,
            record.position,
            record.external_id
        );
        Ok(())
    }
}

/// Title text -> HTML-unescaped, cut at the delimiter, URL-escaped
fn preferred_name(text: &str) -> String {
    let unescaped = match quick_xml::escape::unescape(text) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("Keeping raw title text, unescape failed: {}", e);
            text.into()
        }
    };
    let truncated = TITLE_TAIL_REGEX.replace(&unescaped, "");
    uri_escape(&truncated)
}
