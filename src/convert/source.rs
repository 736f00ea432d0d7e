//! quick-xml adapter
//!
//! Pulls events from a forward-only reader and pushes them into a
//! `StreamingWalker`. One event buffer is reused for the whole document.

use crate::convert::walker::{ExtractorHandler, StreamingWalker};
use crate::error::{ConvertError, Result};
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Streaming XML event source
pub struct XmlEventSource<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> XmlEventSource<R> {
    pub fn new(input: R) -> Self {
        let mut reader = Reader::from_reader(input);
        reader.trim_text(true);
        XmlEventSource {
            reader,
            buf: Vec::new(),
        }
    }

    /// Feed every event to the walker until end of input
    pub fn drive<H: ExtractorHandler>(&mut self, walker: &mut StreamingWalker<H>) -> Result<()> {
        let decoder = self.reader.decoder();
        loop {
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(source) => {
                    return Err(ConvertError::Xml {
                        position: self.reader.buffer_position(),
                        source,
                    })
                }
            };
            let position = self.reader.buffer_position();

            let more = dispatch(event, decoder, walker).map_err(|e| match e {
                ConvertError::Xml { source, .. } => ConvertError::Xml { position, source },
                other => other,
            })?;
            self.buf.clear();

            if !more {
                return Ok(());
            }
        }
    }
}

/// Returns false once the input is exhausted
fn dispatch<H: ExtractorHandler>(
    event: Event<'_>,
    decoder: Decoder,
    walker: &mut StreamingWalker<H>,
) -> Result<bool> {
    match event {
        Event::Start(e) => {
            open_with_attributes(&e, decoder, walker)?;
        }
        Event::Empty(e) => {
            let name = open_with_attributes(&e, decoder, walker)?;
            walker.on_element_close(&name)?;
        }
        Event::End(e) => {
            let qname = e.name();
            let name = decoder.decode(qname.as_ref()).map_err(xml)?;
            walker.on_element_close(&name)?;
        }
        Event::Text(e) => {
            let text = e.unescape().map_err(xml)?;
            walker.on_text(&text)?;
        }
        Event::CData(e) => {
            let text = decoder.decode(&e).map_err(xml)?;
            walker.on_text(&text)?;
        }
        Event::Eof => return Ok(false),
        // Declarations, comments, processing instructions, doctype
        _ => {}
    }
    Ok(true)
}

fn open_with_attributes<H: ExtractorHandler>(
    e: &BytesStart<'_>,
    decoder: Decoder,
    walker: &mut StreamingWalker<H>,
) -> Result<String> {
    let name = decoder.decode(e.name().as_ref()).map_err(xml)?.into_owned();
    walker.on_element_open(&name)?;

    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml(err.into()))?;
        let key = decoder.decode(attr.key.as_ref()).map_err(xml)?;
        let value = attr.unescape_value().map_err(xml)?;
        walker.on_attribute(&key, &value)?;
    }
    Ok(name)
}

// Position is filled in by the caller
fn xml(source: quick_xml::Error) -> ConvertError {
    ConvertError::Xml {
        position: 0,
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::types::ElementContext;

    #[derive(Default)]
    struct Trace {
        events: Vec<String>,
    }

    impl ExtractorHandler for Trace {
        fn begin_record(&mut self, _ctx: &ElementContext<'_>) -> Result<()> {
            self.events.push("begin".to_string());
            Ok(())
        }

        fn on_attribute(&mut self, ctx: &ElementContext<'_>, name: &str, value: &str) -> Result<()> {
            self.events.push(format!("@{}.{}={}", ctx.name, name, value));
            Ok(())
        }

        fn on_text(&mut self, ctx: &ElementContext<'_>, text: &str) -> Result<()> {
            self.events.push(format!("{}:{}", ctx.name, text));
            Ok(())
        }

        fn end_record(&mut self) -> Result<()> {
            self.events.push("end".to_string());
            Ok(())
        }
    }

    fn run(xml: &str) -> Result<Vec<String>> {
        let mut walker = StreamingWalker::new(Trace::default());
        XmlEventSource::new(xml.as_bytes()).drive(&mut walker)?;
        Ok(walker.finish()?.events)
    }

    #[test]
    fn test_events_in_document_order() {
        let events = run(
            r#"<?xml version="1.0"?>
<ReleaseSet>
  <!-- comment -->
  <ClinVarSet ID="1">
    <Title>c.1799T&gt;A</Title>
    <XRef Type="rs" ID="113488022"/>
    <Note><![CDATA[raw <text>]]></Note>
  </ClinVarSet>
</ReleaseSet>"#,
        )
        .unwrap();

        assert_eq!(
            events,
            vec![
                "begin",
                "@ClinVarSet.ID=1",
                "Title:c.1799T>A",
                "@XRef.Type=rs",
                "@XRef.ID=113488022",
                "Note:raw <text>",
                "end",
            ]
        );
    }

    #[test]
    fn test_empty_record_element() {
        let events = run("<Root><ClinVarSet/></Root>").unwrap();
        assert_eq!(events, vec!["begin", "end"]);
    }

    #[test]
    fn test_mismatched_end_tag_is_fatal() {
        // the reader checks end names before the walker sees the close
        let err = run("<Root><ClinVarSet></Root>").unwrap_err();
        match err {
            ConvertError::Xml {
                position,
                source: quick_xml::Error::EndEventMismatch { expected, found },
            } => {
                assert_eq!(expected, "ClinVarSet");
                assert_eq!(found, "Root");
                assert!(position > 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_truncated_input_is_fatal() {
        let err = run("<Root><ClinVarSet>").unwrap_err();
        assert!(matches!(err, ConvertError::UnclosedElements { open: 2 }));
    }

    #[test]
    fn test_start_and_end_tags_round_trip_names() {
        let events = run(r#"<a:Root x="1"><Inner>t</Inner></a:Root>"#).unwrap();
        assert_eq!(events, vec!["@a:Root.x=1", "Inner:t"]);
    }
}
