//! Nesting-aware event walker
//!
//! Turns a flat sequence of open/attribute/text/close events into calls that
//! carry the current element, its parent and its own attributes. The walker
//! knows only the record boundary tag; what the elements mean is up to the
//! handler.

use crate::convert::types::{Attributes, ElementContext, RECORD_TAG};
use crate::error::{ConvertError, Result};

/// Receiver of walker callbacks
pub trait ExtractorHandler {
    /// A record boundary opened; `ctx` is the boundary element itself
    fn begin_record(&mut self, ctx: &ElementContext<'_>) -> Result<()>;

    /// An attribute arrived on the current element
    fn on_attribute(&mut self, ctx: &ElementContext<'_>, name: &str, value: &str) -> Result<()>;

    /// Text arrived inside the current element
    fn on_text(&mut self, ctx: &ElementContext<'_>, text: &str) -> Result<()>;

    /// The open record boundary is closing
    fn end_record(&mut self) -> Result<()>;
}

#[derive(Debug)]
struct Frame {
    name: String,
    attributes: Attributes,
}

/// Owns the open-element stack and forwards filtered events to a handler
pub struct StreamingWalker<H> {
    stack: Vec<Frame>,
    handler: H,
    elements_opened: u64,
}

impl<H: ExtractorHandler> StreamingWalker<H> {
    pub fn new(handler: H) -> Self {
        StreamingWalker {
            stack: Vec::new(),
            handler,
            elements_opened: 0,
        }
    }

    /// Number of elements opened so far
    pub fn elements_opened(&self) -> u64 {
        self.elements_opened
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn on_element_open(&mut self, name: &str) -> Result<()> {
        self.stack.push(Frame {
            name: name.to_string(),
            attributes: Attributes::new(),
        });
        self.elements_opened += 1;

        if name == RECORD_TAG {
            if let Some(ctx) = context_of(&self.stack) {
                self.handler.begin_record(&ctx)?;
            }
        }
        Ok(())
    }

    pub fn on_attribute(&mut self, name: &str, value: &str) -> Result<()> {
        let Some(frame) = self.stack.last_mut() else {
            return Err(ConvertError::AttributeOutsideElement {
                name: name.to_string(),
            });
        };
        frame.attributes.insert(name, value);

        if let Some(ctx) = context_of(&self.stack) {
            self.handler.on_attribute(&ctx, name, value)?;
        }
        Ok(())
    }

    /// Text outside any element is dropped
    pub fn on_text(&mut self, text: &str) -> Result<()> {
        match context_of(&self.stack) {
            Some(ctx) => self.handler.on_text(&ctx, text),
            None => Ok(()),
        }
    }

    pub fn on_element_close(&mut self, name: &str) -> Result<()> {
        match self.stack.last() {
            Some(top) if top.name == name => {}
            Some(top) => {
                return Err(ConvertError::UnbalancedClose {
                    expected: top.name.clone(),
                    found: name.to_string(),
                })
            }
            None => {
                return Err(ConvertError::UnbalancedClose {
                    expected: String::new(),
                    found: name.to_string(),
                })
            }
        }

        if name == RECORD_TAG {
            self.handler.end_record()?;
        }
        self.stack.pop();
        Ok(())
    }

    /// End of input; every element must have been closed
    pub fn finish(self) -> Result<H> {
        if !self.stack.is_empty() {
            return Err(ConvertError::UnclosedElements {
                open: self.stack.len(),
            });
        }
        Ok(self.handler)
    }
}

fn context_of(stack: &[Frame]) -> Option<ElementContext<'_>> {
    let (current, ancestors) = stack.split_last()?;
    Some(ElementContext {
        name: &current.name,
        parent: ancestors.last().map(|f| f.name.as_str()),
        depth: ancestors.len(),
        attributes: &current.attributes,
    })
}
