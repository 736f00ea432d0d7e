//! Field-matching rules
//!
//! Which (element, parent, attribute) combinations populate which
//! `VariantRecord` fields. The tables are static so the whole policy can be
//! read in one place; the extractor only looks rules up and applies them.

use crate::convert::types::ElementContext;

/// Record field set from an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeTarget {
    Chromosome,
    Position,
    ReferenceAllele,
    AlternateAllele,
    /// Stored as `rs` + value
    ExternalId,
}

/// Condition on another attribute of the same element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingCheck {
    /// `Assembly` must equal the configured reference assembly
    TargetAssembly,
    /// A named attribute must hold a fixed value
    Equals {
        attribute: &'static str,
        value: &'static str,
    },
}

/// Rule fired by an attribute event
#[derive(Debug, Clone, Copy)]
pub struct AttributeRule {
    pub element: &'static str,
    pub parent: Option<&'static str>,
    pub attribute: &'static str,
    pub sibling: SiblingCheck,
    pub target: AttributeTarget,
}

/// Record field fed by a text event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    /// HTML-unescaped, truncated at ` AND `, URL-escaped; last write wins
    PreferredName,
    /// Appended verbatim
    PathogenicityCall,
    /// URL-escaped, appended
    ReviewStatus,
    /// Appended verbatim, deduplicated on output
    CitationId,
}

/// Rule fired by a text event
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    pub element: &'static str,
    pub parent: Option<&'static str>,
    /// Required value of the element's most recent attribute
    pub current_attribute: Option<(&'static str, &'static str)>,
    pub target: TextTarget,
}

pub const ASSEMBLY_ATTRIBUTE: &str = "Assembly";
pub const EXTERNAL_ID_PREFIX: &str = "rs";
pub const TITLE_DELIMITER: &str = " AND ";

const fn coordinate(attribute: &'static str, target: AttributeTarget) -> AttributeRule {
    AttributeRule {
        element: "SequenceLocation",
        parent: Some("Measure"),
        attribute,
        sibling: SiblingCheck::TargetAssembly,
        target,
    }
}

pub static ATTRIBUTE_RULES: &[AttributeRule] = &[
    coordinate("Chr", AttributeTarget::Chromosome),
    coordinate("start", AttributeTarget::Position),
    coordinate("referenceAllele", AttributeTarget::ReferenceAllele),
    coordinate("alternateAllele", AttributeTarget::AlternateAllele),
    AttributeRule {
        element: "XRef",
        parent: None,
        attribute: "ID",
        sibling: SiblingCheck::Equals {
            attribute: "Type",
            value: "rs",
        },
        target: AttributeTarget::ExternalId,
    },
];

// Evaluated in order; the first match wins.
pub static TEXT_RULES: &[TextRule] = &[
    TextRule {
        element: "Title",
        parent: None,
        current_attribute: None,
        target: TextTarget::PreferredName,
    },
    TextRule {
        element: "Description",
        parent: Some("ClinicalSignificance"),
        current_attribute: None,
        target: TextTarget::PathogenicityCall,
    },
    TextRule {
        element: "ReviewStatus",
        parent: Some("ClinicalSignificance"),
        current_attribute: None,
        target: TextTarget::ReviewStatus,
    },
    TextRule {
        element: "ID",
        parent: None,
        current_attribute: Some(("Source", "PubMed")),
        target: TextTarget::CitationId,
    },
];

impl AttributeRule {
    /// `attribute` is the one that just fired; `ctx.attributes` already holds it
    pub fn matches(&self, ctx: &ElementContext<'_>, attribute: &str, assembly: &str) -> bool {
        if attribute != self.attribute || !ctx.is(self.element, self.parent) {
            return false;
        }
        match self.sibling {
            SiblingCheck::TargetAssembly => ctx.attributes.get(ASSEMBLY_ATTRIBUTE) == Some(assembly),
            SiblingCheck::Equals { attribute: sibling, value } => ctx.attributes.get(sibling) == Some(value),
        }
    }
}

impl TextRule {
    pub fn matches(&self, ctx: &ElementContext<'_>) -> bool {
        if !ctx.is(self.element, self.parent) {
            return false;
        }
        match self.current_attribute {
            Some(required) => ctx.attributes.current() == Some(required),
            None => true,
        }
    }
}

/// First attribute rule matching this event
pub fn attribute_target(
    ctx: &ElementContext<'_>,
    attribute: &str,
    assembly: &str,
) -> Option<AttributeTarget> {
    ATTRIBUTE_RULES
        .iter()
        .find(|rule| rule.matches(ctx, attribute, assembly))
        .map(|rule| rule.target)
}

/// First text rule matching this event
pub fn text_target(ctx: &ElementContext<'_>) -> Option<TextTarget> {
    TEXT_RULES
        .iter()
        .find(|rule| rule.matches(ctx))
        .map(|rule| rule.target)
}
