use std::collections::HashSet;

/// Placeholder for any field no rule populated
pub const MISSING: &str = ".";

/// Element whose open/close delimits one output record
pub const RECORD_TAG: &str = "ClinVarSet";

/// Attributes declared on a single element, in arrival order
///
/// Cleared whenever a new element opens; never shared between elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
    current: Option<usize>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an attribute, overwriting an earlier one with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter().position(|(n, _)| *n == name) {
            Some(idx) => {
                self.entries[idx].1 = value;
                self.current = Some(idx);
            }
            None => {
                self.entries.push((name, value));
                self.current = Some(self.entries.len() - 1);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The most recently stored attribute
    pub fn current(&self) -> Option<(&str, &str)> {
        self.current
            .map(|idx| (self.entries[idx].0.as_str(), self.entries[idx].1.as_str()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current = None;
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Snapshot of the innermost open element handed to the extractor
#[derive(Debug, Clone, Copy)]
pub struct ElementContext<'a> {
    /// Tag name of the current element
    pub name: &'a str,

    /// Tag name of the enclosing element, if any
    pub parent: Option<&'a str>,

    /// Position in the open-element stack (root = 0)
    pub depth: usize,

    /// Attributes seen so far on this element only
    pub attributes: &'a Attributes,
}

impl<'a> ElementContext<'a> {
    pub fn is(&self, name: &str, parent: Option<&str>) -> bool {
        self.name == name && parent.map_or(true, |p| self.parent == Some(p))
    }
}

/// One output line under construction
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRecord {
    pub chromosome: String,
    pub position: String,
    pub reference_allele: String,
    pub alternate_allele: String,
    pub external_id: String,
    pub pathogenicity_calls: Vec<String>,
    pub review_statuses: Vec<String>,
    pub citation_ids: Vec<String>,
    pub preferred_name: Option<String>,
}

impl Default for VariantRecord {
    fn default() -> Self {
        VariantRecord {
            chromosome: MISSING.to_string(),
            position: MISSING.to_string(),
            reference_allele: MISSING.to_string(),
            alternate_allele: MISSING.to_string(),
            external_id: MISSING.to_string(),
            pathogenicity_calls: Vec::new(),
            review_statuses: Vec::new(),
            citation_ids: Vec::new(),
            preferred_name: None,
        }
    }
}

impl VariantRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Citation ids with duplicates removed, first occurrence kept
    pub fn unique_citations(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.citation_ids
            .iter()
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Build the INFO-style annotation string
    pub fn annotation(&self, include_hgvs: bool) -> String {
        let mut info = format!(
            "CLINVAR_PATHOGENICITY={};CLINVAR_REVIEWS={};CLINVAR_PMID={}",
            self.pathogenicity_calls.join("|"),
            self.review_statuses.join("|"),
            self.unique_citations().join("|"),
        );
        if include_hgvs {
            info.push_str(";CLINVAR_HGVS=");
            info.push_str(self.preferred_name.as_deref().unwrap_or(""));
        }
        info
    }

    /// Render the tab-separated output line, without the trailing newline
    pub fn to_line(&self, include_hgvs: bool) -> String {
        [
            self.chromosome.as_str(),
            self.position.as_str(),
            self.external_id.as_str(),
            self.reference_allele.as_str(),
            self.alternate_allele.as_str(),
            MISSING,
            MISSING,
            self.annotation(include_hgvs).as_str(),
        ]
        .join("\t")
    }
}

/// Configuration for the conversion
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Reference assembly whose coordinates are accepted, e.g. "GRCh37"
    pub assembly: String,

    /// Append `CLINVAR_HGVS` to the annotation string
    pub include_hgvs: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            assembly: String::from("GRCh37"),
            include_hgvs: false,
        }
    }
}

/// Counters reported at the end of a conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Records emitted
    pub records: u64,

    /// Elements opened
    pub elements: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_line() {
        let record = VariantRecord::new();
        assert_eq!(
            record.to_line(false),
            ".\t.\t.\t.\t.\t.\t.\tCLINVAR_PATHOGENICITY=;CLINVAR_REVIEWS=;CLINVAR_PMID="
        );
    }

    #[test]
    fn test_citation_dedup_keeps_first_order() {
        let mut record = VariantRecord::new();
        for id in ["1", "2", "1", "3"] {
            record.citation_ids.push(id.to_string());
        }
        assert_eq!(record.unique_citations(), vec!["1", "2", "3"]);
        assert!(record.annotation(false).ends_with("CLINVAR_PMID=1|2|3"));
        // collection keeps duplicates
        assert_eq!(record.citation_ids.len(), 4);
    }

    #[test]
    fn test_hgvs_segment() {
        let mut record = VariantRecord::new();
        assert!(record.annotation(true).ends_with(";CLINVAR_HGVS="));

        record.preferred_name = Some("NM_004333.4:c.1799T%3EA".to_string());
        assert_eq!(
            record.annotation(true),
            "CLINVAR_PATHOGENICITY=;CLINVAR_REVIEWS=;CLINVAR_PMID=;CLINVAR_HGVS=NM_004333.4:c.1799T%3EA"
        );
    }

    #[test]
    fn test_attributes_overwrite_and_current() {
        let mut attrs = Attributes::new();
        attrs.insert("Type", "rs");
        attrs.insert("ID", "1");
        assert_eq!(attrs.current(), Some(("ID", "1")));

        attrs.insert("Type", "dbSNP");
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("Type"), Some("dbSNP"));
        assert_eq!(attrs.current(), Some(("Type", "dbSNP")));

        attrs.clear();
        assert_eq!(attrs.len(), 0);
        assert_eq!(attrs.current(), None);
    }
}
