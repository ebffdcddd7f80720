use std::collections::BTreeSet;

/// Field and metadata names of the document corpus schema.
///
/// `FieldSet::default()` recognizes exactly these.
pub const CORPUS_FIELDS: &[&str] = &[
    "heading",
    "article",
    "clause",
    "section",
    "defined_term",
    "template",
    "vintage",
    "market",
    "doc_type",
    "admin_agent",
    "facility_size_mm",
];

/// The closed set of field names a query may reference.
///
/// Field names in queries are matched case-insensitively and resolved to the
/// registered spelling. A name outside the set is a parse error, never a
/// silent no-match. The set is injectable so a deployment with a different
/// corpus schema can supply its own names at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    names: BTreeSet<String>,
}

impl FieldSet {
    /// Build a field set from arbitrary names. Names are stored lowercased.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Resolve a query-supplied name to its registered spelling.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let lower = name.to_ascii_lowercase();
        self.names.get(&lower).map(String::as_str)
    }

    /// Whether the set recognizes `name` (case-insensitive).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// The number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over the registered names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::new(CORPUS_FIELDS.iter().copied())
    }
}
