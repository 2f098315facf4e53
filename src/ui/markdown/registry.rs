use crate::ui::span::CodeBlockId;
use std::collections::BTreeMap;
use tracing::debug;

/// Raw contents of one extracted code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlockRecord {
    id: CodeBlockId,
    raw_text: String,
    language: Option<String>,
}

impl CodeBlockRecord {
    pub fn new(id: CodeBlockId, raw_text: impl Into<String>, language: Option<String>) -> Self {
        Self {
            id,
            raw_text: raw_text.into(),
            language: language.filter(|lang| !lang.is_empty()),
        }
    }

    pub fn id(&self) -> CodeBlockId {
        self.id
    }

    /// Body exactly as written between the fences.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Language tag from the opening fence, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

/// Code blocks of a single rendered document, keyed by id. Not shared
/// between messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBlockRegistry {
    records: BTreeMap<CodeBlockId, CodeBlockRecord>,
}

impl CodeBlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = CodeBlockRecord>) -> Self {
        let mut registry = Self::new();
        for record in records {
            registry.insert(record);
        }
        registry
    }

    pub(crate) fn insert(&mut self, record: CodeBlockRecord) {
        self.records.insert(record.id, record);
    }

    pub fn lookup(&self, id: CodeBlockId) -> Option<&CodeBlockRecord> {
        self.records.get(&id)
    }

    /// Raw text for a copy action on the widget with this id.
    pub fn copy_text(&self, id: CodeBlockId) -> Option<&str> {
        self.lookup(id).map(CodeBlockRecord::raw_text)
    }

    /// Records in id order.
    pub fn all(&self) -> impl ExactSizeIterator<Item = &CodeBlockRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        debug!(count = self.records.len(), "Clearing code block registry");
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CodeBlockRegistry {
        CodeBlockRegistry::from_records([
            CodeBlockRecord::new(CodeBlockId::new(1), "print(1)", Some("python".into())),
            CodeBlockRecord::new(CodeBlockId::new(0), "fn main() {}", Some("rust".into())),
        ])
    }

    #[test]
    fn lookup_by_id() {
        let registry = sample();
        let record = registry.lookup(CodeBlockId::new(1)).expect("record present");
        assert_eq!(record.raw_text(), "print(1)");
        assert_eq!(record.language(), Some("python"));
        assert_eq!(registry.copy_text(CodeBlockId::new(0)), Some("fn main() {}"));
    }

    #[test]
    fn unknown_ids_are_absent() {
        let registry = sample();
        assert!(registry.lookup(CodeBlockId::new(7)).is_none());
        assert!(registry.copy_text(CodeBlockId::new(7)).is_none());
    }

    #[test]
    fn all_iterates_in_id_order() {
        let registry = sample();
        let ids: Vec<usize> = registry.all().map(|r| r.id().get()).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(registry.all().len(), 2);
    }

    #[test]
    fn clear_removes_everything() {
        let mut registry = sample();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.lookup(CodeBlockId::new(0)).is_none());
    }

    #[test]
    fn empty_language_tags_are_dropped() {
        let record = CodeBlockRecord::new(CodeBlockId::new(0), "x", Some(String::new()));
        assert_eq!(record.language(), None);
    }
}
