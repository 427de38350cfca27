use std::collections::{BTreeSet, HashMap};

use super::syntax::{Entry, Resource};

/// Anything that can resolve an index key (`id` or `-id`) to an entry.
///
/// Implemented by [`EntryIndex`] for tooling and by
/// [`Bundle`](crate::core::Bundle) at runtime.
pub trait EntryLookup {
    fn lookup(&self, key: &str) -> Option<&Entry>;
}

/// Id → entry lookup over one [`Resource`].
///
/// Messages are keyed by their id, terms by `-id`, so the two namespaces
/// never collide. When an id is defined twice the later entry wins.
#[derive(Debug, Default)]
pub struct EntryIndex<'r> {
    entries: HashMap<String, &'r Entry>,
}

impl<'r> EntryIndex<'r> {
    pub fn new(resource: &'r Resource) -> Self {
        let entries = resource
            .body
            .iter()
            .map(|entry| (entry.index_key(), entry))
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&'r Entry> {
        self.entries.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All index keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &'r Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), *entry))
    }

    /// Expected keys that did not make it into the index, sorted.
    ///
    /// The parser drops malformed entries silently; diffing against the keys
    /// a caller expects is how those gaps are detected.
    pub fn missing_keys<'k>(&self, expected: impl IntoIterator<Item = &'k str>) -> Vec<String> {
        expected
            .into_iter()
            .filter(|key| !self.entries.contains_key(*key))
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl EntryLookup for EntryIndex<'_> {
    fn lookup(&self, key: &str) -> Option<&Entry> {
        self.get(key)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::syntax::parse;

    #[test]
    fn test_terms_are_prefixed() {
        let resource = parse("brand = Message\n-brand = Term\n");
        let index = EntryIndex::new(&resource);

        assert_eq!(index.keys(), vec!["-brand", "brand"]);
        assert!(!index.get("brand").unwrap().is_term());
        assert!(index.get("-brand").unwrap().is_term());
    }

    #[test]
    fn test_later_duplicate_wins() {
        let resource = parse("a = first\na = second\n");
        let index = EntryIndex::new(&resource);

        assert_eq!(index.len(), 1);
        let value = index.get("a").unwrap().value().unwrap();
        assert_eq!(crate::core::syntax::serialize_pattern(value), "second");
    }

    #[test]
    fn test_missing_keys_reports_dropped_entries() {
        let resource = parse("ok = fine\nbroken = { $x\nalso = fine\n");
        let index = EntryIndex::new(&resource);

        assert_eq!(
            index.missing_keys(["ok", "broken", "also", "broken"]),
            vec!["broken".to_string()]
        );
    }
}
