use base64::{engine::general_purpose::STANDARD as B64, Engine};
use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::HashSet;

/// One proxy configuration line.
///
/// Never empty, never carries surrounding whitespace. Two entries are the
/// same entry iff their strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Entry(String);

impl Entry {
    /// Trim `line` and wrap it, or `None` if nothing is left
    #[must_use]
    pub fn new(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The entry text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Entry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Entry {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<Entry> for String {
    fn from(entry: Entry) -> Self {
        entry.0
    }
}

/// Ordered, duplicate-free collection of entries.
///
/// Insertion order is first appearance; later duplicates are dropped.
#[derive(Debug, Clone, Default)]
pub struct MergedEntrySet {
    entries: Vec<Entry>,
    seen: HashSet<Entry>,
}

impl MergedEntrySet {
    /// Create an empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` unless already present. Returns true if it was added.
    pub fn insert(&mut self, entry: Entry) -> bool {
        if self.seen.contains(entry.as_str()) {
            return false;
        }
        self.seen.insert(entry.clone());
        self.entries.push(entry);
        true
    }

    /// Merge a whole source in order. Returns how many entries were new.
    pub fn merge<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = Entry>,
    {
        entries
            .into_iter()
            .map(|entry| self.insert(entry))
            .filter(|added| *added)
            .count()
    }

    /// Returns true if `line` is already in the set
    #[must_use]
    pub fn contains(&self, line: &str) -> bool {
        self.seen.contains(line)
    }

    /// Number of unique entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been merged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in merge order
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// All entries joined by `\n`
    #[must_use]
    pub fn joined(&self) -> String {
        self.entries
            .iter()
            .map(Entry::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Encode into the final feed. An empty set encodes to `""`.
    #[must_use]
    pub fn encode(&self) -> EncodedFeed {
        if self.is_empty() {
            return EncodedFeed::default();
        }
        EncodedFeed(B64.encode(self.joined().as_bytes()))
    }
}

impl FromIterator<Entry> for MergedEntrySet {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut set = Self::new();
        set.merge(iter);
        set
    }
}

impl<'a> IntoIterator for &'a MergedEntrySet {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for MergedEntrySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}

/// Final base64 feed handed to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EncodedFeed(String);

impl EncodedFeed {
    /// The encoded text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the feed produced from zero entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the encoded string
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Decode back to the newline-joined entry text
    #[must_use]
    pub fn decode_text(&self) -> Option<String> {
        if self.is_empty() {
            return Some(String::new());
        }
        let bytes = B64.decode(self.0.as_bytes()).ok()?;
        String::from_utf8(bytes).ok()
    }
}

impl std::fmt::Display for EncodedFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EncodedFeed> for String {
    fn from(feed: EncodedFeed) -> Self {
        feed.0
    }
}
