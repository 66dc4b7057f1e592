//! Case-insensitive substring search over catalog records.
//!
//! Matching is a plain substring test against each record's searchable
//! fields. There is no ranking: results keep their input order.

use crate::metadata::{AgentMetadata, Metadata, SkillMetadata, WorkflowMetadata};
use crate::record::CatalogRecord;

/// Something with text fields a search query can match.
pub trait Searchable {
    /// Fields checked by [`matches`].
    fn search_fields(&self) -> Vec<&str>;
}

fn base_fields<M: Metadata>(meta: &M) -> Vec<&str> {
    let mut fields = vec![meta.name(), meta.description()];
    fields.extend(meta.category());
    fields
}

impl Searchable for AgentMetadata {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = base_fields(self);
        fields.extend(self.tools());
        fields
    }
}

impl Searchable for SkillMetadata {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = base_fields(self);
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

impl Searchable for WorkflowMetadata {
    fn search_fields(&self) -> Vec<&str> {
        base_fields(self)
    }
}

impl<M: Searchable> Searchable for CatalogRecord<M> {
    fn search_fields(&self) -> Vec<&str> {
        self.metadata.search_fields()
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_fields(&self) -> Vec<&str> {
        (**self).search_fields()
    }
}

/// Whether `query` occurs, ignoring case, in any of `item`'s fields.
///
/// An empty query matches everything.
#[must_use]
pub fn matches<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    contains_folded(item, &needle)
}

fn contains_folded<T: Searchable + ?Sized>(item: &T, needle: &str) -> bool {
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// The records matching `query`, in their original order.
#[must_use]
pub fn filter<'a, T: Searchable>(records: &'a [T], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| contains_folded(*record, &needle))
        .collect()
}
