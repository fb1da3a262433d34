//! Ordered tag storage with derived indexes.
//!
//! Tags live in an arena and are addressed by stable [`TagId`] handles.
//! Insertion order is kept in a separate handle list, and two indexes map
//! keys to handle lists:
//!
//!   - **by name**: the tag name after alias resolution
//!     (`property-read` / `property-write` → `property`), so the three
//!     property variants share one bucket while still reporting their own
//!     literal keyword.
//!   - **by annotation**: each free-form annotation label, with tags that
//!     carry no label filed under [`AnnotationKey::Unlabeled`].
//!
//! Both indexes are updated on every insertion and removal, so they
//! always agree with the insertion-ordered sequence.
//!
//! # Submodules
//!
//! - [`merge`]: conflict-checked bulk insertion.

mod merge;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, trace};
use ustr::{Ustr, ustr};

use crate::tags::{PROPERTY, PROPERTY_READ, PROPERTY_WRITE, Tag, TagKind};

pub use merge::MergeOutcome;

// ─── Aliases ────────────────────────────────────────────────────────────────

/// Name equivalences applied whenever a tag name is used as an index key.
pub const TAG_ALIASES: &[(&str, &str)] = &[(PROPERTY_READ, PROPERTY), (PROPERTY_WRITE, PROPERTY)];

/// Resolve a tag name through [`TAG_ALIASES`].
///
/// Names without an alias are returned unchanged.
pub fn de_alias(name: &str) -> &str {
    TAG_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, target)| *target)
        .unwrap_or(name)
}

// ─── Handles & keys ─────────────────────────────────────────────────────────

/// Stable handle of a tag inside one [`TagsCollection`].
///
/// Handles are never reused, not even after the tag is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(u32);

/// Key of the by-annotation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKey {
    /// Bucket for tags without any annotation label.
    Unlabeled,
    Label(Ustr),
}

impl AnnotationKey {
    /// Key for a user label. The label `0` shares the unlabeled bucket.
    pub fn for_label(label: &str) -> Self {
        if label == "0" {
            AnnotationKey::Unlabeled
        } else {
            AnnotationKey::Label(ustr(label))
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            AnnotationKey::Unlabeled => None,
            AnnotationKey::Label(label) => Some(label.as_str()),
        }
    }
}

impl fmt::Display for AnnotationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationKey::Unlabeled => f.write_str("0"),
            AnnotationKey::Label(label) => f.write_str(label),
        }
    }
}

/// Insertion-ordered multimap from key to handles.
#[derive(Debug, Clone)]
struct Index<K> {
    positions: HashMap<K, usize>,
    buckets: Vec<(K, Vec<TagId>)>,
}

impl<K> Default for Index<K> {
    fn default() -> Self {
        Self {
            positions: HashMap::new(),
            buckets: Vec::new(),
        }
    }
}

impl<K: Copy + Eq + Hash> Index<K> {
    fn push(&mut self, key: K, id: TagId) {
        match self.positions.get(&key) {
            Some(&pos) => self.buckets[pos].1.push(id),
            None => {
                self.positions.insert(key, self.buckets.len());
                self.buckets.push((key, vec![id]));
            }
        }
    }

    fn get(&self, key: &K) -> &[TagId] {
        self.positions
            .get(key)
            .map(|&pos| self.buckets[pos].1.as_slice())
            .unwrap_or(&[])
    }

    /// Drop `id` from the bucket of `key`. An emptied bucket is dropped
    /// too, so a key inserted again later goes to the end.
    fn remove(&mut self, key: &K, id: TagId) {
        let Some(&pos) = self.positions.get(key) else {
            return;
        };
        let ids = &mut self.buckets[pos].1;
        ids.retain(|&other| other != id);
        if !ids.is_empty() {
            return;
        }
        self.buckets.remove(pos);
        self.positions.remove(key);
        for (shifted, (key, _)) in self.buckets.iter().enumerate().skip(pos) {
            self.positions.insert(*key, shifted);
        }
    }

    /// Buckets in first-insertion order of their key.
    fn iter(&self) -> impl Iterator<Item = (K, &[TagId])> {
        self.buckets.iter().map(|(key, ids)| (*key, ids.as_slice()))
    }
}

// ─── TagsCollection ─────────────────────────────────────────────────────────

/// An ordered collection of tags with name and annotation indexes.
#[derive(Debug, Clone, Default)]
pub struct TagsCollection {
    slots: Vec<Option<Tag>>,
    order: Vec<TagId>,
    by_name: Index<Ustr>,
    by_annotation: Index<AnnotationKey>,
}

impl TagsCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag and file it in both indexes.
    pub fn add(&mut self, tag: Tag) -> TagId {
        let id = TagId(self.slots.len() as u32);
        let name_key = name_key(tag.name());

        self.by_name.push(name_key, id);
        for key in annotation_keys(&tag) {
            self.by_annotation.push(key, id);
        }
        trace!(tag = tag.name(), key = name_key.as_str(), ?id, "tag added");

        self.slots.push(Some(tag));
        self.order.push(id);
        id
    }

    /// Remove a tag by handle, dropping it from the sequence and from both
    /// indexes.  Returns the removed tag, or `None` for a stale handle.
    pub fn remove(&mut self, id: TagId) -> Option<Tag> {
        let tag = self.slots.get_mut(id.0 as usize)?.take()?;

        self.order.retain(|&other| other != id);
        self.by_name.remove(&name_key(tag.name()), id);
        for key in annotation_keys(&tag) {
            self.by_annotation.remove(&key, id);
        }
        debug!(tag = tag.name(), ?id, "tag removed");
        Some(tag)
    }

    pub fn get(&self, id: TagId) -> Option<&Tag> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.order.iter().filter_map(|&id| self.get(id))
    }

    /// Handles and tags in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (TagId, &Tag)> {
        self.order
            .iter()
            .filter_map(|&id| self.get(id).map(|tag| (id, tag)))
    }

    /// Handle of the first tag equal to `tag`.
    pub fn position(&self, tag: &Tag) -> Option<TagId> {
        self.entries()
            .find(|(_, candidate)| *candidate == tag)
            .map(|(id, _)| id)
    }

    // ─── Lookup ─────────────────────────────────────────────────────────

    /// All tags whose aliased name equals the aliased `name`, in insertion
    /// order.
    pub fn by_name(&self, name: &str) -> Vec<&Tag> {
        self.resolve(self.by_name.get(&name_key(name)))
    }

    /// All tags carrying the annotation label `label`.
    pub fn by_annotation(&self, label: &str) -> Vec<&Tag> {
        self.resolve(self.by_annotation.get(&AnnotationKey::for_label(label)))
    }

    /// All tags carrying no annotation label.
    pub fn unlabeled(&self) -> Vec<&Tag> {
        self.resolve(self.by_annotation.get(&AnnotationKey::Unlabeled))
    }

    /// Every tag that describes the same thing as `candidate`.
    ///
    /// Tags match when their literal names are equal and, where both sides
    /// expose one, their variable name (property family, `@param`, `@var`)
    /// or method name (`@method`) is equal too.
    pub fn find_matching(&self, candidate: &Tag) -> Vec<&Tag> {
        self.find_matching_ids(candidate)
            .into_iter()
            .filter_map(|id| self.get(id))
            .collect()
    }

    pub fn find_matching_ids(&self, candidate: &Tag) -> Vec<TagId> {
        self.by_name
            .get(&name_key(candidate.name()))
            .iter()
            .copied()
            .filter(|&id| self.get(id).is_some_and(|existing| tags_match(existing, candidate)))
            .collect()
    }

    // ─── Grouping ───────────────────────────────────────────────────────

    /// The by-name index as `(aliased name, tags)` groups, in order of
    /// first appearance.  With `sorted`, each group is ordered with
    /// [`sort_tags`]; the underlying sequence is left untouched.
    pub fn grouped_by_name(&self, sorted: bool) -> Vec<(Ustr, Vec<&Tag>)> {
        self.by_name
            .iter()
            .map(|(key, ids)| (key, self.resolve_sorted(ids, sorted)))
            .collect()
    }

    /// The by-annotation index as `(label, tags)` groups, in order of
    /// first appearance.  With `sorted`, each group is ordered with
    /// [`sort_tags`].
    pub fn grouped_by_annotation(&self, sorted: bool) -> Vec<(AnnotationKey, Vec<&Tag>)> {
        self.by_annotation
            .iter()
            .map(|(key, ids)| (key, self.resolve_sorted(ids, sorted)))
            .collect()
    }

    /// The whole sequence ordered with [`sort_tags`].
    pub fn sorted(&self) -> Vec<&Tag> {
        let mut tags: Vec<&Tag> = self.iter().collect();
        tags.sort_by(|a, b| sort_tags(a, b));
        tags
    }

    fn resolve(&self, ids: &[TagId]) -> Vec<&Tag> {
        ids.iter().filter_map(|&id| self.get(id)).collect()
    }

    fn resolve_sorted(&self, ids: &[TagId], sorted: bool) -> Vec<&Tag> {
        let mut tags = self.resolve(ids);
        if sorted {
            tags.sort_by(|a, b| sort_tags(a, b));
        }
        tags
    }
}

impl Extend<Tag> for TagsCollection {
    fn extend<I: IntoIterator<Item = Tag>>(&mut self, iter: I) {
        for tag in iter {
            self.add(tag);
        }
    }
}

impl FromIterator<Tag> for TagsCollection {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut collection = Self::new();
        collection.extend(iter);
        collection
    }
}

impl<'a> IntoIterator for &'a TagsCollection {
    type Item = &'a Tag;
    type IntoIter = Box<dyn Iterator<Item = &'a Tag> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

// ─── Ordering & matching ────────────────────────────────────────────────────

/// Ordering used for deterministic tag groups.
///
/// Primary key is the aliased name.  Ties between two property-family
/// tags compare variable names case-insensitively; ties between two
/// `@method` tags compare method names case-insensitively.  Anything
/// else is equal, so a stable sort keeps insertion order.
pub fn sort_tags(a: &Tag, b: &Tag) -> Ordering {
    let primary = de_alias(a.name()).cmp(de_alias(b.name()));
    if primary != Ordering::Equal {
        return primary;
    }

    if let (Some(pa), Some(pb)) = (a.as_property(), b.as_property()) {
        return cmp_ignore_case(&pa.variable_name, &pb.variable_name);
    }
    if let (Some(ma), Some(mb)) = (a.as_method(), b.as_method()) {
        return cmp_ignore_case(ma.method_name(), mb.method_name());
    }
    primary
}

/// The predicate behind [`TagsCollection::find_matching`].
pub(crate) fn tags_match(existing: &Tag, candidate: &Tag) -> bool {
    if existing.name() != candidate.name() {
        return false;
    }
    match (existing.kind(), candidate.kind()) {
        (TagKind::Property(a), TagKind::Property(b))
        | (TagKind::PropertyRead(a), TagKind::PropertyRead(b))
        | (TagKind::PropertyWrite(a), TagKind::PropertyWrite(b)) => {
            a.variable_name == b.variable_name
        }
        (TagKind::Param(a), TagKind::Param(b)) => a.variable_name == b.variable_name,
        (TagKind::Var(a), TagKind::Var(b)) => match (&a.variable_name, &b.variable_name) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        },
        (TagKind::Method(a), TagKind::Method(b)) => a.method_name() == b.method_name(),
        // Different variants sharing a name (e.g. a generic `@property`
        // next to a structured one) match on the name alone.
        _ => true,
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn name_key(name: &str) -> Ustr {
    ustr(de_alias(name))
}

fn annotation_keys(tag: &Tag) -> Vec<AnnotationKey> {
    if tag.annotations().is_empty() {
        return vec![AnnotationKey::Unlabeled];
    }
    // A label repeated on one tag still files it only once.
    let mut keys = Vec::with_capacity(tag.annotations().len());
    for label in tag.annotations() {
        let key = AnnotationKey::for_label(label);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn de_alias_collapses_property_variants() {
        assert_eq!(de_alias("property-read"), "property");
        assert_eq!(de_alias("property-write"), "property");
        assert_eq!(de_alias("property"), "property");
        assert_eq!(de_alias("param"), "param");
    }

    #[test]
    fn index_skips_emptied_buckets() {
        let mut index: Index<u8> = Index::default();
        index.push(1, TagId(0));
        index.push(2, TagId(1));
        index.remove(&1, TagId(0));
        let keys: Vec<u8> = index.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![2]);
        assert!(index.get(&1).is_empty());
    }

    #[test]
    fn reinserted_key_moves_to_the_end() {
        let mut index: Index<u8> = Index::default();
        index.push(1, TagId(0));
        index.push(2, TagId(1));
        index.push(3, TagId(2));
        index.remove(&1, TagId(0));
        index.push(1, TagId(3));
        let keys: Vec<u8> = index.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![2, 3, 1]);
        assert_eq!(index.get(&3), &[TagId(2)]);
        assert_eq!(index.get(&1), &[TagId(3)]);
    }

    #[test]
    fn unlabeled_key_displays_as_zero() {
        assert_eq!(AnnotationKey::Unlabeled.to_string(), "0");
        assert_eq!(AnnotationKey::for_label("0"), AnnotationKey::Unlabeled);
    }
}
