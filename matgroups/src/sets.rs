//! Named label sets and the name-ordered collection handed to the writer.
//!
//! A [`SetCollection`] is filled while scanning a model and then passed by
//! shared reference to the writer, which only reads it.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// What the labels of a set refer to. The discriminant is the value written
/// to the `$HMSET` metadata line.
#[derive(serde::Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SetKind {
    /// Node labels
    Node = 1,
    /// Element labels
    #[default]
    Element = 2,
}

impl SetKind {
    /// Returns the numeric code used in the bulk-data format.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for SetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetKind::Node => f.write_str("node"),
            SetKind::Element => f.write_str("element"),
        }
    }
}

/// A named collection of distinct labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierSet<'a> {
    /// The set name, unique within a collection
    pub name: &'a str,
    /// The distinct labels, ascending
    pub members: &'a BTreeSet<u64>,
}

impl IdentifierSet<'_> {
    /// Returns the number of distinct labels in the set.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the set has no labels.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the labels as an ascending vector.
    pub fn to_vec(&self) -> Vec<u64> {
        self.members.iter().copied().collect()
    }
}

/// Mapping from set name to its labels, iterated in lexicographic name order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SetCollection {
    sets: BTreeMap<String, BTreeSet<u64>>,
}

impl SetCollection {
    /// Adds labels to the named set, creating it if needed. Labels already in
    /// the set are ignored.
    pub fn extend<I>(&mut self, name: &str, labels: I)
    where
        I: IntoIterator<Item = u64>,
    {
        self.sets.entry(name.to_string()).or_default().extend(labels);
    }

    /// Stores the labels under `name`, replacing any set already stored under
    /// that name. Returns the replaced labels.
    pub fn insert<I>(&mut self, name: &str, labels: I) -> Option<BTreeSet<u64>>
    where
        I: IntoIterator<Item = u64>,
    {
        let labels: BTreeSet<u64> = labels.into_iter().collect();
        match self.sets.entry(name.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(labels);
                None
            }
            Entry::Occupied(mut entry) => {
                tracing::warn!(
                    set = %name,
                    replaced = entry.get().len(),
                    "set name already present; earlier labels are discarded"
                );
                Some(entry.insert(labels))
            }
        }
    }

    /// Returns the labels stored under `name`.
    pub fn get(&self, name: &str) -> Option<&BTreeSet<u64>> {
        self.sets.get(name)
    }

    /// Returns the number of sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns `true` if there are no sets.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Iterates over the sets in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = IdentifierSet<'_>> {
        self.sets
            .iter()
            .map(|(name, members)| IdentifierSet { name, members })
    }
}

impl<S, I> FromIterator<(S, I)> for SetCollection
where
    S: AsRef<str>,
    I: IntoIterator<Item = u64>,
{
    fn from_iter<T: IntoIterator<Item = (S, I)>>(iter: T) -> Self {
        let mut collection = SetCollection::default();
        for (name, labels) in iter {
            collection.insert(name.as_ref(), labels);
        }
        collection
    }
}
