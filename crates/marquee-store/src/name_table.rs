//! Append-only mapping between unique names and monotonically allocated ids.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;
use std::sync::Arc;

use marquee_core::EOL;

use crate::error::{Result, StoreError};

/// A bijection between a unique textual name and a numeric id, with a
/// cached rendered listing of `<id>,<name>` lines.
///
/// Ids start at 1 and are strictly increasing in insertion order; id 0 is
/// never issued and ids are never reused, not even after [`clear`].
///
/// The table keeps the id→name map separate from the name membership set
/// so the listing rebuild never traverses the set. Both structures share
/// one `Arc<str>` per name.
///
/// `NameTable` carries no lock of its own; the owning store's lock guards
/// it.
///
/// [`clear`]: NameTable::clear
#[derive(Debug)]
pub struct NameTable {
    entity: &'static str,
    next_id: u64,
    names_by_id: BTreeMap<u64, Arc<str>>,
    names: HashSet<Arc<str>>,
    listing: Arc<str>,
}

impl NameTable {
    /// Creates an empty table for the given entity kind.
    ///
    /// The entity kind (`"movie"`, `"theater"`) only flavours error
    /// messages.
    #[must_use]
    pub fn new(entity: &'static str) -> Self {
        Self {
            entity,
            next_id: 1,
            names_by_id: BTreeMap::new(),
            names: HashSet::new(),
            listing: Arc::from(""),
        }
    }

    /// Adds a batch of names, allocating one fresh id per name.
    ///
    /// The whole batch is validated before anything is inserted: if any
    /// name is already present the table is left untouched. The returned
    /// ids correspond positionally to some iteration of the input set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateName`] if any name already exists.
    pub fn add(&mut self, names: HashSet<String>) -> Result<Vec<u64>> {
        for name in &names {
            if self.names.contains(name.as_str()) {
                return Err(StoreError::DuplicateName {
                    entity: self.entity,
                    name: name.clone(),
                });
            }
        }

        let mut inserted_ids = Vec::with_capacity(names.len());
        for name in names {
            let name: Arc<str> = Arc::from(name);
            self.names.insert(Arc::clone(&name));
            self.names_by_id.insert(self.next_id, name);
            inserted_ids.push(self.next_id);
            self.next_id += 1;
        }

        self.rebuild_listing();
        Ok(inserted_ids)
    }

    /// Returns true if the id exists in the table.
    #[must_use]
    pub fn has_id(&self, id: u64) -> bool {
        self.names_by_id.contains_key(&id)
    }

    /// Returns the name associated with an id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownId`] if the id does not exist.
    pub fn get_name(&self, id: u64) -> Result<Arc<str>> {
        self.names_by_id
            .get(&id)
            .cloned()
            .ok_or(StoreError::UnknownId {
                entity: self.entity,
                id,
            })
    }

    /// Returns all ids in ascending numeric order.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<u64> {
        self.names_by_id.keys().copied().collect()
    }

    /// Returns the number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names_by_id.len()
    }

    /// Returns true if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names_by_id.is_empty()
    }

    /// Returns the cached rendered listing.
    ///
    /// One line `<id>,<name>` per entry, sorted by id, each line
    /// terminated by CRLF. The snapshot is shared: the caller may hold it
    /// for as long as it likes without blocking mutators.
    #[must_use]
    pub fn rendered(&self) -> Arc<str> {
        Arc::clone(&self.listing)
    }

    /// Removes every entry and rebuilds the cache to the empty string.
    ///
    /// The id counter is deliberately left running so ids stay unique
    /// across the lifetime of the table.
    pub fn clear(&mut self) {
        self.names_by_id.clear();
        self.names.clear();
        self.rebuild_listing();
    }

    fn rebuild_listing(&mut self) {
        let mut listing = String::new();
        for (id, name) in &self.names_by_id {
            let _ = write!(listing, "{id},{name}{EOL}");
        }
        self.listing = Arc::from(listing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> HashSet<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn add_allocates_distinct_increasing_ids() {
        let mut table = NameTable::new("movie");
        let first = table.add(names(&["Terminator"])).unwrap();
        let second = table.add(names(&["The Matrix", "The Flintstones"])).unwrap();

        assert_eq!(first, vec![1]);
        let mut second_sorted = second.clone();
        second_sorted.sort_unstable();
        assert_eq!(second_sorted, vec![2, 3]);
        assert_eq!(table.sorted_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn add_duplicate_leaves_table_unchanged() {
        let mut table = NameTable::new("movie");
        table.add(names(&["Terminator", "The Matrix"])).unwrap();
        let before = table.rendered();

        let err = table
            .add(names(&["Seven Samurai", "Terminator"]))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName { .. }));

        // Byte-identical listing, no new ids.
        assert_eq!(&*table.rendered(), &*before);
        assert_eq!(table.sorted_ids(), vec![1, 2]);

        // The failed batch consumed no ids.
        let next = table.add(names(&["Seven Samurai"])).unwrap();
        assert_eq!(next, vec![3]);
    }

    #[test]
    fn listing_contains_every_line() {
        let mut table = NameTable::new("movie");
        let ids = table.add(names(&["Alpha", "Beta, with commas"])).unwrap();
        let listing = table.rendered();

        for id in ids {
            let name = table.get_name(id).unwrap();
            assert!(listing.contains(&format!("{id},{name}\r\n")));
        }
    }

    #[test]
    fn listing_is_sorted_by_id() {
        let mut table = NameTable::new("movie");
        table.add(names(&["C", "A", "B"])).unwrap();

        let listing = table.rendered();
        let rendered_ids: Vec<u64> = listing
            .split("\r\n")
            .filter(|line| !line.is_empty())
            .map(|line| line.split(',').next().unwrap().parse().unwrap())
            .collect();
        assert_eq!(rendered_ids, vec![1, 2, 3]);
    }

    #[test]
    fn get_name_unknown_id_fails() {
        let table = NameTable::new("theater");
        let err = table.get_name(1).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnknownId {
                entity: "theater",
                id: 1
            }
        ));
    }

    #[test]
    fn has_id_reflects_contents() {
        let mut table = NameTable::new("movie");
        assert!(!table.has_id(1));
        table.add(names(&["Solo"])).unwrap();
        assert!(table.has_id(1));
        assert!(!table.has_id(2));
    }

    #[test]
    fn clear_empties_but_keeps_counter() {
        let mut table = NameTable::new("movie");
        table.add(names(&["One", "Two"])).unwrap();
        table.clear();

        assert!(table.is_empty());
        assert_eq!(&*table.rendered(), "");

        // The counter keeps running after clear.
        let ids = table.add(names(&["Three"])).unwrap();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn empty_batch_is_a_noop() {
        let mut table = NameTable::new("movie");
        let ids = table.add(HashSet::new()).unwrap();
        assert!(ids.is_empty());
        assert_eq!(&*table.rendered(), "");
    }

    #[test]
    fn snapshot_stays_valid_across_mutation() {
        let mut table = NameTable::new("movie");
        table.add(names(&["Old"])).unwrap();
        let snapshot = table.rendered();

        table.add(names(&["New"])).unwrap();
        assert_eq!(&*snapshot, "1,Old\r\n");
        assert!(table.rendered().contains("2,New\r\n"));
    }
}
