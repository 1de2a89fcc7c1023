//! # Journaled Tables
//!
//! A [`Table`] is an in-memory collection of [`Record`]s ordered by id, with
//! a non-unique index on each record's natural key. While a transaction is
//! open the table keeps a journal of before-images; `rollback` replays the
//! journal backwards and leaves rows *and* the key index exactly as they were
//! at `begin`.
//!
//! Ids come from a per-table sequence. Like a database sequence, it is not
//! rewound on rollback, so an id is never handed out twice.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A row that can live in a [`Table`].
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// Typed identifier. Built from the table's `u64` sequence.
    type Id: Copy + Ord + Hash + Display + Debug + Send + Sync + From<u64> + 'static;

    /// The row's identifier.
    fn id(&self) -> Self::Id;

    /// The natural key the table indexes. Several rows may share a key.
    fn key(&self) -> String;
}

/// An ordered, key-indexed, journaled collection of records.
#[derive(Debug)]
pub struct Table<R: Record> {
    rows: BTreeMap<R::Id, R>,
    keys: HashMap<String, BTreeSet<R::Id>>,
    next_id: u64,
    journal: Option<Vec<(R::Id, Option<R>)>>,
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Table<R> {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            keys: HashMap::new(),
            next_id: 1,
            journal: None,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.rows.get(&id)
    }

    /// All rows, ascending id.
    pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.rows.values()
    }

    /// Rows whose natural key equals `key`, ascending id.
    pub fn by_key<'a>(&'a self, key: &str) -> impl DoubleEndedIterator<Item = &'a R> + 'a {
        self.keys
            .get(key)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(move |id| self.rows.get(id))
    }

    /// The most recently inserted row with this natural key.
    pub fn latest_by_key(&self, key: &str) -> Option<&R> {
        self.by_key(key).next_back()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.get(key).is_some_and(|ids| !ids.is_empty())
    }

    /// Allocates the next id and inserts the row built from it.
    pub fn insert_with(&mut self, build: impl FnOnce(R::Id) -> R) -> &R {
        let id = R::Id::from(self.next_id);
        self.next_id += 1;
        let row = build(id);
        debug_assert!(row.id() == id, "record must keep the id it was built with");
        self.record(id, None);
        self.put(row);
        &self.rows[&id]
    }

    /// Mutates a row in place. The id must not change; the key may.
    pub fn update(&mut self, id: R::Id, change: impl FnOnce(&mut R)) -> Option<&R> {
        let before = self.rows.get(&id)?.clone();
        self.unindex(&before);
        self.record(id, Some(before));
        let row = self.rows.get_mut(&id)?;
        change(row);
        let key = row.key();
        self.keys.entry(key).or_default().insert(id);
        self.rows.get(&id)
    }

    pub fn remove(&mut self, id: R::Id) -> Option<R> {
        let row = self.rows.remove(&id)?;
        self.unindex(&row);
        self.record(id, Some(row.clone()));
        Some(row)
    }

    /// Starts journaling. A transaction already in progress is committed.
    pub fn begin(&mut self) {
        self.journal = Some(Vec::new());
    }

    pub fn commit(&mut self) {
        self.journal = None;
    }

    pub fn rollback(&mut self) {
        let Some(journal) = self.journal.take() else {
            return;
        };
        for (id, before) in journal.into_iter().rev() {
            if let Some(current) = self.rows.remove(&id) {
                self.unindex(&current);
            }
            if let Some(row) = before {
                self.put(row);
            }
        }
    }

    pub fn in_transaction(&self) -> bool {
        self.journal.is_some()
    }

    fn record(&mut self, id: R::Id, before: Option<R>) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push((id, before));
        }
    }

    fn put(&mut self, row: R) {
        let id = row.id();
        self.keys.entry(row.key()).or_default().insert(id);
        self.rows.insert(id, row);
    }

    fn unindex(&mut self, row: &R) {
        let key = row.key();
        if let Some(ids) = self.keys.get_mut(&key) {
            ids.remove(&row.id());
            if ids.is_empty() {
                self.keys.remove(&key);
            }
        }
    }
}
