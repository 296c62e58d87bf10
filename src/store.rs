use std::collections::BTreeMap;

use crate::models::RecordId;

/// Rows keyed by id plus the counter that hands out ids.
///
/// Ids start at 1 and are never reused, so a row's id is fixed once
/// [`Table::insert_with`] assigns it.
#[derive(Debug)]
pub struct Table<T> {
    rows: BTreeMap<RecordId, T>,
    last_id: RecordId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: BTreeMap::new(), last_id: 0 }
    }
}

impl<T: Clone> Table<T> {
    pub fn insert_with(&mut self, build: impl FnOnce(RecordId) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
