//! In-memory curve collection keyed by curve name.

use crate::schema::CurveRecord;
use std::collections::HashMap;

/// Curves by name, plus the order they are listed in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveCollection {
    curves: HashMap<String, CurveRecord>,
    order: Vec<String>, // Order for listing/display
}

impl CurveCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<CurveRecord>) -> Self {
        let mut collection = Self::new();
        for record in records {
            collection.insert(record);
        }
        collection
    }

    /// Records in display order.
    pub fn to_records(&self) -> Vec<CurveRecord> {
        self.iter().cloned().collect()
    }

    /// Insert a record. A record with the same name is replaced in place and
    /// keeps its position; returns the replaced record.
    pub fn insert(&mut self, record: CurveRecord) -> Option<CurveRecord> {
        let name = record.name.clone();
        let previous = self.curves.insert(name.clone(), record);
        if previous.is_none() {
            self.order.push(name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&CurveRecord> {
        self.curves.get(name)
    }

    /// Apply `f` to the named record. The record keeps its name, so the
    /// collection stays keyed by it; renaming goes through remove + insert.
    pub fn modify<R>(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut CurveRecord) -> R,
    ) -> Option<R> {
        let record = self.curves.get_mut(name)?;
        let result = f(record);
        if record.name != name {
            tracing::warn!(
                curve = name,
                renamed = %record.name,
                "rename inside modify ignored"
            );
            record.name = name.to_string();
        }
        Some(result)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<CurveRecord> {
        self.order.retain(|n| n != name);
        self.curves.remove(name)
    }

    pub fn clear(&mut self) {
        self.curves.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &CurveRecord> + '_ {
        self.order.iter().filter_map(|n| self.curves.get(n))
    }
}
