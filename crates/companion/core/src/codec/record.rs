//! The replicated per-agent key-value record.
//!
//! Every host sees the same record; exactly one of them, the owner, may write
//! it. Writes go through [`RecordWriter`], which can only be obtained by the
//! owner, so a non-owner write is unrepresentable rather than silently dropped.

use std::collections::HashMap;

/// Identity of a simulation host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostId(pub u64);

/// A typed record value.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordValue {
    Str(String),
    Float(f32),
    Bool(bool),
}

/// Replicated key-value store.
pub trait Record {
    /// Host currently authoritative for this record.
    fn owner(&self) -> Option<HostId>;

    fn get(&self, key: &str) -> Option<&RecordValue>;

    /// Raw write used by the replication layer itself. Simulation code writes
    /// through [`RecordWriter`] instead.
    fn put(&mut self, key: &str, value: RecordValue);

    fn get_str(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            RecordValue::Str(value) => Some(value),
            _ => None,
        }
    }

    fn get_float(&self, key: &str) -> Option<f32> {
        match self.get(key)? {
            RecordValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            RecordValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    fn is_owned_by(&self, host: HostId) -> bool {
        self.owner() == Some(host)
    }
}

/// Write access to a record, held only by its owner.
pub struct RecordWriter<'r> {
    record: &'r mut dyn Record,
}

impl<'r> RecordWriter<'r> {
    /// Returns a writer if `host` owns the record, `None` otherwise.
    pub fn for_host(record: &'r mut dyn Record, host: HostId) -> Option<Self> {
        if record.is_owned_by(host) {
            Some(Self { record })
        } else {
            None
        }
    }

    pub fn set_str(&mut self, key: &str, value: impl Into<String>) {
        self.record.put(key, RecordValue::Str(value.into()));
    }

    pub fn set_float(&mut self, key: &str, value: f32) {
        self.record.put(key, RecordValue::Float(value));
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.record.put(key, RecordValue::Bool(value));
    }

    pub fn record(&self) -> &dyn Record {
        &*self.record
    }
}

/// In-process record, used by single-host setups and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryRecord {
    owner: Option<HostId>,
    values: HashMap<String, RecordValue>,
}

impl MemoryRecord {
    pub fn new(owner: HostId) -> Self {
        Self {
            owner: Some(owner),
            values: HashMap::new(),
        }
    }

    /// Hands authority to another host (or to nobody).
    pub fn set_owner(&mut self, owner: Option<HostId>) {
        self.owner = owner;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Record for MemoryRecord {
    fn owner(&self) -> Option<HostId> {
        self.owner
    }

    fn get(&self, key: &str) -> Option<&RecordValue> {
        self.values.get(key)
    }

    fn put(&mut self, key: &str, value: RecordValue) {
        self.values.insert(key.to_owned(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_owner_gets_a_writer() {
        let mut record = MemoryRecord::new(HostId(1));
        assert!(RecordWriter::for_host(&mut record, HostId(2)).is_none());

        let mut writer = RecordWriter::for_host(&mut record, HostId(1)).expect("owner");
        writer.set_float("stamina", 12.0);
        assert_eq!(record.get_float("stamina"), Some(12.0));
    }

    #[test]
    fn typed_getters_reject_mismatched_values() {
        let mut record = MemoryRecord::new(HostId(1));
        record.put("in_bed", RecordValue::Str("yes".into()));
        assert_eq!(record.get_bool("in_bed"), None);
        assert_eq!(record.get_str("in_bed"), Some("yes"));
    }

    #[test]
    fn unowned_record_has_no_writers() {
        let mut record = MemoryRecord::default();
        assert!(RecordWriter::for_host(&mut record, HostId(1)).is_none());
        record.set_owner(Some(HostId(1)));
        assert!(RecordWriter::for_host(&mut record, HostId(1)).is_some());
    }
}
