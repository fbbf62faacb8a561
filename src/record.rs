//! Session record value type.

use std::collections::BTreeMap;

use time::OffsetDateTime;

/// Ordered mapping of attribute name to serialized value.
pub type Attributes = BTreeMap<String, serde_json::Value>;

/// Value of `max_inactive_ms` for rows written before the column existed.
pub const MAX_INTERVAL_NOT_SET: i64 = -999;

/// Mutable state of one session as held in memory and in the session table.
///
/// All timestamps are milliseconds since the Unix epoch.
///
/// A record with `last_saved <= 0` has never been persisted: the next
/// [`store`](crate::SessionDataStore::store) inserts it, and every store after
/// that updates it.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionRecord {
    pub created: i64,
    pub accessed: i64,
    pub last_accessed: i64,
    /// Time the session cookie was issued.
    pub cookie_set: i64,
    /// Commit time of the last successful write, `<= 0` if never written.
    pub last_saved: i64,
    /// Absolute expiry time, `<= 0` when no expiry is scheduled.
    pub expiry: i64,
    pub max_inactive_ms: i64,
    /// Node that last wrote the record. An ownership hint, not a lock.
    pub last_node: String,
    pub attributes: Attributes,
}

impl SessionRecord {
    /// Creates a never-persisted record.
    pub fn new(created: i64, accessed: i64, last_accessed: i64, max_inactive_ms: i64) -> Self {
        Self {
            created,
            accessed,
            last_accessed,
            cookie_set: 0,
            last_saved: 0,
            expiry: 0,
            max_inactive_ms,
            last_node: String::new(),
            attributes: Attributes::new(),
        }
    }

    /// True until the record has been written to the backend once.
    pub fn is_new(&self) -> bool {
        self.last_saved <= 0
    }

    /// True when an expiry is scheduled and lies at or before `now`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expiry > 0 && self.expiry <= now
    }

    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.get(name)
    }

    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: serde_json::Value,
    ) -> Option<serde_json::Value> {
        self.attributes.insert(name.into(), value)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<serde_json::Value> {
        self.attributes.remove(name)
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    to_millis(OffsetDateTime::now_utc())
}

/// Converts a timestamp to milliseconds since the Unix epoch.
pub fn to_millis(time: OffsetDateTime) -> i64 {
    (time.unix_timestamp_nanos() / 1_000_000) as i64
}
