//! Cache Entry Module
//!
//! Defines the immutable record stored for each cached key.

use std::time::{Duration, Instant};

use bytes::Bytes;
use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A cached payload and the moment it was inserted.
///
/// Entries are never mutated after construction; re-adding a key replaces the
/// entry wholesale, which is what resets its age.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored response body
    payload: Bytes,
    /// Monotonic insertion time, used for expiry
    created_at: Instant,
    /// Wall-clock insertion time, used for display
    cached_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(payload: Bytes) -> Self {
        Self {
            payload,
            created_at: Instant::now(),
            cached_at: Utc::now(),
        }
    }

    /// Returns the payload. `Bytes` clones share the buffer but are read-only.
    pub fn payload(&self) -> Bytes {
        self.payload.clone()
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn cached_at(&self) -> DateTime<Utc> {
        self.cached_at
    }

    // == Age ==
    /// Time elapsed since insertion.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Older Than ==
    /// Returns true when the entry was inserted strictly before `cutoff`.
    pub fn is_older_than(&self, cutoff: Instant) -> bool {
        self.created_at < cutoff
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(Bytes::from_static(b"abc"));

        assert_eq!(entry.payload(), Bytes::from_static(b"abc"));
        assert!(entry.age() < Duration::from_secs(1));
    }

    #[test]
    fn test_entry_is_older_than() {
        let entry = CacheEntry::new(Bytes::from_static(b"abc"));
        sleep(Duration::from_millis(20));

        assert!(entry.is_older_than(Instant::now()));
        assert!(!entry.is_older_than(entry.created_at()));
    }

    #[test]
    fn test_entry_age_grows() {
        let entry = CacheEntry::new(Bytes::new());
        sleep(Duration::from_millis(20));
        assert!(entry.age() >= Duration::from_millis(20));
    }

    #[test]
    fn test_payload_copy_is_independent_of_caller() {
        let mut source = b"abc".to_vec();
        let entry = CacheEntry::new(Bytes::copy_from_slice(&source));
        source[0] = b'z';

        assert_eq!(&entry.payload()[..], b"abc");
    }
}
