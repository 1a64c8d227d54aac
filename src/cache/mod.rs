//! Cache Module
//!
//! In-memory response cache with age-based expiry.
//!
//! - `CacheEntry` - immutable payload plus insertion time
//! - `CacheStore` - the key to entry map, always accessed under one lock
//! - `Cache` - cloneable public handle that owns the store and its reaper
//! - `Cache::fetch` - cache-aside wrapper around an arbitrary producer

mod entry;
mod fetch;
mod handle;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use stats::CacheStats;
pub use store::{CacheStore, EntryInfo};
