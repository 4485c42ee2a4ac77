//! APN storage
//!
//! The carrier APN table is read through the [`ApnStore`] trait so the
//! settings code doesn't care whether rows come from the carrier SQLite
//! database, a JSON file or memory.

mod memory;
mod sqlite;
mod traits;

pub use memory::{InMemoryApnStore, load_apns_json};
pub use sqlite::SqliteApnStore;
pub use traits::{ApnStore, ApnStoreError};
