//! Session state: the in-memory store, its durable snapshot, and the slot
//! the snapshot is persisted to.

pub mod snapshot;
pub mod state;
pub mod store;

pub use snapshot::{JsonFileSnapshotStore, MemorySnapshotStore, SessionSnapshot, SnapshotStore};
pub use state::SessionState;
pub use store::SessionStore;
