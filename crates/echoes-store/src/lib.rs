//! Emotional Echoes Composition Store
//!
//! Saved compositions live in a single named slot of a key-value storage
//! medium, serialized as one JSON array. Every mutation rewrites the whole
//! document; there is no append-only log and no concurrent-writer
//! protection (one client owns the slot).
//!
//! # Overview
//!
//! - [`KeyValueStorage`] is the storage port, with a directory-backed
//!   [`FileStorage`] and an in-memory [`MemoryStorage`].
//! - [`CompositionRepository`] is the `{load, append, remove}` capability
//!   used by the controller, implemented by [`CompositionStore`].
//!
//! # Example
//!
//! ```
//! use echoes_spec::Composition;
//! use echoes_store::{CompositionRepository, CompositionStore, MemoryStorage};
//!
//! let mut store = CompositionStore::new(MemoryStorage::new());
//! let composition = Composition::new(
//!     "2025-01-01T00:00:00.000Z",
//!     "serene",
//!     "data:image/png;base64,AA==",
//!     "data:audio/wav;base64,AA==",
//! );
//! store.append(composition).unwrap();
//! assert_eq!(store.load().len(), 1);
//! ```

pub mod error;
pub mod repository;
pub mod storage;

pub use error::PersistenceError;
pub use repository::{CompositionRepository, CompositionStore, COMPOSITIONS_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
