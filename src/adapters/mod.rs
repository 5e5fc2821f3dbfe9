//! External integrations
//!
//! Trait seams for the three external collaborators: the geographic
//! feature store, the export task executor and the object store. The
//! service core only ever talks to these traits.

pub mod executor;
pub mod objectstore;
pub mod store;
