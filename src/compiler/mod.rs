//! Filter and plain-query compilers
//!
//! Pure, synchronous normalization of the two request DSLs into canonical
//! query plans. Everything here is deterministic and free of I/O; the
//! plans are the contract handed to the feature store.

pub mod filter;
pub mod plain;

pub use filter::{compile_filters, GeometryPlan, QueryPlan};
pub use plain::{compile_plain, PlainCondition, PlainQueryPlan, Projection};
