//! Timeline module.
//!
//! Owns the clip-placement model: a value-semantic `ClipStore` over integer
//! lanes with three placement mutators and read-only queries.
//!
//! # Features
//!
//! - **Append**: place at the global timeline end
//! - **Insert**: place at an exact offset, with lane auto-selection
//! - **Ripple insert**: place and shift downstream clips within a scope
//! - **Queries**: by id, by lane, by overlapping interval

mod query;
mod store;
mod types;

// Re-export types
pub use types::{AssetRef, Clip, ClipId, ClipShift, ClipSource, LaneRange, RippleResult, RippleScope};

// Re-export the store (queries are inherent methods on it)
pub use store::ClipStore;
