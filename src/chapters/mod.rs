//! Chapter module.
//!
//! Splits one timeline into several contiguous sub-timelines:
//!
//! - **Partitioning**: named markers become gapless half-open ranges that
//!   cover the whole timeline, with the first range pinned to zero
//! - **Distribution**: each primary-lane clip is assigned to the range it
//!   starts in and retimed to range-relative zero

mod distribute;
mod partition;
mod types;

// Re-export types
pub use types::{ChapterMarker, ChapterRange};

// Re-export functions
pub use distribute::clips_for_range;
pub use partition::partition;
