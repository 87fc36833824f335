//! chaptercut - timeline assembly and chapter-split interchange export
//!
//! This crate contains the editing core with zero UI dependencies: it places
//! time-based media references on a multi-lane timeline, splits that timeline
//! into contiguous chapter ranges, and serializes the result into the FCPXML
//! interchange format consumed by third-party editing tools.
//!
//! What it does NOT do: probe media durations, mix audio, copy files, or talk
//! to any UI. Callers resolve asset metadata up front and hand the finished
//! export string to the packaging layer.

pub mod chapters;
pub mod error;
pub mod export;
pub mod time;
pub mod timeline;

// Re-exports
pub use chapters::{clips_for_range, partition, ChapterMarker, ChapterRange};
pub use error::{Error, Result};
pub use export::{
    export_chaptered, export_timeline, AssetCatalog, AssetInfo, ExportOptions, FormatDescriptor,
    MediaCategory, ResourceRegistry,
};
pub use time::RationalTime;
pub use timeline::{
    AssetRef, Clip, ClipId, ClipShift, ClipSource, ClipStore, LaneRange, RippleResult, RippleScope,
};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
