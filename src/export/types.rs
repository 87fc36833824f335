//! Export-side types: caller-resolved asset metadata, shared format
//! descriptors, and export options.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::time::RationalTime;
use crate::timeline::AssetRef;

/// Broad media kind of an asset, resolved by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCategory {
    Audio,
    Video,
    Image,
}

/// Caller-resolved metadata for one asset. The core never probes media; the
/// caller supplies everything the declaration needs before exporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetInfo {
    /// Display name for the asset declaration.
    pub name: String,
    /// Duration hint from the caller's probe.
    pub duration: RationalTime,
    pub category: MediaCategory,
    /// Media location written to the declaration, e.g. a `file://` URL.
    pub src: String,
}

/// Asset metadata keyed by reference, consumed read-only by one export call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetCatalog {
    entries: HashMap<AssetRef, AssetInfo>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: impl Into<AssetRef>, info: AssetInfo) {
        self.entries.insert(reference.into(), info);
    }

    pub fn get(&self, reference: &AssetRef) -> Option<&AssetInfo> {
        self.entries.get(reference)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A shared format descriptor: frame geometry and timing that sequences and
/// assets reference by registry id instead of repeating inline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatDescriptor {
    pub name: String,
    pub frame_duration: RationalTime,
    pub width: u32,
    pub height: u32,
}

impl Default for FormatDescriptor {
    fn default() -> Self {
        Self {
            name: "FFVideoFormat1080p24".to_string(),
            frame_duration: RationalTime::new(1001, 24000),
            width: 1920,
            height: 1080,
        }
    }
}

/// Options for one export call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Project name on the no-chapters path.
    pub document_name: String,
    /// Name for the single degenerate range when no markers are in range.
    pub default_chapter_name: String,
    /// Sequence format shared by every project in the document.
    pub format: FormatDescriptor,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            document_name: "Timeline".to_string(),
            default_chapter_name: "Untitled Project".to_string(),
            format: FormatDescriptor::default(),
        }
    }
}
