//! Chapter marker and range types.

use serde::{Deserialize, Serialize};

use crate::time::RationalTime;

/// A named time marker supplied by the caller. Marker lists may arrive
/// unsorted, duplicated, or pointing past the end of the timeline; the
/// partitioner sorts that out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterMarker {
    pub start: RationalTime,
    pub title: String,
}

impl ChapterMarker {
    pub fn new(start: RationalTime, title: impl Into<String>) -> Self {
        Self {
            start,
            title: title.into(),
        }
    }
}

/// A derived, half-open slice `[start, end)` of the timeline.
///
/// Ranges are recomputed fresh on every export call and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterRange {
    /// Position in the partition, also the project order in the export.
    pub index: usize,
    pub name: String,
    pub start: RationalTime,
    pub end: RationalTime,
}

impl ChapterRange {
    pub fn duration(&self) -> RationalTime {
        self.end - self.start
    }

    /// Whether an offset falls inside this range.
    pub fn contains(&self, offset: RationalTime) -> bool {
        self.start <= offset && offset < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: i64) -> RationalTime {
        RationalTime::from_seconds(s)
    }

    #[test]
    fn test_range_duration_and_containment() {
        let range = ChapterRange {
            index: 0,
            name: "Intro".to_string(),
            start: secs(10),
            end: secs(25),
        };
        assert_eq!(range.duration(), secs(15));
        assert!(range.contains(secs(10)));
        assert!(range.contains(secs(24)));
        // Half-open: the end belongs to the next range.
        assert!(!range.contains(secs(25)));
        assert!(!range.contains(secs(9)));
    }
}
