//! Marker-to-range partitioning.
//!
//! Turns a raw marker list into contiguous, gapless ranges covering the
//! whole timeline: out-of-range markers are dropped, duplicates collapse to
//! their first occurrence, the first range is pinned to absolute zero so
//! pre-marker content is never orphaned.

use super::types::{ChapterMarker, ChapterRange};
use crate::time::RationalTime;
use crate::timeline::ClipStore;

/// Partition the store's timeline at the given markers.
///
/// With no markers (or none in range) the result is a single range covering
/// `[0, store.end())` named `default_name` - the multi-timeline path
/// degenerates to the single-timeline path.
///
/// Resulting ranges satisfy: `ranges[0].start == 0`, each range's end equals
/// the next range's start, and the last end equals `store.end()`.
pub fn partition(
    store: &ClipStore,
    markers: &[ChapterMarker],
    default_name: &str,
) -> Vec<ChapterRange> {
    let end = store.end();

    let mut in_range: Vec<&ChapterMarker> =
        markers.iter().filter(|m| m.start < end).collect();
    let dropped = markers.len() - in_range.len();
    if dropped > 0 {
        tracing::debug!("Dropped {} markers at or beyond the timeline end", dropped);
    }

    if in_range.is_empty() {
        return vec![ChapterRange {
            index: 0,
            name: default_name.to_string(),
            start: RationalTime::ZERO,
            end,
        }];
    }

    // Stable sort, then keep only the first marker at each start time.
    in_range.sort_by_key(|m| m.start);
    let before = in_range.len();
    in_range.dedup_by(|a, b| a.start == b.start);
    let duplicates = before - in_range.len();
    if duplicates > 0 {
        tracing::debug!("Removed {} duplicate markers", duplicates);
    }

    let count = in_range.len();
    in_range
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let start = if i == 0 {
                RationalTime::ZERO
            } else {
                marker.start
            };
            let range_end = if i + 1 < count {
                in_range[i + 1].start
            } else {
                end
            };
            let name = if marker.title.is_empty() {
                format!("Untitled Chapter {}", i + 1)
            } else {
                marker.title.clone()
            };
            ChapterRange {
                index: i,
                name,
                start,
                end: range_end,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::ClipSource;

    fn secs(s: i64) -> RationalTime {
        RationalTime::from_seconds(s)
    }

    fn store_of_duration(total: i64) -> ClipStore {
        let mut store = ClipStore::new();
        store
            .append(ClipSource::new("media", secs(total)), 0)
            .unwrap();
        store
    }

    fn assert_contiguous(ranges: &[ChapterRange], end: RationalTime) {
        assert_eq!(ranges[0].start, RationalTime::ZERO);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(ranges.last().unwrap().end, end);
    }

    #[test]
    fn test_no_markers_yields_single_range() {
        let store = store_of_duration(120);
        let ranges = partition(&store, &[], "Full Timeline");
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].name, "Full Timeline");
        assert_eq!(ranges[0].start, RationalTime::ZERO);
        assert_eq!(ranges[0].end, secs(120));
    }

    #[test]
    fn test_out_of_range_markers_dropped() {
        let store = store_of_duration(180);
        let markers = vec![
            ChapterMarker::new(secs(0), "Intro"),
            ChapterMarker::new(secs(90), "Main"),
            ChapterMarker::new(secs(200), "Beyond"),
        ];
        let ranges = partition(&store, &markers, "Default");
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].name, "Intro");
        assert_eq!((ranges[0].start, ranges[0].end), (secs(0), secs(90)));
        assert_eq!(ranges[1].name, "Main");
        assert_eq!((ranges[1].start, ranges[1].end), (secs(90), secs(180)));
        assert_contiguous(&ranges, secs(180));
    }

    #[test]
    fn test_marker_at_end_is_dropped() {
        let store = store_of_duration(60);
        let markers = vec![ChapterMarker::new(secs(60), "At End")];
        let ranges = partition(&store, &markers, "Default");
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].name, "Default");
    }

    #[test]
    fn test_first_range_pinned_to_zero() {
        let store = store_of_duration(100);
        let markers = vec![ChapterMarker::new(secs(30), "Late Start")];
        let ranges = partition(&store, &markers, "Default");
        assert_eq!(ranges.len(), 1);
        // The marker sits at 30s but its range still covers from zero.
        assert_eq!(ranges[0].start, RationalTime::ZERO);
        assert_eq!(ranges[0].end, secs(100));
        assert_eq!(ranges[0].name, "Late Start");
    }

    #[test]
    fn test_unsorted_markers_are_sorted() {
        let store = store_of_duration(100);
        let markers = vec![
            ChapterMarker::new(secs(60), "Second"),
            ChapterMarker::new(secs(20), "First"),
        ];
        let ranges = partition(&store, &markers, "Default");
        assert_eq!(ranges[0].name, "First");
        assert_eq!(ranges[1].name, "Second");
        assert_contiguous(&ranges, secs(100));
    }

    #[test]
    fn test_duplicate_markers_keep_first() {
        let store = store_of_duration(120);
        let markers = vec![
            ChapterMarker::new(secs(60), "A"),
            ChapterMarker::new(secs(60), "B"),
        ];
        let ranges = partition(&store, &markers, "Default");
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].name, "A");
        assert_eq!(ranges[0].end, secs(120));
    }

    #[test]
    fn test_untitled_markers_get_numbered_names() {
        let store = store_of_duration(90);
        let markers = vec![
            ChapterMarker::new(secs(0), ""),
            ChapterMarker::new(secs(30), "Named"),
            ChapterMarker::new(secs(60), ""),
        ];
        let ranges = partition(&store, &markers, "Default");
        assert_eq!(ranges[0].name, "Untitled Chapter 1");
        assert_eq!(ranges[1].name, "Named");
        assert_eq!(ranges[2].name, "Untitled Chapter 3");
    }

    #[test]
    fn test_partition_invariant_for_sorted_in_range_markers() {
        let store = store_of_duration(200);
        let markers: Vec<_> = (0..5)
            .map(|i| ChapterMarker::new(secs(i * 40), format!("Chapter {}", i + 1)))
            .collect();
        let ranges = partition(&store, &markers, "Default");
        assert_eq!(ranges.len(), markers.len());
        assert_contiguous(&ranges, secs(200));
        for (i, range) in ranges.iter().enumerate() {
            assert_eq!(range.index, i);
        }
    }
}
