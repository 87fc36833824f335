//! Clip distribution across chapter ranges.
//!
//! A clip is owned by the range its *start* falls in, however far its
//! duration runs past the range end; clips are never trimmed or split. Only
//! the primary lane participates: secondary lanes are excluded from
//! multi-range export by design.

use super::types::ChapterRange;
use crate::timeline::{Clip, ClipStore};

/// Clips owned by `range`, retimed to range-relative zero.
///
/// Selection is `lane == 0 && range.start <= offset < range.end`, sorted by
/// offset. Each returned clip is a copy with `offset` re-based to the range
/// start; duration, source start, and name are unchanged.
pub fn clips_for_range(store: &ClipStore, range: &ChapterRange) -> Vec<Clip> {
    let mut clips: Vec<Clip> = store
        .clips()
        .iter()
        .filter(|c| c.lane == 0 && range.contains(c.offset))
        .cloned()
        .collect();
    clips.sort_by_key(|c| c.offset);
    for clip in &mut clips {
        clip.offset = clip.offset - range.start;
    }
    clips
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapters::{partition, ChapterMarker};
    use crate::time::RationalTime;
    use crate::timeline::ClipSource;

    fn secs(s: i64) -> RationalTime {
        RationalTime::from_seconds(s)
    }

    fn range(start: i64, end: i64) -> ChapterRange {
        ChapterRange {
            index: 0,
            name: "Test".to_string(),
            start: secs(start),
            end: secs(end),
        }
    }

    #[test]
    fn test_selects_primary_lane_only() {
        let mut store = ClipStore::new();
        store.append(ClipSource::new("a", secs(10)), 0).unwrap();
        store
            .insert(ClipSource::new("b", secs(10)), secs(0), Some(1))
            .unwrap();
        let clips = clips_for_range(&store, &range(0, 20));
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].asset.as_str(), "a");
    }

    #[test]
    fn test_retiming_rebases_offset_only() {
        let mut store = ClipStore::new();
        let placed = store
            .insert(
                ClipSource::new("a", secs(10))
                    .with_source_start(secs(3))
                    .with_name("Scene"),
                secs(45),
                Some(0),
            )
            .unwrap();
        let clips = clips_for_range(&store, &range(40, 60));
        assert_eq!(clips.len(), 1);
        let retimed = &clips[0];
        assert_eq!(retimed.offset, secs(5));
        // Round-trip: retimed offset plus range start recovers the original.
        assert_eq!(retimed.offset + secs(40), placed.offset);
        assert_eq!(retimed.duration, placed.duration);
        assert_eq!(retimed.source_start, placed.source_start);
        assert_eq!(retimed.name, placed.name);
    }

    #[test]
    fn test_clip_owned_by_range_it_starts_in() {
        let mut store = ClipStore::new();
        // [55, 75) starts in [40,60) and runs past its end; it still belongs
        // to [40,60) in full and is never trimmed.
        store
            .insert(ClipSource::new("a", secs(20)), secs(55), Some(0))
            .unwrap();
        let first = clips_for_range(&store, &range(40, 60));
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].duration, secs(20));
        let second = clips_for_range(&store, &range(60, 80));
        assert!(second.is_empty());
    }

    #[test]
    fn test_clip_on_boundary_belongs_to_starting_range() {
        let mut store = ClipStore::new();
        store
            .insert(ClipSource::new("a", secs(5)), secs(60), Some(0))
            .unwrap();
        assert!(clips_for_range(&store, &range(40, 60)).is_empty());
        let owned = clips_for_range(&store, &range(60, 80));
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].offset, RationalTime::ZERO);
    }

    #[test]
    fn test_sorted_by_offset() {
        let mut store = ClipStore::new();
        store
            .insert(ClipSource::new("late", secs(5)), secs(30), Some(0))
            .unwrap();
        store
            .insert(ClipSource::new("early", secs(5)), secs(10), Some(0))
            .unwrap();
        let clips = clips_for_range(&store, &range(0, 40));
        let assets: Vec<_> = clips.iter().map(|c| c.asset.as_str()).collect();
        assert_eq!(assets, vec!["early", "late"]);
    }

    #[test]
    fn test_every_primary_clip_lands_in_exactly_one_range() {
        let mut store = ClipStore::new();
        for i in 0..6 {
            store
                .insert(ClipSource::new("a", secs(10)), secs(i * 20), Some(0))
                .unwrap();
        }
        let markers = vec![
            ChapterMarker::new(secs(0), "One"),
            ChapterMarker::new(secs(50), "Two"),
            ChapterMarker::new(secs(90), "Three"),
        ];
        let ranges = partition(&store, &markers, "Default");
        let total: usize = ranges
            .iter()
            .map(|r| clips_for_range(&store, r).len())
            .sum();
        assert_eq!(total, store.len());
    }
}
