//! Read-only placement queries.
//!
//! Queries never fail: a missing id is `None`, an empty selection is an
//! empty list. Selection sorts as it collects, since the store itself keeps
//! no timeline order.

use super::store::ClipStore;
use super::types::{Clip, ClipId};
use crate::time::RationalTime;

impl ClipStore {
    /// Look up a single placement by id.
    pub fn placement(&self, id: ClipId) -> Option<&Clip> {
        self.clips().iter().find(|c| c.id == id)
    }

    /// All placements on one lane, sorted by offset.
    pub fn placements_in_lane(&self, lane: i32) -> Vec<&Clip> {
        let mut clips: Vec<&Clip> = self.clips().iter().filter(|c| c.lane == lane).collect();
        clips.sort_by_key(|c| c.offset);
        clips
    }

    /// All placements overlapping the half-open interval `[start, end)`,
    /// sorted by offset then lane.
    pub fn placements_overlapping(&self, start: RationalTime, end: RationalTime) -> Vec<&Clip> {
        let mut clips: Vec<&Clip> = self
            .clips()
            .iter()
            .filter(|c| c.overlaps(start, end))
            .collect();
        clips.sort_by_key(|c| (c.offset, c.lane));
        clips
    }
}
