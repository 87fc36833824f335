//! Clip placement over integer lanes.
//!
//! The store owns its clips outright (cloning the store clones every clip),
//! assigns ids from an internal counter, and offers three mutators: append at
//! the timeline end, insert at an exact offset with optional lane
//! auto-selection, and ripple insert with scoped downstream shifting. All
//! mutators validate before touching state; failures leave the store
//! untouched.

use serde::{Deserialize, Serialize};

use super::types::{Clip, ClipId, ClipShift, ClipSource, LaneRange, RippleResult, RippleScope};
use crate::error::{Error, Result};
use crate::time::RationalTime;

/// An unordered, id-keyed collection of placed clips.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClipStore {
    clips: Vec<Clip>,
    next_id: u64,
}

impl ClipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All clips, in placement order. The order carries no timeline meaning;
    /// queries sort as they select.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Earliest clip offset, or zero for an empty store.
    pub fn start(&self) -> RationalTime {
        self.clips
            .iter()
            .map(|c| c.offset)
            .min()
            .unwrap_or(RationalTime::ZERO)
    }

    /// Latest clip end, or zero for an empty store.
    pub fn end(&self) -> RationalTime {
        self.clips
            .iter()
            .map(|c| c.end())
            .max()
            .unwrap_or(RationalTime::ZERO)
    }

    /// Overall extent, `end - start`.
    pub fn duration(&self) -> RationalTime {
        self.end() - self.start()
    }

    /// Inclusive span of lanes present, `0..0` for an empty store.
    pub fn lane_range(&self) -> LaneRange {
        let mut lanes = self.clips.iter().map(|c| c.lane);
        match lanes.next() {
            None => LaneRange { lower: 0, upper: 0 },
            Some(first) => {
                let (lower, upper) = lanes.fold((first, first), |(lo, hi), lane| {
                    (lo.min(lane), hi.max(lane))
                });
                LaneRange { lower, upper }
            }
        }
    }

    /// Place a clip at the global timeline end.
    ///
    /// The offset is the end across all lanes, not the per-lane end, so
    /// sequential appends always extend the overall timeline rather than
    /// back-filling gaps on other lanes.
    pub fn append(&mut self, source: ClipSource, lane: i32) -> Result<Clip> {
        validate(&source)?;
        let offset = self.end();
        Ok(self.place(source, offset, lane))
    }

    /// Place a clip at an exact offset.
    ///
    /// With an explicit `lane` the clip lands there unconditionally; overlap
    /// on a chosen lane is permitted and left to downstream mixing. With
    /// `None` the store probes lanes `0, 1, -1, 2, -2, ...` within the
    /// current lane span extended by one in each direction and takes the
    /// first lane whose clips do not overlap the new interval.
    pub fn insert(
        &mut self,
        source: ClipSource,
        offset: RationalTime,
        lane: Option<i32>,
    ) -> Result<Clip> {
        validate(&source)?;
        let lane = match lane {
            Some(n) => n,
            None => auto_lane(&self.clips, self.lane_range(), offset, offset + source.duration),
        };
        Ok(self.place(source, offset, lane))
    }

    /// Place a clip and shift every in-scope downstream clip forward by the
    /// new clip's duration.
    ///
    /// A clip is downstream iff its offset is at or after the insertion
    /// offset; clips that overlap the insertion point but start before it
    /// never move. The shift is computed as a filter+map over the clip set
    /// and applied atomically, so the returned shift list is exact.
    pub fn insert_with_ripple(
        &mut self,
        source: ClipSource,
        offset: RationalTime,
        lane: i32,
        scope: RippleScope,
    ) -> Result<RippleResult> {
        validate(&source)?;
        let amount = source.duration;

        let shifted: Vec<ClipShift> = self
            .clips
            .iter()
            .filter(|c| c.offset >= offset && scope.contains(c.lane))
            .map(|c| ClipShift {
                id: c.id,
                lane: c.lane,
                from: c.offset,
                to: c.offset + amount,
            })
            .collect();

        // Apply before placing the new clip so it cannot shift itself.
        for clip in &mut self.clips {
            if clip.offset >= offset && scope.contains(clip.lane) {
                clip.offset = clip.offset + amount;
            }
        }
        let inserted = self.place(source, offset, lane);

        tracing::debug!(
            shifted = shifted.len(),
            offset = %inserted.offset,
            "ripple insert placed clip {}",
            inserted.id
        );
        Ok(RippleResult { inserted, shifted })
    }

    /// Remove and return a clip.
    pub fn remove(&mut self, id: ClipId) -> Result<Clip> {
        match self.clips.iter().position(|c| c.id == id) {
            Some(index) => Ok(self.clips.remove(index)),
            None => Err(Error::ClipNotFound(id)),
        }
    }

    fn place(&mut self, source: ClipSource, offset: RationalTime, lane: i32) -> Clip {
        let clip = Clip {
            id: ClipId(self.next_id),
            asset: source.asset,
            offset,
            duration: source.duration,
            source_start: source.source_start,
            lane,
            name: source.name,
        };
        self.next_id += 1;
        self.clips.push(clip.clone());
        clip
    }
}

fn validate(source: &ClipSource) -> Result<()> {
    if !source.duration.is_positive() {
        return Err(Error::InvalidClip {
            asset: source.asset.clone(),
            reason: format!("duration {} is not positive", source.duration),
        });
    }
    if source.source_start.is_negative() {
        return Err(Error::InvalidClip {
            asset: source.asset.clone(),
            reason: format!("source start {} is negative", source.source_start),
        });
    }
    Ok(())
}

/// First lane where `[start, end)` fits without overlap, probing
/// `0, 1, -1, 2, -2, ...` clipped to the store's lane span extended by one.
///
/// Pure function over a snapshot of placements. The extended lanes are empty
/// by definition, so the probe always terminates with a free lane.
fn auto_lane(clips: &[Clip], range: LaneRange, start: RationalTime, end: RationalTime) -> i32 {
    let lower = range.lower - 1;
    let upper = range.upper + 1;
    let max_step = upper.max(-lower);
    (0..=max_step)
        .flat_map(|k| if k == 0 { vec![0] } else { vec![k, -k] })
        .filter(|lane| (lower..=upper).contains(lane))
        .find(|&lane| {
            !clips
                .iter()
                .any(|c| c.lane == lane && c.overlaps(start, end))
        })
        .unwrap_or(upper)
}
